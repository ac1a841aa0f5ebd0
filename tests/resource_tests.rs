//! Integration tests for the resource types.
//!
//! These tests drive nodes, providers, folders, files, and users against a
//! mock server and verify the requests they issue and how they apply the
//! responses.

use std::sync::Arc;

use osf_client::rest::resources::{ListOptions, NodeAttributes};
use osf_client::rest::{ConflictStrategy, MoveOptions};
use osf_client::{
    ApiBaseUrl, ApiResource, CallOptions, File, FileEntry, Folder, Node, OsfConfig,
    ResourceError, Session, StorageObject, User,
};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> Arc<Session> {
    let config = OsfConfig::builder()
        .api_base_url(ApiBaseUrl::new(format!("{}/", server.uri())).unwrap())
        .build()
        .unwrap();
    Session::shared(config).unwrap()
}

fn request_body(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

fn node_document(base: &str) -> Value {
    json!({
        "data": {
            "id": "abc12",
            "type": "nodes",
            "attributes": {
                "title": "Pilot study",
                "category": "project",
                "description": "Data for the pilot",
                "public": false,
                "date_created": "2024-03-01T12:30:00.000000"
            },
            "relationships": {
                "files": {"links": {"related": {"href": format!("{base}/v2/nodes/abc12/files/")}}},
                "children": {"links": {"related": {"href": format!("{base}/v2/nodes/abc12/children/")}}}
            },
            "links": {"self": format!("{base}/v2/nodes/abc12/")}
        }
    })
}

fn provider_entry(base: &str, name: &str) -> Value {
    json!({
        "id": format!("abc12:{name}"),
        "type": "files",
        "attributes": {"kind": "folder", "name": name, "path": "/", "provider": name, "node": "abc12"},
        "relationships": {
            "files": {"links": {"related": {"href": format!("{base}/v2/nodes/abc12/files/{name}/")}}},
            "node": {"data": {"id": "abc12", "type": "nodes"}}
        },
        "links": {
            "upload": format!("{base}/v1/resources/abc12/providers/{name}/"),
            "new_folder": format!("{base}/v1/resources/abc12/providers/{name}/")
        }
    })
}

fn file_entry(base: &str, id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "type": "files",
        "attributes": {
            "kind": "file",
            "name": name,
            "path": format!("/{id}"),
            "provider": "osfstorage",
            "size": 5
        },
        "links": {
            "self": format!("{base}/v2/files/{id}/"),
            "download": format!("{base}/download/{id}/"),
            "upload": format!("{base}/v1/resources/abc12/providers/osfstorage/{id}"),
            "move": format!("{base}/v1/resources/abc12/providers/osfstorage/{id}"),
            "delete": format!("{base}/v1/resources/abc12/providers/osfstorage/{id}")
        }
    })
}

fn folder_entry(base: &str, id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "type": "files",
        "attributes": {"kind": "folder", "name": name, "path": format!("/{id}/"), "provider": "osfstorage"},
        "relationships": {
            "files": {"links": {"related": {"href": format!("{base}/v2/nodes/abc12/files/osfstorage/{id}/")}}},
            "node": {"data": {"id": "abc12", "type": "nodes"}}
        },
        "links": {
            "new_folder": format!("{base}/v1/resources/abc12/providers/osfstorage/{id}/"),
            "upload": format!("{base}/v1/resources/abc12/providers/osfstorage/{id}/"),
            "move": format!("{base}/v1/resources/abc12/providers/osfstorage/{id}/"),
            "delete": format!("{base}/v1/resources/abc12/providers/osfstorage/{id}/")
        }
    })
}

// ============================================================================
// Document application
// ============================================================================

#[tokio::test]
async fn test_update_from_document_merges_attributes() {
    let server = MockServer::start().await;
    let session = session_for(&server);

    let mut node = Node::from_document(
        Arc::clone(&session),
        &json!({"data": {"id": "abc12", "attributes": {"title": "A", "description": "kept"}}}),
    );
    assert!(node.update_from_document(&json!({"data": {"attributes": {"title": "B"}}})));

    assert_eq!(node.title(), Some("B"));
    assert_eq!(node.description(), Some("kept"));
    assert_eq!(node.id(), Some("abc12"));
}

#[tokio::test]
async fn test_update_from_empty_document_is_a_no_op() {
    let server = MockServer::start().await;
    let session = session_for(&server);

    let mut node = Node::from_document(
        Arc::clone(&session),
        &json!({"data": {"id": "abc12", "attributes": {"title": "A"}}}),
    );
    let before = node.data().clone();

    assert!(!node.update_from_document(&json!({"data": null})));
    assert!(!node.update_from_document(&json!({"data": {}})));
    assert_eq!(node.data(), &before);
}

// ============================================================================
// Nodes
// ============================================================================

#[tokio::test]
async fn test_node_get_by_id() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/v2/nodes/abc12/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(node_document(&base)))
        .expect(1)
        .mount(&server)
        .await;

    let mut node = Node::with_id(session_for(&server), "abc12");
    assert_ok!(node.get(&CallOptions::default()).await);

    assert_eq!(node.title(), Some("Pilot study"));
    assert_eq!(node.category(), Some("project"));
    assert_eq!(node.is_public(), Some(false));
    assert!(node.data().date_created().is_some());
    assert_eq!(
        node.links().link("self"),
        Some(format!("{base}/v2/nodes/abc12/").as_str())
    );
}

#[tokio::test]
async fn test_node_get_by_self_link() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/v2/nodes/abc12/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(node_document(&base)))
        .expect(1)
        .mount(&server)
        .await;

    let mut node = Node::with_self_link(session_for(&server), format!("{base}/v2/nodes/abc12/"));
    assert!(!node.is_persisted());
    assert_ok!(node.get(&CallOptions::default()).await);

    assert_eq!(node.id(), Some("abc12"));
}

#[tokio::test]
async fn test_node_get_without_locator_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut node = Node::new(session_for(&server));
    let error = node.get(&CallOptions::default()).await.unwrap_err();

    assert!(matches!(error, ResourceError::MissingLocator { resource: "Node" }));
}

#[tokio::test]
async fn test_node_get_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/nodes/gone1/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"detail": "Not found."}]
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut node = Node::with_id(Arc::clone(&session), "gone1");
    let error = node.get(&CallOptions::default()).await.unwrap_err();

    assert!(error.is_not_found());
    assert_eq!(error.status(), Some(404));
    assert_eq!(session.error_count(), 1);
}

#[tokio::test]
async fn test_node_create_posts_envelope() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("POST"))
        .and(path("/v2/nodes/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(node_document(&base)))
        .expect(1)
        .mount(&server)
        .await;

    let mut node = Node::new(session_for(&server));
    let attributes = NodeAttributes::new("Pilot study")
        .description("Data for the pilot")
        .public(false);
    assert_ok!(node.create(&attributes, &CallOptions::default()).await);

    assert_eq!(node.id(), Some("abc12"));

    let requests = server.received_requests().await.unwrap();
    let body = request_body(&requests[0]);
    assert_eq!(body["data"]["type"], "nodes");
    assert_eq!(body["data"]["attributes"]["title"], "Pilot study");
    assert_eq!(body["data"]["attributes"]["category"], "project");
    assert_eq!(body["data"]["attributes"]["public"], false);
    // Unset optional attributes are not sent
    assert!(body["data"]["attributes"].get("tags").is_none());
    assert!(body["data"].get("id").is_none());
}

#[tokio::test]
async fn test_node_create_child() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("POST"))
        .and(path("/v2/nodes/abc12/children/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": "def34",
                "type": "nodes",
                "attributes": {"title": "Wave 1", "category": "data"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let parent = Node::from_document(Arc::clone(&session), &node_document(&base));
    let child = parent
        .create_child(
            &NodeAttributes::new("Wave 1").category("data"),
            &CallOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(child.id(), Some("def34"));
    assert_eq!(child.category(), Some("data"));
    assert_eq!(parent.id(), Some("abc12"));
    assert_eq!(parent.title(), Some("Pilot study"));
}

#[tokio::test]
async fn test_node_create_child_requires_children_relationship() {
    let server = MockServer::start().await;
    let node = Node::with_id(session_for(&server), "abc12");

    let error = node
        .create_child(&NodeAttributes::new("Wave 1"), &CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::MissingLink { .. }));
}

#[tokio::test]
async fn test_node_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/nodes/abc12/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut node = Node::with_id(session_for(&server), "abc12");
    assert_ok!(node.delete(&CallOptions::default()).await);

    assert!(!node.is_persisted());
}

#[tokio::test]
async fn test_transient_node_delete_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut node = Node::new(session_for(&server));
    assert_ok!(node.delete(&CallOptions::default()).await);
}

#[tokio::test]
async fn test_node_providers_fetch_relationships_first() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/v2/nodes/abc12/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(node_document(&base)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/nodes/abc12/files/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [provider_entry(&base, "osfstorage"), provider_entry(&base, "github")]
        })))
        .expect(3)
        .mount(&server)
        .await;

    let mut node = Node::with_id(session_for(&server), "abc12");
    let providers = node.get_providers(&CallOptions::default()).await.unwrap();

    let names: Vec<&str> = providers.iter().map(|p| p.provider_name()).collect();
    assert_eq!(names, vec!["osfstorage", "github"]);
    assert!(node.providers().is_empty());

    // The cache accumulates across calls
    assert_eq!(
        node.extend_provider_cache(&CallOptions::default())
            .await
            .unwrap()
            .len(),
        2
    );
    assert_eq!(
        node.extend_provider_cache(&CallOptions::default())
            .await
            .unwrap()
            .len(),
        4
    );
}

// ============================================================================
// Folders and providers
// ============================================================================

#[tokio::test]
async fn test_provider_listing_keeps_files_and_folders() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/v2/nodes/abc12/files/osfstorage/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                file_entry(&base, "f1", "a.txt"),
                folder_entry(&base, "d1", "raw"),
                {"id": "x1", "attributes": {"kind": "symlink", "name": "odd"}}
            ]
        })))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut provider = osf_client::Provider::from_document(
        Arc::clone(&session),
        &provider_entry(&base, "osfstorage"),
    );

    let files = provider
        .list(&ListOptions::new(), &CallOptions::default())
        .await
        .unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].is_file());
    assert_eq!(files[0].name(), Some("a.txt"));
    assert!(files[1].is_folder());
    assert_eq!(files[1].kind(), "folder");

    // Appending extends the listing, a plain listing replaces it
    provider
        .list(&ListOptions::new().append(true), &CallOptions::default())
        .await
        .unwrap();
    assert_eq!(provider.files().len(), 4);

    provider
        .list(&ListOptions::new(), &CallOptions::default())
        .await
        .unwrap();
    assert_eq!(provider.files().len(), 2);
}

#[tokio::test]
async fn test_folder_listing_follows_pages() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/v2/nodes/abc12/files/osfstorage/d1/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [file_entry(&base, "f2", "b.txt")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/nodes/abc12/files/osfstorage/d1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [file_entry(&base, "f1", "a.txt")],
            "links": {"next": format!("{base}/v2/nodes/abc12/files/osfstorage/d1/?page=2")}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut folder = Folder::from_document(session_for(&server), &folder_entry(&base, "d1", "raw"));
    let files = folder
        .get(&ListOptions::new().retrieve_all(true), &CallOptions::default())
        .await
        .unwrap();

    let names: Vec<Option<&str>> = files.iter().map(FileEntry::name).collect();
    assert_eq!(names, vec![Some("a.txt"), Some("b.txt")]);
}

#[tokio::test]
async fn test_folder_download_is_unsupported() {
    let server = MockServer::start().await;
    let folder = Folder::from_document(session_for(&server), &folder_entry(&server.uri(), "d1", "raw"));

    let error = folder.download(&CallOptions::default()).unwrap_err();

    assert!(matches!(
        error,
        ResourceError::UnsupportedMethod {
            resource: "folder",
            operation: "download"
        }
    ));
    assert_eq!(error.to_string(), "Cannot download a folder");
}

#[tokio::test]
async fn test_folder_create_resolves_new_folder() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("PUT"))
        .and(path("/v1/resources/abc12/providers/osfstorage/"))
        .and(query_param("kind", "folder"))
        .and(query_param("name", "data"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": "osfstorage/d2/",
                "type": "files",
                "attributes": {"kind": "folder", "name": "data", "path": "/d2/", "provider": "osfstorage", "resource": "abc12"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/files/d2/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": folder_entry(&base, "d2", "data")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let provider =
        osf_client::Provider::from_document(Arc::clone(&session), &provider_entry(&base, "osfstorage"));
    let created = provider
        .create("data", &CallOptions::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.id(), Some("d2"));
    assert_eq!(created.data().name(), Some("data"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(!requests[1].url.query_pairs().any(|(k, _)| k == "name"));
}

#[tokio::test]
async fn test_folder_upload_resolves_external_provider_file() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("PUT"))
        .and(path("/v1/resources/abc12/providers/github/"))
        .and(query_param("kind", "file"))
        .and(query_param("name", "notes.txt"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "attributes": {"kind": "file", "name": "notes.txt", "path": "/notes.txt", "provider": "github", "resource": "abc12"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/nodes/abc12/files/github/notes.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "gh1",
                "type": "files",
                "attributes": {"kind": "file", "name": "notes.txt", "path": "/notes.txt", "provider": "github"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let provider =
        osf_client::Provider::from_document(Arc::clone(&session), &provider_entry(&base, "github"));
    let file = provider
        .upload("notes.txt", b"hello".to_vec(), &CallOptions::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(file.id(), Some("gh1"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, b"hello".to_vec());
    assert!(requests[1].url.query_pairs().any(|(k, _)| k == "info"));
}

// ============================================================================
// Files
// ============================================================================

#[tokio::test]
async fn test_file_download_returns_bytes() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/download/f1/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let file = File::from_document(session_for(&server), &file_entry(&base, "f1", "a.txt"));
    let bytes = file.download(&CallOptions::default()).await.unwrap();

    assert_eq!(bytes, Some(b"hello".to_vec()));
}

#[tokio::test]
async fn test_file_download_requires_link() {
    let server = MockServer::start().await;
    let file = File::new(session_for(&server));

    let error = file.download(&CallOptions::default()).await.unwrap_err();

    assert!(matches!(
        error,
        ResourceError::MissingLink { resource: "File", .. }
    ));
}

#[tokio::test]
async fn test_file_upload_overwrites_contents() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("PUT"))
        .and(path("/v1/resources/abc12/providers/osfstorage/f1"))
        .and(query_param("kind", "file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"attributes": {"kind": "file", "name": "a.txt", "path": "/f1", "provider": "osfstorage"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = File::from_document(session_for(&server), &file_entry(&base, "f1", "a.txt"));
    let response = file
        .upload(b"updated".to_vec(), &CallOptions::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response["data"]["attributes"]["path"], "/f1");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, b"updated".to_vec());
}

#[tokio::test]
async fn test_file_rename_applies_response() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("POST"))
        .and(path("/v1/resources/abc12/providers/osfstorage/f1"))
        .and(body_json(json!({"action": "rename", "rename": "b.txt"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "osfstorage/f1", "attributes": {"kind": "file", "name": "b.txt", "path": "/f1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = File::from_document(session_for(&server), &file_entry(&base, "f1", "a.txt"));
    assert_ok!(file.rename("b.txt", &CallOptions::default()).await);

    assert_eq!(file.data().name(), Some("b.txt"));
    assert_eq!(file.data().provider(), Some("osfstorage"));
}

#[tokio::test]
async fn test_file_move_to_folder() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("POST"))
        .and(path("/v1/resources/abc12/providers/osfstorage/f1"))
        .and(body_json(json!({
            "action": "move",
            "path": "/d1/",
            "resource": "abc12",
            "provider": "osfstorage",
            "conflict": "replace"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"attributes": {"kind": "file", "name": "a.txt", "path": "/f9", "provider": "osfstorage"}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/files/f9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": file_entry(&base, "f9", "a.txt")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let destination = Folder::from_document(Arc::clone(&session), &folder_entry(&base, "d1", "raw"));
    let mut file = File::from_document(Arc::clone(&session), &file_entry(&base, "f1", "a.txt"));

    assert_ok!(
        file.move_to(
            &destination,
            &MoveOptions::new().conflict(ConflictStrategy::Replace),
            &CallOptions::default(),
        )
        .await
    );

    assert_eq!(file.id(), Some("f9"));
}

#[tokio::test]
async fn test_file_copy_to_returns_new_entry() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("POST"))
        .and(path("/v1/resources/abc12/providers/osfstorage/f1"))
        .and(body_json(json!({
            "action": "copy",
            "path": "/d1/",
            "resource": "abc12",
            "provider": "osfstorage",
            "rename": "copy.txt"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"attributes": {"kind": "file", "name": "copy.txt", "path": "/f7", "provider": "osfstorage"}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/files/f7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": file_entry(&base, "f7", "copy.txt")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let destination = Folder::from_document(Arc::clone(&session), &folder_entry(&base, "d1", "raw"));
    let file = File::from_document(Arc::clone(&session), &file_entry(&base, "f1", "a.txt"));

    let copy = file
        .copy_to(
            &destination,
            &MoveOptions::new().rename("copy.txt"),
            &CallOptions::default(),
        )
        .await
        .unwrap()
        .unwrap();

    assert!(copy.is_file());
    assert_eq!(copy.id(), Some("f7"));
    assert_eq!(copy.name(), Some("copy.txt"));
    assert_eq!(file.id(), Some("f1"));
}

#[tokio::test]
async fn test_move_requires_destination_node() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let destination = Folder::from_document(
        Arc::clone(&session),
        &json!({"data": {"id": "d1", "attributes": {"kind": "folder", "path": "/d1/", "provider": "osfstorage"}}}),
    );
    let mut file = File::from_document(Arc::clone(&session), &file_entry(&server.uri(), "f1", "a.txt"));

    let error = file
        .move_to(&destination, &MoveOptions::new(), &CallOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::MissingLink { .. }));
    assert_eq!(file.id(), Some("f1"));
}

#[tokio::test]
async fn test_file_delete() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("DELETE"))
        .and(path("/v1/resources/abc12/providers/osfstorage/f1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = File::from_document(session_for(&server), &file_entry(&base, "f1", "a.txt"));
    assert_ok!(StorageObject::delete(&mut file, &CallOptions::default()).await);

    assert!(!file.is_persisted());
}

#[tokio::test]
async fn test_transient_file_delete_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut file = File::new(session_for(&server));
    assert_ok!(StorageObject::delete(&mut file, &CallOptions::default()).await);
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_current_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/users/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "k4x9p", "type": "users", "attributes": {"full_name": "Ada Lovelace"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut me = User::new(session_for(&server));
    assert_ok!(me.get(&CallOptions::default()).await);

    assert_eq!(me.id(), Some("k4x9p"));
    assert_eq!(me.full_name(), Some("Ada Lovelace"));
}

#[tokio::test]
async fn test_user_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/users/q1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "q1", "type": "users", "attributes": {"full_name": "Grace Hopper"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut user = User::with_id(session_for(&server), "q1");
    assert_ok!(user.get(&CallOptions::default()).await);

    assert_eq!(user.full_name(), Some("Grace Hopper"));
}
