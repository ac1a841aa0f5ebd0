//! Shared capabilities of API resources.
//!
//! Every resource type implements [`ApiResource`]: it owns a
//! [`ResourceData`] and an `Arc<Session>`, and gains URL resolution and
//! document application from the trait's default methods. Storage entries
//! (files and folders) additionally implement [`StorageObject`], which adds
//! the storage-backend actions: rename, move, copy, and delete.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use osf_client::rest::{ApiResource, ResourceData, ResourceOperation, ResourcePath};
//! use osf_client::{HttpMethod, Session};
//!
//! pub struct Registration {
//!     session: Arc<Session>,
//!     data: ResourceData,
//! }
//!
//! impl ApiResource for Registration {
//!     const NAME: &'static str = "Registration";
//!     const TYPE: &'static str = "registrations";
//!     const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Find,
//!         &["id"],
//!         "v2/registrations/{id}/",
//!     )];
//!
//!     fn session(&self) -> &Arc<Session> { &self.session }
//!     fn data(&self) -> &ResourceData { &self.data }
//!     fn data_mut(&mut self) -> &mut ResourceData { &mut self.data }
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::clients::{CallOptions, Session};
use crate::rest::resources::{storage_resolution_url, FileEntry, Folder};
use crate::rest::{
    build_path, get_path, AttributeBag, ResourceData, ResourceError, ResourceOperation,
    ResourcePath,
};

/// A server-side entity addressable by id or link.
///
/// A resource is either Transient (no id) or Persisted (id set). Fetching
/// moves it to a fresh Persisted state; deleting moves it back to Transient.
///
/// Resources are not meant to be mutated from several tasks at once; the
/// mutating operations take `&mut self`.
#[allow(async_fn_in_trait)]
pub trait ApiResource: Send + Sync + Sized {
    /// The type name used in error messages (e.g., "Node").
    const NAME: &'static str;

    /// The JSON:API `type` sent in request envelopes.
    const TYPE: &'static str;

    /// Canonical URL templates for this resource.
    const PATHS: &'static [ResourcePath] = &[];

    /// Returns the session backing this resource.
    fn session(&self) -> &Arc<Session>;

    /// Returns the resource state.
    fn data(&self) -> &ResourceData;

    /// Returns the resource state mutably.
    fn data_mut(&mut self) -> &mut ResourceData;

    /// Returns the server-assigned id, if persisted.
    fn id(&self) -> Option<&str> {
        self.data().id()
    }

    /// Returns `true` once the resource has an id.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    /// Returns a server-defined attribute.
    fn attribute(&self, key: &str) -> Option<&Value> {
        self.data().attributes.get(key)
    }

    /// Returns the relationship descriptors.
    fn relationships(&self) -> &AttributeBag {
        &self.data().relationships
    }

    /// Returns the action links.
    fn links(&self) -> &AttributeBag {
        &self.data().links
    }

    /// Returns the server metadata.
    fn meta(&self) -> &AttributeBag {
        &self.data().meta
    }

    /// Applies a document to this resource. See
    /// [`ResourceData::update_from_document`].
    fn update_from_document(&mut self, document: &Value) -> bool {
        self.data_mut().update_from_document(document)
    }

    /// Returns the URL of link `name`, or [`ResourceError::MissingLink`].
    ///
    /// # Errors
    ///
    /// Fails when the link has not been loaded.
    fn require_link(&self, name: &str) -> Result<String, ResourceError> {
        self.links()
            .link(name)
            .map(ToString::to_string)
            .ok_or_else(|| ResourceError::missing_link(Self::NAME, name))
    }

    /// Returns `relationships.<relation>.links.related.href`, or
    /// [`ResourceError::MissingLink`].
    ///
    /// # Errors
    ///
    /// Fails when the relationship has not been loaded.
    fn require_related(&self, relation: &str) -> Result<String, ResourceError> {
        self.relationships()
            .related_href(relation)
            .map(ToString::to_string)
            .ok_or_else(|| ResourceError::missing_link(Self::NAME, relation))
    }

    /// Builds the canonical URL for `operation` from the known ids.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if no template
    /// matches.
    fn resolve_path(&self, operation: ResourceOperation) -> Result<String, ResourceError> {
        let mut ids: HashMap<&str, String> = HashMap::new();
        if let Some(id) = self.id() {
            ids.insert("id", id.to_string());
        }

        let available_ids: Vec<&str> = ids.keys().copied().collect();
        let path = get_path(Self::PATHS, operation, &available_ids).ok_or(
            ResourceError::PathResolutionFailed {
                resource: Self::NAME,
                operation: operation.as_str(),
            },
        )?;

        Ok(build_path(path.template, &ids))
    }

    /// Picks the URL to fetch from: `override_url`, else the `self` link,
    /// else the id-templated canonical URL.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLocator`] if none is available.
    fn locate(&self, override_url: Option<&str>) -> Result<String, ResourceError> {
        if let Some(url) = override_url.or_else(|| self.data().self_link()) {
            return Ok(url.to_string());
        }
        self.resolve_path(ResourceOperation::Find)
            .map_err(|_| ResourceError::MissingLocator {
                resource: Self::NAME,
            })
    }

    /// GETs `url` and applies the response to this resource.
    ///
    /// An empty response leaves the resource unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    async fn fetch_into(&mut self, url: &str, options: &CallOptions) -> Result<(), ResourceError> {
        let session = Arc::clone(self.session());
        if let Some(document) = session.get(url, options).await? {
            self.update_from_document(&document);
        }
        Ok(())
    }
}

/// How the storage backend handles a name clash at the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictStrategy {
    /// Overwrite the existing entry.
    Replace,
    /// Keep both, renaming the new one.
    Keep,
}

impl ConflictStrategy {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Keep => "keep",
        }
    }
}

/// Options for [`StorageObject::move_to`] and [`StorageObject::copy_to`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOptions {
    /// New name at the destination.
    pub rename: Option<String>,
    /// Name clash handling.
    pub conflict: Option<ConflictStrategy>,
}

impl MoveOptions {
    /// Creates options that keep the name and use the backend's default
    /// conflict handling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name at the destination.
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Sets the conflict strategy.
    #[must_use]
    pub const fn conflict(mut self, conflict: ConflictStrategy) -> Self {
        self.conflict = Some(conflict);
        self
    }
}

/// Storage-backend actions shared by files and folders.
///
/// Storage actions answer with the flatter storage document. Operations
/// that must end with a canonical entity re-resolve it through
/// [`StorageObject::resolve_storage_response`].
#[allow(async_fn_in_trait)]
pub trait StorageObject: ApiResource {
    /// Fetches this entry from `url`, else from its `self` link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLocator`] when neither is available,
    /// or [`ResourceError::Http`] if the request fails.
    async fn fetch(&mut self, url: Option<&str>, options: &CallOptions) -> Result<(), ResourceError> {
        let url = self.locate(url)?;
        self.fetch_into(&url, options).await
    }

    /// Renames this entry in place.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] without a `move` link, or
    /// [`ResourceError::Http`] if the request fails.
    async fn rename(&mut self, name: &str, options: &CallOptions) -> Result<(), ResourceError> {
        let url = self.require_link("move")?;
        let body = json!({"action": "rename", "rename": name});

        let session = Arc::clone(self.session());
        if let Some(document) = session.post_json(&url, &body, options).await? {
            self.update_from_document(&document);
        }
        Ok(())
    }

    /// Moves this entry into `destination`, then re-resolves it in place.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] if this entry has no `move`
    /// link or `destination` lacks its node, or [`ResourceError::Http`] if
    /// a request fails.
    async fn move_to(
        &mut self,
        destination: &Folder,
        move_options: &MoveOptions,
        options: &CallOptions,
    ) -> Result<(), ResourceError> {
        let response = self
            .transfer("move", destination, move_options, options)
            .await?;
        if let Some(document) = response {
            self.resolve_storage_response(&document, options).await?;
        }
        Ok(())
    }

    /// Copies this entry into `destination` and returns the copy.
    ///
    /// Returns `Ok(None)` if the server sent no content.
    ///
    /// # Errors
    ///
    /// Same as [`StorageObject::move_to`].
    async fn copy_to(
        &self,
        destination: &Folder,
        move_options: &MoveOptions,
        options: &CallOptions,
    ) -> Result<Option<FileEntry>, ResourceError> {
        let response = self
            .transfer("copy", destination, move_options, options)
            .await?;
        match response {
            Some(document) => {
                FileEntry::from_storage_response(Arc::clone(self.session()), &document, options)
                    .await
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    /// Deletes this entry. A Transient entry is left alone and no request
    /// is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] without a `delete` link, or
    /// [`ResourceError::Http`] if the request fails.
    async fn delete(&mut self, options: &CallOptions) -> Result<(), ResourceError> {
        if !self.is_persisted() {
            return Ok(());
        }
        let url = self.require_link("delete")?;
        self.session().delete(&url, options).await?;
        self.data_mut().id = None;
        Ok(())
    }

    /// Maps a storage-backend response to the canonical API entity and
    /// applies it to this entry.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedDocument`] if the response lacks
    /// `provider` or `path`, or [`ResourceError::Http`] if the follow-up
    /// request fails.
    async fn resolve_storage_response(
        &mut self,
        document: &Value,
        options: &CallOptions,
    ) -> Result<(), ResourceError> {
        let url = storage_resolution_url(document)?;
        self.fetch_into(&url, options).await
    }

    /// POSTs a move or copy action to this entry's `move` link.
    ///
    /// # Errors
    ///
    /// See [`StorageObject::move_to`].
    async fn transfer(
        &self,
        action: &str,
        destination: &Folder,
        move_options: &MoveOptions,
        options: &CallOptions,
    ) -> Result<Option<Value>, ResourceError> {
        let url = self.require_link("move")?;
        let body = transfer_body(action, destination, move_options)?;
        Ok(self.session().post_json(&url, &body, options).await?)
    }
}

fn transfer_body(
    action: &str,
    destination: &Folder,
    move_options: &MoveOptions,
) -> Result<Value, ResourceError> {
    let target = destination.data();
    let resource = target
        .relationships
        .related_id("node")
        .or_else(|| target.relationships.related_id("target"))
        .or_else(|| target.attributes.get_str("resource"))
        .ok_or_else(|| ResourceError::missing_link(Folder::NAME, "node"))?;

    let mut body = json!({
        "action": action,
        "path": target.path(),
        "resource": resource,
        "provider": target.provider(),
    });
    if let Some(rename) = &move_options.rename {
        body["rename"] = json!(rename);
    }
    if let Some(conflict) = move_options.conflict {
        body["conflict"] = json!(conflict.as_str());
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiBaseUrl, OsfConfig};

    fn session() -> Arc<Session> {
        let config = OsfConfig::builder()
            .api_base_url(ApiBaseUrl::new("https://api.test.osf.io/").unwrap())
            .build()
            .unwrap();
        Session::shared(config).unwrap()
    }

    fn destination() -> Folder {
        Folder::from_document(
            session(),
            &json!({
                "data": {
                    "id": "5f3a",
                    "type": "files",
                    "attributes": {"kind": "folder", "path": "/5f3a/", "provider": "osfstorage"},
                    "relationships": {"node": {"data": {"id": "abc12", "type": "nodes"}}}
                }
            }),
        )
    }

    #[test]
    fn test_transfer_body_minimal() {
        let body = transfer_body("move", &destination(), &MoveOptions::new()).unwrap();
        assert_eq!(
            body,
            json!({
                "action": "move",
                "path": "/5f3a/",
                "resource": "abc12",
                "provider": "osfstorage"
            })
        );
    }

    #[test]
    fn test_transfer_body_with_rename_and_conflict() {
        let options = MoveOptions::new()
            .rename("copy.csv")
            .conflict(ConflictStrategy::Keep);
        let body = transfer_body("copy", &destination(), &options).unwrap();
        assert_eq!(body["action"], "copy");
        assert_eq!(body["rename"], "copy.csv");
        assert_eq!(body["conflict"], "keep");
    }

    #[test]
    fn test_transfer_body_requires_destination_node() {
        let folder = Folder::from_document(
            session(),
            &json!({"data": {"attributes": {"kind": "folder", "path": "/"}}}),
        );
        assert!(matches!(
            transfer_body("move", &folder, &MoveOptions::new()),
            Err(ResourceError::MissingLink { .. })
        ));
    }

    #[test]
    fn test_conflict_strategy_wire_values() {
        assert_eq!(ConflictStrategy::Replace.as_str(), "replace");
        assert_eq!(ConflictStrategy::Keep.as_str(), "keep");
    }
}
