//! # OSF API Rust Client
//!
//! A Rust client for the OSF JSON:API, providing type-safe configuration,
//! credential handling, a request dispatcher, and resource objects for
//! projects, storage, and users.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`OsfConfig`] and [`OsfConfigBuilder`]
//! - Validated newtypes for the API base URL and access tokens
//! - Pluggable credentials: bearer tokens, HTTP basic, or a custom [`RequestSigner`]
//! - A [`Session`] dispatcher with API version negotiation, JSON:API
//!   envelopes, throttling retries, and pagination
//! - Resource objects ([`Node`], [`Provider`], [`Folder`], [`File`], [`User`])
//!   that hydrate themselves from JSON:API documents
//!
//! ## Quick Start
//!
//! ```rust
//! use osf_client::{AccessToken, ApiBaseUrl, Credential, OsfConfig, Session};
//!
//! let config = OsfConfig::builder()
//!     .api_base_url(ApiBaseUrl::new("https://api.osf.io/").unwrap())
//!     .credential(Credential::bearer(AccessToken::new("personal-token").unwrap()))
//!     .build()
//!     .unwrap();
//!
//! let session = Session::shared(config).unwrap();
//! assert_eq!(session.request_count(), 0);
//! ```
//!
//! ## Working With Nodes
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use osf_client::{ApiResource, CallOptions, Node};
//! use osf_client::rest::resources::NodeAttributes;
//!
//! let options = CallOptions::default();
//!
//! let mut project = Node::new(Arc::clone(&session));
//! project
//!     .create(&NodeAttributes::new("Survey data").public(false), &options)
//!     .await?;
//!
//! let child = project
//!     .create_child(&NodeAttributes::new("Wave 1").category("data"), &options)
//!     .await?;
//! ```
//!
//! ## Working With Storage
//!
//! ```rust,ignore
//! use osf_client::{CallOptions, StorageObject};
//! use osf_client::rest::resources::ListOptions;
//! use osf_client::rest::MoveOptions;
//!
//! let options = CallOptions::default();
//! let mut providers = project.get_providers(&options).await?;
//! let storage = &mut providers[0];
//!
//! let data = storage.create("raw", &options).await?.unwrap();
//! let mut file = storage
//!     .upload("notes.txt", b"hello".to_vec(), &options)
//!     .await?
//!     .unwrap();
//!
//! file.move_to(&data, &MoveOptions::new(), &options).await?;
//! let bytes = file.download(&options).await?;
//! ```
//!
//! ## Making Raw Requests
//!
//! ```rust,ignore
//! use osf_client::{CallOptions, HttpMethod};
//! use osf_client::clients::JsonApiRequest;
//!
//! let document = session
//!     .get("v2/nodes/abc12/", &CallOptions::new().query_param("embed", "children"))
//!     .await?;
//!
//! let request = JsonApiRequest::builder(HttpMethod::Delete, "v2/nodes/abc12/").build()?;
//! session.request(request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The session is `Send + Sync` and shared through `Arc`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{Credential, RequestSigner};
pub use config::{AccessToken, ApiBaseUrl, ApiVersion, OsfConfig, OsfConfigBuilder, VersionStrategy};
pub use error::ConfigError;

// Re-export dispatcher types
pub use clients::{
    CallOptions, HttpError, HttpMethod, HttpResponse, HttpResponseError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError, Session,
};

// Re-export resource types
pub use rest::resources::{File, FileEntry, Folder, Node, Provider, User};
pub use rest::{ApiResource, ResourceData, ResourceError, StorageObject};
