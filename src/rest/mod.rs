//! Resource model for the OSF API.
//!
//! This module turns JSON:API documents into resource objects and back:
//!
//! - **Document model**: [`unwrap_data`], [`materialize_attributes`],
//!   [`collect_attributes`], [`AttributeBag`], and [`ResourceData`]
//! - **[`ApiResource`] trait**: the capability shared by every resource
//! - **[`StorageObject`] trait**: rename, move, copy, and delete for
//!   storage entries
//! - **Path building**: canonical URL templates per resource
//! - **[`ResourceError`]**: errors for resource operations
//!
//! Individual resources (Node, File, Folder, Provider, User) live in the
//! [`resources`] submodule.
//!
//! # Example
//!
//! ```rust,ignore
//! use osf_client::rest::resources::{Node, NodeAttributes};
//! use osf_client::rest::ApiResource;
//! use osf_client::CallOptions;
//!
//! let mut node = Node::new(Arc::clone(&session));
//! node.create(
//!     &NodeAttributes::new("Pilot").description("First run"),
//!     &CallOptions::default(),
//! )
//! .await?;
//!
//! assert!(node.is_persisted());
//! println!("created {:?} at {:?}", node.id(), node.links().link("self"));
//!
//! node.delete(&CallOptions::default()).await?;
//! assert!(!node.is_persisted());
//! ```

mod document;
mod errors;
mod path;
mod resource;

pub mod resources;

pub use document::{
    collect_attributes, materialize_attributes, unwrap_data, AttributeBag, ResourceData,
};
pub use errors::ResourceError;
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{ApiResource, ConflictStrategy, MoveOptions, StorageObject};
