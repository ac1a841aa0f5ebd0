//! Resource types of the OSF API.
//!
//! Each type binds the dispatcher and the document model to one kind of
//! server entity:
//!
//! - [`Node`]: projects and components, with their storage providers
//! - [`Provider`]: the root folder of one storage backend on a node
//! - [`Folder`] and [`File`]: storage entries, wrapped in [`FileEntry`]
//!   when a listing can yield either
//! - [`User`]: user accounts, defaulting to the authenticated user
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use osf_client::rest::resources::{ListOptions, Node};
//! use osf_client::rest::StorageObject;
//! use osf_client::CallOptions;
//!
//! let options = CallOptions::default();
//!
//! let mut node = Node::with_id(Arc::clone(&session), "abc12");
//! node.get(&options).await?;
//!
//! let mut providers = node.get_providers(&options).await?;
//! let storage = &mut providers[0];
//! storage.list(&ListOptions::new(), &options).await?;
//!
//! for entry in storage.files() {
//!     if let Some(file) = entry.as_file() {
//!         let bytes = file.download(&options).await?;
//!     }
//! }
//! ```

mod entry;
mod file;
mod folder;
mod node;
mod provider;
mod user;

pub use entry::{storage_resolution_url, FileEntry, OSF_STORAGE, STORAGE_PATHS};
pub use file::File;
pub use folder::{Folder, ListOptions};
pub use node::{Node, NodeAttributes};
pub use provider::Provider;
pub use user::User;

// Verify resources are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Node>();
    assert_send_sync::<Provider>();
    assert_send_sync::<Folder>();
    assert_send_sync::<File>();
    assert_send_sync::<FileEntry>();
    assert_send_sync::<User>();
};
