//! Resource-level error types.
//!
//! Resource operations fail either because the dispatcher failed (wrapped
//! in [`ResourceError::Http`]) or because the resource itself cannot carry
//! out the operation in its current state.
//!
//! # Example
//!
//! ```rust,ignore
//! use osf_client::rest::ResourceError;
//!
//! match folder.download(&CallOptions::default()).await {
//!     Err(ResourceError::UnsupportedMethod { .. }) => println!("folders cannot be downloaded"),
//!     Err(ResourceError::Http(e)) if e.status() == Some(404) => println!("gone"),
//!     Err(e) => println!("{e}"),
//!     Ok(bytes) => println!("{} bytes", bytes.map_or(0, |b| b.len())),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, InvalidHttpRequestError};

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use osf_client::rest::ResourceError;
///
/// let error = ResourceError::UnsupportedMethod {
///     resource: "folder",
///     operation: "download",
/// };
/// assert_eq!(error.to_string(), "Cannot download a folder");
///
/// let error = ResourceError::MissingLocator { resource: "Node" };
/// assert!(error.to_string().contains("Node"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The operation is not valid for this kind of resource.
    #[error("Cannot {operation} a {resource}")]
    UnsupportedMethod {
        /// The kind of resource (e.g., "folder").
        resource: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// `get()` was called with no override URL, self link, or id.
    #[error("No url or id to get {resource}. Set the id or self link then try to get.")]
    MissingLocator {
        /// The type name of the resource.
        resource: &'static str,
    },

    /// An operation needs a link the resource has not loaded.
    #[error("{resource} has no '{link}' link; fetch it first")]
    MissingLink {
        /// The type name of the resource.
        resource: &'static str,
        /// The link or relationship that was missing.
        link: String,
    },

    /// No URL template matches the available ids.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The server answered with something that is not the expected document.
    #[error("Malformed {resource} document: {reason}")]
    MalformedDocument {
        /// The type name of the resource.
        resource: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Attributes could not be serialized into a request body.
    #[error("Failed to serialize attributes: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The dispatcher failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the HTTP status code if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the server reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404 | 410))
    }

    pub(crate) fn missing_link(resource: &'static str, link: impl Into<String>) -> Self {
        Self::MissingLink {
            resource,
            link: link.into(),
        }
    }
}

impl From<InvalidHttpRequestError> for ResourceError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(error.into())
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
