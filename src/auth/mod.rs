//! Authentication types for the OSF client.
//!
//! This module attaches credentials to outgoing requests. Token acquisition
//! (the OAuth2 authorization flow, token refresh) is out of scope: callers
//! bring a token they already hold, or plug in their own [`RequestSigner`].
//!
//! # Overview
//!
//! - [`Credential`]: A bearer token, an OAuth2 access token, HTTP basic
//!   credentials, or a custom signer
//! - [`RequestSigner`]: The seam used to sign a request with a custom scheme
//! - [`combine_headers`]: Merges two optional header maps
//!
//! # Example
//!
//! ```rust
//! use osf_client::{AccessToken, Credential};
//!
//! let credential = Credential::bearer(AccessToken::new("personal-token").unwrap());
//! // The token never shows up in debug output
//! assert!(!format!("{credential:?}").contains("personal-token"));
//! ```

mod credential;
mod headers;

pub use credential::{Credential, RequestSigner};
pub use headers::combine_headers;
