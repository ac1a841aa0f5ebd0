//! Error types for the OSF client.
//!
//! This module contains the error type used for configuration and
//! validation failures. Request and resource errors live next to the code
//! that produces them ([`crate::clients::HttpError`] and
//! [`crate::rest::ResourceError`]).
//!
//! # Example
//!
//! ```rust
//! use osf_client::{ApiBaseUrl, ConfigError};
//!
//! let result = ApiBaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// Every configuration constructor validates its input and returns one of
/// these variants on failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is not an absolute http(s) URL.
    #[error("Invalid API base URL '{url}'. Expected an absolute URL such as 'https://api.osf.io/'.")]
    InvalidBaseUrl {
        /// The URL that was provided.
        url: String,
    },

    /// The API version is not in `MAJOR.MINOR` form.
    #[error("Invalid API version '{version}'. Expected format: 'MAJOR.MINOR' (e.g., '2.6').")]
    InvalidApiVersion {
        /// The version string that was provided.
        version: String,
    },

    /// An access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid OSF personal access token.")]
    EmptyAccessToken,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
