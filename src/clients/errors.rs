//! HTTP-specific error types for the OSF client.
//!
//! This module contains error types for request dispatch, including response
//! errors, retry exhaustion, pre-flight validation failures, and transport
//! failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: The server answered with a status of 400 or more
//!   (other than a retried 429). Never retried.
//! - [`MaxHttpRetriesExceededError`]: A configured throttle retry cap was hit
//! - [`InvalidHttpRequestError`]: The request failed validation before any I/O
//! - [`HttpError`]: Unified error type encompassing all of the above plus
//!   transport failures
//!
//! A 429 received with retry disabled is not an error: the dispatcher logs it
//! and returns no content.
//!
//! # Example
//!
//! ```rust,ignore
//! use osf_client::HttpError;
//!
//! match session.get("/v2/nodes/abc12/", &CallOptions::default()).await {
//!     Ok(Some(document)) => println!("{document}"),
//!     Ok(None) => println!("no content"),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.body),
//!     Err(HttpError::Network(e)) => println!("transport failure: {e}"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the server answers with an error status.
///
/// Carries the status code and the raw response body.
///
/// # Example
///
/// ```rust
/// use osf_client::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 403,
///     body: r#"{"errors":[{"detail":"You do not have permission."}]}"#.to_string(),
/// };
///
/// assert!(error.to_string().starts_with("Status code 403."));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Status code {code}. {body}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
}

impl HttpResponseError {
    /// Returns the `detail` messages of a JSON:API `errors` array, if the
    /// body contains one.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|body| body.get("errors").and_then(|e| e.as_array()).cloned())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.get("detail").and_then(|d| d.as_str()))
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Error returned when the configured throttle retry cap is exhausted.
///
/// Only produced when [`OsfConfig::max_throttle_retries`](crate::OsfConfig::max_throttle_retries)
/// is set; by default throttled requests are retried without bound.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Exceeded maximum retry count of {retries}. Last status: {code}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of retries that were attempted.
    pub retries: u32,
}

/// Error returned when a request fails validation before being sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not one of GET/POST/PUT/PATCH/DELETE.
    #[error("Only GET/POST/PUT/PATCH/DELETE supported, not {method}")]
    UnsupportedHttpMethod {
        /// The method that was provided.
        method: String,
    },

    /// The URL cannot be resolved against the API base URL.
    #[error("Invalid request URL '{url}'")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
    },
}

/// Unified error type for all dispatch errors.
///
/// Use pattern matching to handle specific error types.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with an error status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Throttle retries exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network, connection, or timeout failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns `true` if the error is a transport-level timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }
}
