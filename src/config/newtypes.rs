//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use reqwest::Url;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API base URL.
///
/// The URL must be absolute and use the `http` or `https` scheme. It is
/// normalized to end with a `/` so that relative resource paths join onto it
/// the same way a browser would resolve them.
///
/// # Serialization
///
/// `ApiBaseUrl` serializes to and deserializes from the normalized URL string:
///
/// ```rust
/// use osf_client::ApiBaseUrl;
///
/// let url = ApiBaseUrl::new("https://api.osf.io").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://api.osf.io/""#);
/// ```
///
/// # Example
///
/// ```rust
/// use osf_client::ApiBaseUrl;
///
/// let url = ApiBaseUrl::new("https://api.test.osf.io/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.test.osf.io/");
/// assert_eq!(url.join("/v2/nodes/").unwrap().as_str(), "https://api.test.osf.io/v2/nodes/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL cannot be parsed or
    /// does not use an http(s) scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();

        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };

        let parsed =
            Url::parse(&normalized).map_err(|_| ConfigError::InvalidBaseUrl { url: raw.clone() })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl { url: raw });
        }

        Ok(Self(parsed))
    }

    /// Resolves `path` against this base URL.
    ///
    /// Relative paths are joined onto the base; absolute URLs (such as the
    /// links returned by the API) replace it entirely.
    ///
    /// Returns `None` if `path` cannot be resolved into a valid URL.
    #[must_use]
    pub fn join(&self, path: &str) -> Option<Url> {
        self.0.join(path).ok()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for ApiBaseUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiBaseUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated OSF access token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output so it never ends up in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `AccessToken(*****)` instead of the actual token. There is deliberately
/// no `Display` implementation.
///
/// # Example
///
/// ```rust
/// use osf_client::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// assert_eq!(token.expose(), "my-token");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }

    /// Returns the raw token value.
    ///
    /// Only use this to attach the token to an outgoing request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}
