//! Configuration types for the OSF client.
//!
//! This module provides the configuration used to construct a
//! [`Session`](crate::Session).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`OsfConfig`]: The configuration struct holding all transport settings
//! - [`OsfConfigBuilder`]: A builder for constructing [`OsfConfig`] instances
//! - [`ApiBaseUrl`]: A validated API base URL
//! - [`AccessToken`]: A validated access token with masked debug output
//! - [`ApiVersion`]: The API version to negotiate
//! - [`VersionStrategy`]: How the version is attached to requests
//!
//! # Example
//!
//! ```rust
//! use osf_client::{AccessToken, ApiBaseUrl, ApiVersion, Credential, OsfConfig};
//!
//! let config = OsfConfig::builder()
//!     .api_base_url(ApiBaseUrl::new("https://api.osf.io/").unwrap())
//!     .api_version(ApiVersion::new(2, 8))
//!     .credential(Credential::bearer(AccessToken::new("token").unwrap()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version().to_string(), "2.8");
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{AccessToken, ApiBaseUrl};
pub use version::{ApiVersion, VersionStrategy};

use crate::auth::Credential;
use crate::error::ConfigError;

/// Configuration for a [`Session`](crate::Session).
///
/// Holds the transport settings shared by every request a session issues:
/// where the API lives, which version to speak, the default credential, and
/// the optional robustness limits.
///
/// # Thread Safety
///
/// `OsfConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct OsfConfig {
    api_base_url: ApiBaseUrl,
    api_version: ApiVersion,
    version_strategy: VersionStrategy,
    credential: Option<Credential>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    max_throttle_retries: Option<u32>,
}

impl OsfConfig {
    /// Creates a new builder for constructing an `OsfConfig`.
    #[must_use]
    pub fn builder() -> OsfConfigBuilder {
        OsfConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base_url(&self) -> &ApiBaseUrl {
        &self.api_base_url
    }

    /// Returns the default API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns how the API version is attached to requests.
    #[must_use]
    pub const fn version_strategy(&self) -> VersionStrategy {
        self.version_strategy
    }

    /// Returns the default credential, if configured.
    #[must_use]
    pub const fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the default per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the maximum number of consecutive 429 retries, if capped.
    ///
    /// `None` means throttled requests are retried until the server stops
    /// answering 429.
    #[must_use]
    pub const fn max_throttle_retries(&self) -> Option<u32> {
        self.max_throttle_retries
    }
}

// Verify OsfConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OsfConfig>();
};

/// Builder for constructing [`OsfConfig`] instances.
///
/// The only required field is `api_base_url`.
///
/// # Defaults
///
/// - `api_version`: `2.6`
/// - `version_strategy`: [`VersionStrategy::QueryParameter`]
/// - `credential`: `None` (anonymous requests)
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None`
/// - `max_throttle_retries`: `None` (unbounded)
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use osf_client::{ApiBaseUrl, OsfConfig, VersionStrategy};
///
/// let config = OsfConfig::builder()
///     .api_base_url(ApiBaseUrl::new("https://api.test.osf.io").unwrap())
///     .version_strategy(VersionStrategy::AcceptHeader)
///     .user_agent_prefix("MyLab/1.0")
///     .timeout(Duration::from_secs(30))
///     .max_throttle_retries(5)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct OsfConfigBuilder {
    api_base_url: Option<ApiBaseUrl>,
    api_version: Option<ApiVersion>,
    version_strategy: Option<VersionStrategy>,
    credential: Option<Credential>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    max_throttle_retries: Option<u32>,
}

impl OsfConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn api_base_url(mut self, url: ApiBaseUrl) -> Self {
        self.api_base_url = Some(url);
        self
    }

    /// Sets the default API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets how the API version is attached to requests.
    #[must_use]
    pub const fn version_strategy(mut self, strategy: VersionStrategy) -> Self {
        self.version_strategy = Some(strategy);
        self
    }

    /// Sets the default credential used when a call does not supply one.
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the default per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Caps the number of consecutive 429 retries for a single request.
    #[must_use]
    pub const fn max_throttle_retries(mut self, retries: u32) -> Self {
        self.max_throttle_retries = Some(retries);
        self
    }

    /// Builds the [`OsfConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_base_url` is not set.
    pub fn build(self) -> Result<OsfConfig, ConfigError> {
        let api_base_url = self.api_base_url.ok_or(ConfigError::MissingRequiredField {
            field: "api_base_url",
        })?;

        Ok(OsfConfig {
            api_base_url,
            api_version: self.api_version.unwrap_or_default(),
            version_strategy: self.version_strategy.unwrap_or_default(),
            credential: self.credential,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            max_throttle_retries: self.max_throttle_retries,
        })
    }
}
