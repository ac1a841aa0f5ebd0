//! OSF API version definitions.
//!
//! This module provides the [`ApiVersion`] type for negotiating which version
//! of the API the server should speak, and [`VersionStrategy`] for choosing
//! how that version is sent.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// OSF API version in `MAJOR.MINOR` form.
///
/// The OSF API versions its JSON:API representation with minor releases
/// (`2.0`, `2.1`, ... `2.20`). Any well-formed version is accepted; the
/// server rejects versions it does not know.
///
/// # Example
///
/// ```rust
/// use osf_client::ApiVersion;
///
/// let version: ApiVersion = "2.8".parse().unwrap();
/// assert_eq!(version, ApiVersion::new(2, 8));
/// assert_eq!(version.to_string(), "2.8");
/// assert!(ApiVersion::new(2, 10) > ApiVersion::new(2, 9));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion {
    major: u16,
    minor: u16,
}

impl ApiVersion {
    /// Creates a version from its parts.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Returns the version used when none is configured (`2.6`).
    #[must_use]
    pub const fn default_version() -> Self {
        Self::new(2, 6)
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(&self) -> u16 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(&self) -> u16 {
        self.minor
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::default_version()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ConfigError::InvalidApiVersion {
            version: trimmed.to_string(),
        };

        let (major, minor) = trimmed.split_once('.').ok_or_else(invalid)?;
        let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(major) || !all_digits(minor) {
            return Err(invalid());
        }

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

/// How the API version is attached to outgoing requests.
///
/// The OSF API accepts either form. Whichever strategy is configured, it is
/// applied to every request whose caller did not already supply a `version`
/// query parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VersionStrategy {
    /// Send `?version=X.Y`.
    #[default]
    QueryParameter,
    /// Send `Accept-Header: application/vnd.api+json;version=X.Y`.
    AcceptHeader,
}
