//! Credentials attached to outgoing requests.

use std::fmt;
use std::sync::Arc;

use crate::config::AccessToken;

/// Signs an outgoing request.
///
/// Implement this to plug an external OAuth2 library (or any other scheme)
/// into the client. The signer receives the fully built request builder and
/// returns it with its credentials attached.
///
/// Implementations must not log the secret material they attach.
pub trait RequestSigner: Send + Sync + fmt::Debug {
    /// Attaches credentials to `request`.
    fn sign(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder;
}

/// A credential used to authenticate requests.
///
/// A credential can be configured once on the [`OsfConfig`](crate::OsfConfig)
/// and overridden per call through [`CallOptions`](crate::CallOptions).
///
/// # Security
///
/// The `Debug` implementation never prints secrets.
///
/// # Example
///
/// ```rust
/// use osf_client::{AccessToken, Credential};
///
/// let personal = Credential::bearer(AccessToken::new("pat").unwrap());
/// let oauth = Credential::oauth2(AccessToken::new("oauth-access-token").unwrap());
/// let basic = Credential::basic("user@example.com", AccessToken::new("pw").unwrap());
///
/// assert_eq!(format!("{basic:?}"), "Credential::Basic(user@example.com, *****)");
/// # let _ = (personal, oauth);
/// ```
#[derive(Clone)]
pub enum Credential {
    /// A personal access token or an OAuth2 access token, sent as
    /// `Authorization: Bearer <token>`.
    Bearer(AccessToken),
    /// HTTP basic credentials.
    Basic {
        /// The account user name (usually an email address).
        username: String,
        /// The account password.
        password: AccessToken,
    },
    /// A caller-supplied signer.
    Signer(Arc<dyn RequestSigner>),
}

impl Credential {
    /// Creates a bearer credential from a personal access token.
    #[must_use]
    pub const fn bearer(token: AccessToken) -> Self {
        Self::Bearer(token)
    }

    /// Creates a credential from an OAuth2 access token.
    ///
    /// OSF accepts OAuth2 access tokens with the same bearer scheme as
    /// personal access tokens.
    #[must_use]
    pub const fn oauth2(access_token: AccessToken) -> Self {
        Self::Bearer(access_token)
    }

    /// Creates an HTTP basic credential.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: AccessToken) -> Self {
        Self::Basic {
            username: username.into(),
            password,
        }
    }

    /// Wraps a custom [`RequestSigner`].
    #[must_use]
    pub fn signer(signer: impl RequestSigner + 'static) -> Self {
        Self::Signer(Arc::new(signer))
    }

    /// Attaches this credential to `request`.
    #[must_use]
    pub fn sign(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Bearer(token) => request.bearer_auth(token.expose()),
            Self::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose()))
            }
            Self::Signer(signer) => signer.sign(request),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Credential::Bearer(*****)"),
            Self::Basic { username, .. } => write!(f, "Credential::Basic({username}, *****)"),
            Self::Signer(signer) => write!(f, "Credential::Signer({signer:?})"),
        }
    }
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};
