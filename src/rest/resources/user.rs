//! User accounts.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{CallOptions, HttpMethod, Session};
use crate::rest::{ApiResource, ResourceData, ResourceError, ResourceOperation, ResourcePath};

/// A user account.
///
/// A user with no id or link resolves to the account the session's
/// credential belongs to.
///
/// # Example
///
/// ```rust,ignore
/// let mut me = User::new(Arc::clone(&session));
/// me.get(&CallOptions::default()).await?;
/// println!("{:?}", me.full_name());
/// ```
#[derive(Debug, Clone)]
pub struct User {
    session: Arc<Session>,
    data: ResourceData,
    self_link: Option<String>,
}

impl User {
    /// Creates a handle on the current user.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            data: ResourceData::new(Self::TYPE),
            self_link: None,
        }
    }

    /// Creates a handle on the user with id `id`.
    #[must_use]
    pub fn with_id(session: Arc<Session>, id: impl Into<String>) -> Self {
        let mut user = Self::new(session);
        user.data.id = Some(id.into());
        user
    }

    /// Creates a handle on the user at `url`.
    #[must_use]
    pub fn with_self_link(session: Arc<Session>, url: impl Into<String>) -> Self {
        let mut user = Self::new(session);
        user.self_link = Some(url.into());
        user
    }

    /// Creates a user from a JSON:API document.
    #[must_use]
    pub fn from_document(session: Arc<Session>, document: &Value) -> Self {
        let mut user = Self::new(session);
        user.update_from_document(document);
        user
    }

    /// `attributes.full_name`
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.data.attributes.get_str("full_name")
    }

    /// Fetches the user: the link given at construction, else the `self`
    /// link, else `v2/users/{id}/`, else the current user.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get(&mut self, options: &CallOptions) -> Result<(), ResourceError> {
        let url = self.locate(self.self_link.as_deref())?;
        self.fetch_into(&url, options).await
    }
}

impl ApiResource for User {
    const NAME: &'static str = "User";
    const TYPE: &'static str = "users";
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &[], "v2/users/me/"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "v2/users/{id}/"),
    ];

    fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn data(&self) -> &ResourceData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ResourceData {
        &mut self.data
    }
}
