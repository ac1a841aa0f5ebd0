//! Nodes: projects and components.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{CallOptions, HttpMethod, Session};
use crate::rest::resources::Provider;
use crate::rest::{
    collect_attributes, ApiResource, ResourceData, ResourceError, ResourceOperation, ResourcePath,
};

/// Attributes used to create a node.
///
/// Unset optional fields are not sent. `extra` carries any other
/// server-defined attribute.
///
/// # Example
///
/// ```rust
/// use osf_client::rest::resources::NodeAttributes;
///
/// let attributes = NodeAttributes::new("Pilot study")
///     .description("Data for the pilot")
///     .public(false)
///     .tags(["pilot", "2024"]);
///
/// assert_eq!(attributes.category, "project");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// The node title.
    pub title: String,
    /// The node category.
    #[serde(default = "default_category")]
    pub category: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the node is publicly visible.
    #[serde(default)]
    pub public: Option<bool>,
    /// Tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Id of a node to use as a template.
    #[serde(default)]
    pub template_from: Option<String>,
    /// Any other attribute.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_category() -> String {
    "project".to_string()
}

impl NodeAttributes {
    /// Creates attributes for a project titled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: default_category(),
            description: None,
            public: None,
            tags: None,
            template_from: None,
            extra: Map::new(),
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the visibility.
    #[must_use]
    pub const fn public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the template node.
    #[must_use]
    pub fn template_from(mut self, node_id: impl Into<String>) -> Self {
        self.template_from = Some(node_id.into());
        self
    }

    /// Adds another attribute.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Serializes the attributes for a request body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if an extra value cannot be
    /// serialized.
    pub fn to_request_attributes(&self) -> Result<Map<String, Value>, ResourceError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(collect_attributes(map)),
            _ => Ok(Map::new()),
        }
    }
}

/// A node: a project or one of its components.
///
/// # Example
///
/// ```rust,ignore
/// use osf_client::rest::resources::{Node, NodeAttributes};
///
/// let mut node = Node::new(Arc::clone(&session));
/// node.create(&NodeAttributes::new("Pilot"), &CallOptions::default()).await?;
///
/// let providers = node.get_providers(&CallOptions::default()).await?;
/// for provider in &providers {
///     println!("{}", provider.provider_name());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    session: Arc<Session>,
    data: ResourceData,
    self_link: Option<String>,
    providers: Vec<Provider>,
}

impl Node {
    /// Creates a Transient node.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            data: ResourceData::new(Self::TYPE),
            self_link: None,
            providers: Vec::new(),
        }
    }

    /// Creates a handle on the node with id `id`. Nothing is fetched.
    #[must_use]
    pub fn with_id(session: Arc<Session>, id: impl Into<String>) -> Self {
        let mut node = Self::new(session);
        node.data.id = Some(id.into());
        node
    }

    /// Creates a handle on the node at `url`. Nothing is fetched.
    #[must_use]
    pub fn with_self_link(session: Arc<Session>, url: impl Into<String>) -> Self {
        let mut node = Self::new(session);
        node.self_link = Some(url.into());
        node
    }

    /// Creates a node from a JSON:API document.
    #[must_use]
    pub fn from_document(session: Arc<Session>, document: &Value) -> Self {
        let mut node = Self::new(session);
        node.update_from_document(document);
        node
    }

    /// `attributes.title`
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.data.title()
    }

    /// `attributes.category`
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.data.category()
    }

    /// `attributes.description`
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.data.attributes.get_str("description")
    }

    /// `attributes.public`
    #[must_use]
    pub fn is_public(&self) -> Option<bool> {
        self.data.attributes.get_bool("public")
    }

    /// Fetches the node.
    ///
    /// The URL is the link given at construction, else the `self` link,
    /// else `v2/nodes/{id}/`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLocator`] if none is available, or
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get(&mut self, options: &CallOptions) -> Result<(), ResourceError> {
        let url = self.locate(self.self_link.as_deref())?;
        self.fetch_into(&url, options).await
    }

    /// Creates this node on the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create(
        &mut self,
        attributes: &NodeAttributes,
        options: &CallOptions,
    ) -> Result<(), ResourceError> {
        let url = self.resolve_path(ResourceOperation::Create)?;
        let attributes = attributes.to_request_attributes()?;

        let response = self.session.post(&url, Self::TYPE, attributes, options).await?;
        if let Some(document) = response {
            self.update_from_document(&document);
        }
        Ok(())
    }

    /// Creates a component under this node and returns it. This node is
    /// not modified.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] if the `children`
    /// relationship is not loaded, or [`ResourceError::Http`] if the
    /// request fails.
    pub async fn create_child(
        &self,
        attributes: &NodeAttributes,
        options: &CallOptions,
    ) -> Result<Self, ResourceError> {
        let url = self.require_related("children")?;
        let attributes = attributes.to_request_attributes()?;

        let mut child = Self::new(Arc::clone(&self.session));
        let response = self.session.post(&url, Self::TYPE, attributes, options).await?;
        if let Some(document) = response {
            child.update_from_document(&document);
        }
        Ok(child)
    }

    /// Deletes the node. A Transient node is left alone and no request is
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn delete(&mut self, options: &CallOptions) -> Result<(), ResourceError> {
        if !self.is_persisted() {
            return Ok(());
        }
        let url = self.locate(self.self_link.as_deref())?;
        self.session.delete(&url, options).await?;
        self.data.id = None;
        Ok(())
    }

    /// Fetches the node if its relationships are not loaded yet.
    ///
    /// # Errors
    ///
    /// See [`Node::get`].
    pub async fn ensure_relationships(&mut self, options: &CallOptions) -> Result<(), ResourceError> {
        if self.data.relationships.is_empty() {
            self.get(&options.without_query()).await?;
        }
        Ok(())
    }

    /// Lists the node's storage providers.
    ///
    /// Each call returns a fresh list; [`Node::providers`] is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingLink`] if the node has no `files`
    /// relationship, or [`ResourceError::Http`] if a request fails.
    pub async fn get_providers(&mut self, options: &CallOptions) -> Result<Vec<Provider>, ResourceError> {
        self.ensure_relationships(options).await?;
        let url = self.require_related("files")?;

        let providers = self
            .session
            .get(&url, options)
            .await?
            .and_then(|document| document.get("data").and_then(Value::as_array).cloned())
            .unwrap_or_default()
            .iter()
            .map(|item| Provider::from_document(Arc::clone(&self.session), item))
            .collect();

        Ok(providers)
    }

    /// Lists the node's storage providers and appends them to the cached
    /// list, which is returned.
    ///
    /// Repeated calls accumulate; nothing is deduplicated.
    ///
    /// # Errors
    ///
    /// See [`Node::get_providers`].
    pub async fn extend_provider_cache(&mut self, options: &CallOptions) -> Result<&[Provider], ResourceError> {
        let providers = self.get_providers(options).await?;
        self.providers.extend(providers);
        Ok(&self.providers)
    }

    /// Returns the cached providers.
    #[must_use]
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }
}

impl ApiResource for Node {
    const NAME: &'static str = "Node";
    const TYPE: &'static str = "nodes";
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "v2/nodes/"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "v2/nodes/{id}/"),
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
