//! Request types for the OSF client.
//!
//! This module provides [`JsonApiRequest`] and its builder, the
//! [`HttpMethod`] and [`RequestBody`] enums, and [`CallOptions`], the
//! per-call configuration threaded through every resource operation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde_json::{json, Map, Value};

use crate::auth::Credential;
use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the OSF API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and storage actions.
    Post,
    /// HTTP PUT method for uploads and folder creation.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the equivalent `reqwest` method.
    #[must_use]
    pub const fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(InvalidHttpRequestError::UnsupportedHttpMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// The body sent with a request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    /// No body at all.
    #[default]
    None,
    /// A JSON:API envelope: `{"data": {"attributes"?, "id"?, "type"?}}`.
    JsonApi(Value),
    /// Raw bytes, sent untouched (file contents, storage actions).
    Raw(Vec<u8>),
}

impl RequestBody {
    /// Returns the bytes to put on the wire, if any.
    #[must_use]
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::None => None,
            Self::JsonApi(value) => Some(value.to_string().into_bytes()),
            Self::Raw(bytes) => Some(bytes.clone()),
        }
    }

    /// Returns `true` if no body will be sent.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Per-call configuration for resource operations.
///
/// Every value here overrides the corresponding [`Session`](crate::Session)
/// default for a single call. `CallOptions::default()` means "use the
/// session defaults, retry on 429, single page".
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use osf_client::CallOptions;
///
/// let options = CallOptions::new()
///     .query_param("filter[title]", "Pilot")
///     .timeout(Duration::from_secs(10))
///     .retrieve_all(true);
///
/// assert!(options.retry);
/// assert_eq!(options.query.get("filter[title]").map(String::as_str), Some("Pilot"));
/// ```
#[derive(Clone, Debug)]
pub struct CallOptions {
    /// Query parameters added to the request.
    pub query: HashMap<String, String>,
    /// Extra headers; these win over the session's base headers.
    pub headers: HashMap<String, String>,
    /// Credential overriding the session default.
    pub auth: Option<Credential>,
    /// Whether to wait and resend when the server answers 429.
    pub retry: bool,
    /// Timeout overriding the session default.
    pub timeout: Option<Duration>,
    /// Whether GET requests follow `links.next` and merge every page.
    pub retrieve_all: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            query: HashMap::new(),
            headers: HashMap::new(),
            auth: None,
            retry: true,
            timeout: None,
            retrieve_all: false,
        }
    }
}

impl CallOptions {
    /// Creates options that use every session default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the credential for this call.
    #[must_use]
    pub fn auth(mut self, credential: Credential) -> Self {
        self.auth = Some(credential);
        self
    }

    /// Enables or disables waiting out 429 responses.
    #[must_use]
    pub const fn retry(mut self, retry: bool) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the timeout for this call.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables or disables following pagination links on GET.
    #[must_use]
    pub const fn retrieve_all(mut self, retrieve_all: bool) -> Self {
        self.retrieve_all = retrieve_all;
        self
    }

    /// Returns a copy of these options with `extra` merged into the query,
    /// `extra` winning on conflict.
    #[must_use]
    pub fn with_query(&self, extra: &[(&str, &str)]) -> Self {
        let mut options = self.clone();
        for (key, value) in extra {
            options.query.insert((*key).to_string(), (*value).to_string());
        }
        options
    }

    /// Returns a copy of these options with no query parameters and
    /// pagination off, for follow-up requests to a different endpoint.
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self {
            query: HashMap::new(),
            retrieve_all: false,
            ..self.clone()
        }
    }
}

/// A single JSON:API request.
///
/// Use [`JsonApiRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use osf_client::clients::{HttpMethod, JsonApiRequest, RequestBody};
/// use serde_json::json;
///
/// let request = JsonApiRequest::builder(HttpMethod::Post, "/v2/nodes/")
///     .item_type("nodes")
///     .attributes(json!({"title": "Pilot", "category": "project"}).as_object().unwrap().clone())
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     request.body,
///     RequestBody::JsonApi(json!({
///         "data": {"type": "nodes", "attributes": {"title": "Pilot", "category": "project"}}
///     }))
/// );
/// ```
#[derive(Clone, Debug)]
pub struct JsonApiRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The URL, absolute or relative to the API base URL.
    pub url: String,
    /// The resolved request body.
    pub body: RequestBody,
    /// Query parameters to append to the URL.
    pub query: HashMap<String, String>,
    /// Additional headers to include in the request.
    pub extra_headers: HashMap<String, String>,
    /// Whether to wait and resend on 429.
    pub retry: bool,
    /// Credential overriding the session default.
    pub auth: Option<Credential>,
    /// Timeout overriding the session default.
    pub timeout: Option<Duration>,
}

impl JsonApiRequest {
    /// Creates a new builder for constructing a `JsonApiRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> JsonApiRequestBuilder {
        JsonApiRequestBuilder::new(method, url)
    }

    /// Creates a builder from a method name such as `"get"` or `"PATCH"`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::UnsupportedHttpMethod`] for any
    /// method other than GET/POST/PUT/PATCH/DELETE.
    pub fn builder_for(
        method: &str,
        url: impl Into<String>,
    ) -> Result<JsonApiRequestBuilder, InvalidHttpRequestError> {
        Ok(JsonApiRequestBuilder::new(method.parse()?, url))
    }

    /// Returns `true` if the caller supplied a `version` query parameter.
    #[must_use]
    pub fn has_version_param(&self) -> bool {
        self.query.get("version").is_some_and(|v| !v.is_empty())
    }
}

/// Builder for constructing [`JsonApiRequest`] instances.
#[derive(Debug)]
pub struct JsonApiRequestBuilder {
    http_method: HttpMethod,
    url: String,
    item_id: Option<String>,
    item_type: Option<String>,
    attributes: Option<Map<String, Value>>,
    raw_body: Option<Vec<u8>>,
    query: HashMap<String, String>,
    extra_headers: HashMap<String, String>,
    retry: bool,
    auth: Option<Credential>,
    timeout: Option<Duration>,
}

impl JsonApiRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            item_id: None,
            item_type: None,
            attributes: None,
            raw_body: None,
            query: HashMap::new(),
            extra_headers: HashMap::new(),
            retry: true,
            auth: None,
            timeout: None,
        }
    }

    /// Sets `data.id` in the JSON:API envelope.
    #[must_use]
    pub fn item_id(mut self, id: impl Into<String>) -> Self {
        self.item_id = Some(id.into());
        self
    }

    /// Sets `data.type` in the JSON:API envelope.
    #[must_use]
    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Sets `data.attributes` in the JSON:API envelope.
    #[must_use]
    pub fn attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Sends `body` as-is instead of a JSON:API envelope.
    ///
    /// An empty body suppresses the request body entirely.
    #[must_use]
    pub fn raw_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    /// Sends no body at all, even if envelope fields are set.
    #[must_use]
    pub fn empty_body(self) -> Self {
        self.raw_body(Vec::<u8>::new())
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Enables or disables waiting out 429 responses.
    #[must_use]
    pub const fn retry(mut self, retry: bool) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the credential for this request.
    #[must_use]
    pub fn auth(mut self, credential: Credential) -> Self {
        self.auth = Some(credential);
        self
    }

    /// Sets the timeout for this request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Applies per-call options: query and headers are merged in, the
    /// credential, retry flag, and timeout are taken from `options`.
    #[must_use]
    pub fn options(mut self, options: &CallOptions) -> Self {
        self.query
            .extend(options.query.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.extra_headers
            .extend(options.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        if options.auth.is_some() {
            self.auth.clone_from(&options.auth);
        }
        if options.timeout.is_some() {
            self.timeout = options.timeout;
        }
        self.retry = options.retry;
        self
    }

    /// Builds the [`JsonApiRequest`], resolving the body.
    ///
    /// Body rules:
    /// - raw body set and empty: no body
    /// - raw body set: the raw bytes
    /// - otherwise, if any of attributes/id/type is set: the JSON:API envelope
    /// - otherwise: no body
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidUrl`] if the URL is empty.
    pub fn build(self) -> Result<JsonApiRequest, InvalidHttpRequestError> {
        if self.url.trim().is_empty() {
            return Err(InvalidHttpRequestError::InvalidUrl { url: self.url });
        }

        let body = match self.raw_body {
            Some(raw) if raw.is_empty() => RequestBody::None,
            Some(raw) => RequestBody::Raw(raw),
            None => envelope(self.attributes, self.item_id, self.item_type),
        };

        Ok(JsonApiRequest {
            http_method: self.http_method,
            url: self.url,
            body,
            query: self.query,
            extra_headers: self.extra_headers,
            retry: self.retry,
            auth: self.auth,
            timeout: self.timeout,
        })
    }
}

fn envelope(
    attributes: Option<Map<String, Value>>,
    item_id: Option<String>,
    item_type: Option<String>,
) -> RequestBody {
    if attributes.is_none() && item_id.is_none() && item_type.is_none() {
        return RequestBody::None;
    }

    let mut data = Map::new();
    if let Some(attributes) = attributes {
        data.insert("attributes".to_string(), Value::Object(attributes));
    }
    if let Some(id) = item_id {
        data.insert("id".to_string(), Value::String(id));
    }
    if let Some(item_type) = item_type {
        data.insert("type".to_string(), Value::String(item_type));
    }

    RequestBody::JsonApi(json!({ "data": data }))
}
