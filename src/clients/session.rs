//! The request dispatcher.
//!
//! [`Session`] builds and sends every request the crate issues. It applies
//! version negotiation, attaches credentials, waits out throttling, turns
//! error statuses into [`HttpError`]s, decodes JSON bodies, and accumulates
//! paginated collections.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde_json::{Map, Value};

use crate::auth::combine_headers;
use crate::clients::errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::{CallOptions, HttpMethod, JsonApiRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{OsfConfig, VersionStrategy};

/// Wait in seconds when a 429 carries no usable `Retry-After` header.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Media type sent on every request.
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Header used by [`VersionStrategy::AcceptHeader`].
pub const VERSION_HEADER: &str = "Accept-Header";

/// Transport configuration and telemetry shared by every resource.
///
/// A session owns no resource state. Resources hold it as an
/// `Arc<Session>`, so one session can back any number of resources driven
/// from concurrent tasks. The request and error counters are the only
/// mutable state and are atomics.
///
/// # Throttling
///
/// On a 429 with retry enabled, the session sleeps for the advertised
/// `Retry-After` seconds (1 second if absent) and resends the same request.
/// Repeated 429s repeat the wait until another status arrives, unless
/// [`OsfConfig::max_throttle_retries`] caps the loop. With retry disabled
/// the condition is logged and the call returns `Ok(None)`.
///
/// # Example
///
/// ```rust,ignore
/// use osf_client::{ApiBaseUrl, CallOptions, OsfConfig, Session};
///
/// let config = OsfConfig::builder()
///     .api_base_url(ApiBaseUrl::new("https://api.osf.io/")?)
///     .build()?;
/// let session = Session::new(config)?;
///
/// let nodes = session
///     .get("v2/nodes/", &CallOptions::new().retrieve_all(true))
///     .await?;
/// ```
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
    config: OsfConfig,
    default_headers: HashMap<String, String>,
    request_count: AtomicU64,
    error_count: AtomicU64,
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

impl Session {
    /// Creates a session from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying HTTP client cannot
    /// be initialised (for example, TLS backend failure).
    pub fn new(config: OsfConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}osf-client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert(
            "Content-Type".to_string(),
            JSON_API_CONTENT_TYPE.to_string(),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            config,
            default_headers,
            request_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
        })
    }

    /// Creates a session already wrapped in an [`Arc`], ready to be handed
    /// to resources.
    ///
    /// # Errors
    ///
    /// See [`Session::new`].
    pub fn shared(config: OsfConfig) -> Result<Arc<Self>, HttpError> {
        Self::new(config).map(Arc::new)
    }

    /// Returns the configuration this session was built from.
    #[must_use]
    pub const fn config(&self) -> &OsfConfig {
        &self.config
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Number of responses received that were not error statuses.
    #[must_use]
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Number of transport failures and error statuses seen.
    #[must_use]
    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Resolves `url` against the API base URL.
    ///
    /// Absolute URLs are returned unchanged; anything else is joined onto
    /// the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidUrl`] if the result is not
    /// a valid URL.
    pub fn resolve_url(&self, url: &str) -> Result<Url, InvalidHttpRequestError> {
        if let Ok(absolute) = Url::parse(url) {
            return Ok(absolute);
        }
        self.config
            .api_base_url()
            .join(url)
            .ok_or_else(|| InvalidHttpRequestError::InvalidUrl {
                url: url.to_string(),
            })
    }

    /// Sends `request` and decodes the response body as JSON.
    ///
    /// Returns `Ok(None)` when the body is empty or not JSON, and when a 429
    /// arrives with retry disabled.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidRequest`] if the URL cannot be resolved
    /// - [`HttpError::Response`] for any status of 400 or more other than 429
    /// - [`HttpError::MaxRetries`] if a configured throttle cap is exhausted
    /// - [`HttpError::Network`] for transport failures and timeouts
    pub async fn request(&self, request: JsonApiRequest) -> Result<Option<Value>, HttpError> {
        Ok(self.dispatch(&request).await?.and_then(|r| r.json()))
    }

    /// Sends `request` and returns the undecoded response body.
    ///
    /// Returns `Ok(None)` only when a 429 arrives with retry disabled.
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`].
    pub async fn request_bytes(
        &self,
        request: JsonApiRequest,
    ) -> Result<Option<Vec<u8>>, HttpError> {
        Ok(self.dispatch(&request).await?.map(|r| r.body))
    }

    /// Sends a GET. Follows `links.next` when `options.retrieve_all` is set.
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`].
    pub async fn get(&self, url: &str, options: &CallOptions) -> Result<Option<Value>, HttpError> {
        if options.retrieve_all {
            return self.get_all(url, options).await;
        }
        let request = JsonApiRequest::builder(HttpMethod::Get, url)
            .options(options)
            .build()?;
        self.request(request).await
    }

    /// Sends a GET and accumulates every page of the collection.
    ///
    /// The `data` arrays of all pages are concatenated in page order. Other
    /// top-level keys come from the first page. Follow-up pages reuse the
    /// headers, credential, retry flag, and timeout of `options` but not its
    /// query parameters, which the `next` link already carries.
    ///
    /// A first page whose `data` is not an array is returned unchanged.
    ///
    /// If any page is throttled with retry disabled, the whole call returns
    /// `Ok(None)` rather than a truncated collection.
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`]. An error on any page fails the call.
    pub async fn get_all(
        &self,
        url: &str,
        options: &CallOptions,
    ) -> Result<Option<Value>, HttpError> {
        let first = JsonApiRequest::builder(HttpMethod::Get, url)
            .options(options)
            .build()?;
        let Some(mut document) = self.request(first).await? else {
            return Ok(None);
        };

        let mut data = match document.get("data") {
            Some(Value::Array(items)) => items.clone(),
            _ => return Ok(Some(document)),
        };

        let follow_up = options.without_query();
        let mut next = next_link(&document);
        let mut pages: u32 = 1;

        while let Some(next_url) = next {
            let request = JsonApiRequest::builder(HttpMethod::Get, next_url)
                .options(&follow_up)
                .build()?;
            let Some(response) = self.dispatch(&request).await? else {
                tracing::warn!(pages, "Throttled mid-collection; discarding partial pages");
                return Ok(None);
            };
            let Some(page) = response.json() else {
                break;
            };
            if let Some(Value::Array(items)) = page.get("data") {
                data.extend(items.iter().cloned());
            }
            next = next_link(&page);
            pages += 1;
        }

        tracing::debug!(pages, items = data.len(), "Accumulated paginated collection");

        if let Some(object) = document.as_object_mut() {
            object.insert("data".to_string(), Value::Array(data));
        }
        Ok(Some(document))
    }

    /// Sends a POST with a JSON:API envelope of `item_type` and
    /// `attributes`.
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`].
    pub async fn post(
        &self,
        url: &str,
        item_type: &str,
        attributes: Map<String, Value>,
        options: &CallOptions,
    ) -> Result<Option<Value>, HttpError> {
        let request = JsonApiRequest::builder(HttpMethod::Post, url)
            .item_type(item_type)
            .attributes(attributes)
            .options(options)
            .build()?;
        self.request(request).await
    }

    /// Sends a POST with `body` as a plain JSON document (storage actions).
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`].
    pub async fn post_json(
        &self,
        url: &str,
        body: &Value,
        options: &CallOptions,
    ) -> Result<Option<Value>, HttpError> {
        let request = JsonApiRequest::builder(HttpMethod::Post, url)
            .raw_body(body.to_string())
            .options(options)
            .build()?;
        self.request(request).await
    }

    /// Sends a PUT with `body` as raw bytes. An empty body sends nothing.
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`].
    pub async fn put(
        &self,
        url: &str,
        body: impl Into<Vec<u8>>,
        options: &CallOptions,
    ) -> Result<Option<Value>, HttpError> {
        let request = JsonApiRequest::builder(HttpMethod::Put, url)
            .raw_body(body)
            .options(options)
            .build()?;
        self.request(request).await
    }

    /// Sends a PATCH with a JSON:API envelope.
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`].
    pub async fn patch(
        &self,
        url: &str,
        item_id: &str,
        item_type: &str,
        attributes: Map<String, Value>,
        options: &CallOptions,
    ) -> Result<Option<Value>, HttpError> {
        let request = JsonApiRequest::builder(HttpMethod::Patch, url)
            .item_id(item_id)
            .item_type(item_type)
            .attributes(attributes)
            .options(options)
            .build()?;
        self.request(request).await
    }

    /// Sends a DELETE, discarding any response body.
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`].
    pub async fn delete(&self, url: &str, options: &CallOptions) -> Result<(), HttpError> {
        let request = JsonApiRequest::builder(HttpMethod::Delete, url)
            .options(options)
            .build()?;
        self.dispatch(&request).await?;
        Ok(())
    }

    async fn dispatch(&self, request: &JsonApiRequest) -> Result<Option<HttpResponse>, HttpError> {
        let url = self.resolve_url(&request.url)?;

        let mut query: Vec<(String, String)> = request
            .query
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        query.sort();

        let mut headers = combine_headers(
            Some(self.default_headers.clone()),
            Some(request.extra_headers.clone()),
        )
        .unwrap_or_default();

        let caller_version =
            request.has_version_param() || url.query_pairs().any(|(key, _)| key == "version");
        if !caller_version {
            let version = self.config.api_version().to_string();
            match self.config.version_strategy() {
                VersionStrategy::QueryParameter => query.push(("version".to_string(), version)),
                VersionStrategy::AcceptHeader => {
                    let injected = HashMap::from([(
                        VERSION_HEADER.to_string(),
                        format!("{JSON_API_CONTENT_TYPE};version={version}"),
                    )]);
                    // A caller-supplied version header wins
                    headers = combine_headers(Some(injected), Some(headers)).unwrap_or_default();
                }
            }
        }

        let credential = request.auth.as_ref().or_else(|| self.config.credential());
        let timeout = request.timeout.or(self.config.timeout());
        let body = request.body.to_bytes();

        let mut retries: u32 = 0;
        loop {
            let mut builder = self
                .client
                .request(request.http_method.as_reqwest(), url.clone());
            for (key, value) in &headers {
                builder = builder.header(key, value);
            }
            if !query.is_empty() {
                builder = builder.query(&query);
            }
            if let Some(body) = &body {
                builder = builder.body(body.clone());
            }
            if let Some(credential) = credential {
                builder = credential.sign(builder);
            }
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }

            tracing::debug!(method = %request.http_method, url = %url, "Sending request");

            let response = match self.send(builder).await {
                Ok(response) => response,
                Err(error) => {
                    self.error_count.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(method = %request.http_method, url = %url, error = %error, "HTTP request failed");
                    return Err(HttpError::Network(error));
                }
            };

            let code = response.code;
            if response.is_error() && !response.is_throttled() {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                tracing::error!(method = %request.http_method, url = %url, code, "HTTP request failed");
                return Err(HttpResponseError {
                    code,
                    body: response.text(),
                }
                .into());
            }

            self.request_count.fetch_add(1, Ordering::Relaxed);

            if !response.is_throttled() {
                return Ok(Some(response));
            }

            let wait = throttle_wait(response.retry_after);

            if !request.retry {
                tracing::error!("Throttled. Please retry after {}s", wait.as_secs_f64());
                return Ok(None);
            }

            if let Some(max) = self.config.max_throttle_retries() {
                if retries >= max {
                    self.error_count.fetch_add(1, Ordering::Relaxed);
                    return Err(MaxHttpRetriesExceededError { code, retries }.into());
                }
            }

            retries += 1;
            tracing::info!("Throttled: retrying in {}s", wait.as_secs_f64());
            tokio::time::sleep(wait).await;
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<HttpResponse, reqwest::Error> {
        let res = builder.send().await?;
        HttpResponse::from_reqwest(res).await
    }
}

/// How long to wait before resending a throttled request.
fn throttle_wait(retry_after: Option<Duration>) -> Duration {
    retry_after.unwrap_or(Duration::from_secs(RETRY_WAIT_TIME))
}

/// Returns the `links.next` URL of a collection document, accepting both
/// the string form and the `{href}` form.
fn next_link(document: &Value) -> Option<String> {
    let next = document.get("links")?.get("next")?;
    next.as_str()
        .or_else(|| next.get("href").and_then(Value::as_str))
        .filter(|url| !url.is_empty())
        .map(ToString::to_string)
}
