//! Request dispatch for the OSF API.
//!
//! This module holds the transport layer every resource goes through.
//!
//! # Overview
//!
//! - [`Session`]: The dispatcher shared by all resources
//! - [`JsonApiRequest`]: A single request, built with [`JsonApiRequestBuilder`]
//! - [`RequestBody`]: The resolved body of a request
//! - [`HttpResponse`]: A raw response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`CallOptions`]: Per-call overrides of the session defaults
//!
//! # Example
//!
//! ```rust,ignore
//! use osf_client::clients::{HttpMethod, JsonApiRequest};
//!
//! let request = JsonApiRequest::builder(HttpMethod::Patch, "v2/nodes/abc12/")
//!     .item_id("abc12")
//!     .item_type("nodes")
//!     .attributes(attributes)
//!     .build()?;
//!
//! let document = session.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Throttled)**: Waits for `Retry-After` seconds (1 second if
//!   absent) and resends, for as long as 429s keep arriving, unless retry
//!   is disabled for the call or a cap is configured
//! - **Other errors (4xx/5xx)**: Returned immediately without retry

mod errors;
mod http_request;
mod http_response;
mod session;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_request::{CallOptions, HttpMethod, JsonApiRequest, JsonApiRequestBuilder, RequestBody};
pub use http_response::HttpResponse;
pub use session::{
    Session, JSON_API_CONTENT_TYPE, RETRY_WAIT_TIME, SDK_VERSION, VERSION_HEADER,
};
