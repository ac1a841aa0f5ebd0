//! URL templates for API resources.
//!
//! Each resource declares its canonical URLs as a table of
//! [`ResourcePath`]s. When a resource needs a URL it has no link for, the
//! most specific template whose ids are all available is selected with
//! [`get_path`] and filled in with [`build_path`].
//!
//! Templates are relative to the API base URL.
//!
//! # Example
//!
//! ```rust
//! use osf_client::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use osf_client::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &[], "v2/users/me/"),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "v2/users/{id}/"),
//! ];
//!
//! // With no ids, the current-user template is the only match
//! let path = get_path(PATHS, ResourceOperation::Find, &[]).unwrap();
//! assert_eq!(path.template, "v2/users/me/");
//!
//! // With an id, the more specific template wins
//! let path = get_path(PATHS, ResourceOperation::Find, &["id"]).unwrap();
//! let url = build_path(path.template, &HashMap::from([("id", "k4x9p")]));
//! assert_eq!(url, "v2/users/k4x9p/");
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations that have a canonical URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single resource.
    Find,
    /// Create a resource in a collection.
    Create,
    /// Map a storage-backend entry to its canonical API entity.
    Resolve,
}

impl ResourceOperation {
    /// Returns the operation name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Create => "create",
            Self::Resolve => "resolve",
        }
    }
}

/// A URL template for one resource operation.
///
/// Templates use `{name}` placeholders. Storage paths already start with a
/// slash, so `v2/files{path}` is filled in as `v2/files/5f3a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Ids that must be known to use this path.
    pub ids: &'static [&'static str],
    /// The URL template.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// How many ids the template consumes. Higher is more specific.
    #[must_use]
    pub const fn specificity(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if every id this template needs is in `known`.
    #[must_use]
    pub fn is_satisfied_by(&self, known: &[&str]) -> bool {
        self.ids.iter().all(|id| known.contains(id))
    }
}

/// Selects the most specific path for `operation` whose ids are all in
/// `known`.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    known: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation && p.is_satisfied_by(known))
        .max_by_key(|p| p.specificity())
}

/// Fills `{name}` placeholders in `template` from `ids`.
///
/// Substituted values are copied verbatim and never rescanned. Placeholders
/// with no entry in `ids` are kept as written.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut url = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        url.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };
        match ids.get(&tail[1..close]) {
            Some(value) => url.push_str(&value.to_string()),
            None => url.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    // Whatever follows the last placeholder, including an unclosed brace
    url.push_str(rest);
    url
}
