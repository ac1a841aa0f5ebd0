//! Unwrapping JSON:API documents into resource state.
//!
//! Server payloads are not modelled as static structs. Each resource keeps
//! its server-defined fields in [`AttributeBag`]s and layers typed accessors
//! over the handful of stable fields (`title`, `kind`, `path`, ...).
//!
//! Two document shapes are accepted:
//!
//! - canonical JSON:API, `{"data": {"id", "type", "attributes": {...},
//!   "relationships": {...}, "links": {...}}}`
//! - the flatter storage-backend shape, where `data` carries the fields
//!   directly with no `attributes` object
//!
//! # Example
//!
//! ```rust
//! use osf_client::rest::ResourceData;
//! use serde_json::json;
//!
//! let data = ResourceData::from_document(&json!({
//!     "data": {
//!         "id": "abc123",
//!         "type": "nodes",
//!         "attributes": {"title": "T"},
//!         "relationships": {"files": {"links": {"related": {"href": "U"}}}}
//!     }
//! }));
//!
//! assert_eq!(data.id(), Some("abc123"));
//! assert_eq!(data.title(), Some("T"));
//! assert_eq!(data.relationships.related_href("files"), Some("U"));
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys never sent as attributes, whatever the caller passes.
const RESERVED_ATTRIBUTE_KEYS: &[&str] = &["self", "token"];

/// Returns `document.data` if present, otherwise `document` itself.
#[must_use]
pub fn unwrap_data(document: &Value) -> &Value {
    document.get("data").unwrap_or(document)
}

/// Copies every entry of `attributes` onto `target`, overwriting existing
/// keys and keeping the rest.
pub fn materialize_attributes(target: &mut Map<String, Value>, attributes: &Map<String, Value>) {
    for (key, value) in attributes {
        target.insert(key.clone(), value.clone());
    }
}

/// Prepares caller-supplied attributes for a request body.
///
/// Null values are dropped, and so are the `self` and `token` keys.
#[must_use]
pub fn collect_attributes(attributes: Map<String, Value>) -> Map<String, Value> {
    attributes
        .into_iter()
        .filter(|(key, value)| !value.is_null() && !RESERVED_ATTRIBUTE_KEYS.contains(&key.as_str()))
        .collect()
}

/// A bag of server-defined key/value pairs.
///
/// Used for a resource's `attributes`, `relationships`, `links`, and `meta`.
/// The helpers understand the JSON:API conventions for links, which may be
/// plain strings or `{"href": ...}` objects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag(Map<String, Value>);

impl AttributeBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bag from a document, unwrapping `data` first.
    ///
    /// Anything that is not an object yields an empty bag.
    #[must_use]
    pub fn from_document(document: &Value) -> Self {
        match unwrap_data(document) {
            Value::Object(map) => Self(map.clone()),
            _ => Self::default(),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value under `key` if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the value under `key` if it is a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Returns the URL of link `name`, in either string or `{href}` form.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(href)
    }

    /// Returns `relationships.<relation>.links.related.href`.
    #[must_use]
    pub fn related_href(&self, relation: &str) -> Option<&str> {
        self.0
            .get(relation)?
            .get("links")?
            .get("related")
            .and_then(href)
    }

    /// Returns `relationships.<relation>.data.id`.
    #[must_use]
    pub fn related_id(&self, relation: &str) -> Option<&str> {
        self.0.get(relation)?.get("data")?.get("id")?.as_str()
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns `true` if the bag holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the underlying map mutably.
    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    /// Consumes the bag, returning the underlying map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for AttributeBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn href(value: &Value) -> Option<&str> {
    value
        .as_str()
        .or_else(|| value.get("href").and_then(Value::as_str))
}

/// The state every resource carries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Server-assigned id; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The JSON:API `type`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Server-defined attributes.
    #[serde(default)]
    pub attributes: AttributeBag,
    /// Relationship descriptors keyed by relation name.
    #[serde(default)]
    pub relationships: AttributeBag,
    /// Action links (`self`, `download`, `upload`, `move`, ...).
    #[serde(default)]
    pub links: AttributeBag,
    /// Server metadata.
    #[serde(default)]
    pub meta: AttributeBag,
}

impl ResourceData {
    /// Creates empty state of the given `type`.
    #[must_use]
    pub fn new(resource_type: &str) -> Self {
        Self {
            resource_type: Some(resource_type.to_string()),
            ..Self::default()
        }
    }

    /// Creates state from a document.
    #[must_use]
    pub fn from_document(document: &Value) -> Self {
        let mut data = Self::default();
        data.update_from_document(document);
        data
    }

    /// Applies a document to this state.
    ///
    /// Attributes come from `data.attributes` when it is present, otherwise
    /// from `data` itself. They are merged key by key. `id` and `type` are
    /// taken from the document when it carries them. `relationships`,
    /// `links`, and `meta` are replaced wholesale.
    ///
    /// A document whose `data` is null, empty, or not an object leaves the
    /// state untouched and returns `false`.
    pub fn update_from_document(&mut self, document: &Value) -> bool {
        let data = match unwrap_data(document) {
            Value::Object(data) if !data.is_empty() => data,
            _ => return false,
        };

        match data.get("attributes") {
            Some(Value::Object(attributes)) => {
                materialize_attributes(self.attributes.as_map_mut(), attributes);
            }
            Some(_) => {}
            None => materialize_attributes(self.attributes.as_map_mut(), data),
        }

        if let Some(id) = data.get("id").and_then(scalar_string) {
            self.id = Some(id);
        }
        if let Some(resource_type) = data.get("type").and_then(Value::as_str) {
            self.resource_type = Some(resource_type.to_string());
        }

        self.relationships = nested_bag(data, "relationships");
        self.links = nested_bag(data, "links");
        self.meta = nested_bag(data, "meta");
        true
    }

    /// Returns the id, if persisted.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the JSON:API `type`.
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    /// `attributes.title`
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.attributes.get_str("title")
    }

    /// `attributes.name`
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attributes.get_str("name")
    }

    /// `attributes.kind`, either `"file"` or `"folder"` for storage entries.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.attributes.get_str("kind")
    }

    /// `attributes.path`
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.attributes.get_str("path")
    }

    /// `attributes.provider`
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.attributes.get_str("provider")
    }

    /// `attributes.category`
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.attributes.get_str("category")
    }

    /// `attributes.date_created`
    #[must_use]
    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        self.attributes.get_str("date_created").and_then(parse_timestamp)
    }

    /// `attributes.date_modified`
    #[must_use]
    pub fn date_modified(&self) -> Option<DateTime<Utc>> {
        self.attributes.get_str("date_modified").and_then(parse_timestamp)
    }

    /// Returns the `self` link.
    #[must_use]
    pub fn self_link(&self) -> Option<&str> {
        self.links.link("self")
    }
}

fn nested_bag(data: &Map<String, Value>, key: &str) -> AttributeBag {
    data.get(key).map_or_else(AttributeBag::new, AttributeBag::from_document)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// The API emits naive UTC timestamps ("2017-01-05T16:19:04.312000");
// storage backends emit RFC 3339.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
