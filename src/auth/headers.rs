//! Header map helpers.

use std::collections::HashMap;

/// Merges two optional header maps.
///
/// Returns `second` when `first` is absent and `first` when `second` is
/// absent. When both are present the result is their union, with values
/// from `second` winning on conflict. Header names are compared
/// case-insensitively, as HTTP does, so `Content-Type` in `second` replaces
/// `content-type` in `first`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use osf_client::auth::combine_headers;
///
/// let base = HashMap::from([("content-type".to_string(), "application/vnd.api+json".to_string())]);
/// let extra = HashMap::from([("X-Trace".to_string(), "1".to_string())]);
///
/// let merged = combine_headers(Some(base.clone()), Some(extra)).unwrap();
/// assert_eq!(merged.len(), 2);
///
/// assert_eq!(combine_headers(Some(base.clone()), None), Some(base));
/// assert_eq!(combine_headers(None, None), None);
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn combine_headers(
    first: Option<HashMap<String, String>>,
    second: Option<HashMap<String, String>>,
) -> Option<HashMap<String, String>> {
    match (first, second) {
        (None, second) => second,
        (first, None) => first,
        (Some(mut merged), Some(second)) => {
            for (key, value) in second {
                merged.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
                merged.insert(key, value);
            }
            Some(merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_absent_first_returns_second() {
        let b = map(&[("a", "1")]);
        assert_eq!(combine_headers(None, Some(b.clone())), Some(b));
    }

    #[test]
    fn test_absent_second_returns_first() {
        let a = map(&[("a", "1")]);
        assert_eq!(combine_headers(Some(a.clone()), None), Some(a));
    }

    #[test]
    fn test_union_with_second_winning() {
        let a = map(&[("accept", "text/plain"), ("x-one", "1")]);
        let b = map(&[("accept", "application/json"), ("x-two", "2")]);

        let merged = combine_headers(Some(a), Some(b)).unwrap();

        assert_eq!(
            merged,
            map(&[
                ("accept", "application/json"),
                ("x-one", "1"),
                ("x-two", "2")
            ])
        );
    }

    #[test]
    fn test_conflicts_ignore_ascii_case() {
        let a = map(&[("content-type", "application/vnd.api+json")]);
        let b = map(&[("Content-Type", "application/octet-stream")]);

        let merged = combine_headers(Some(a), Some(b)).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged.get("Content-Type").map(String::as_str),
            Some("application/octet-stream")
        );
    }

    #[test]
    fn test_both_empty_maps_yield_empty_map() {
        assert_eq!(
            combine_headers(Some(HashMap::new()), Some(HashMap::new())),
            Some(HashMap::new())
        );
    }
}
