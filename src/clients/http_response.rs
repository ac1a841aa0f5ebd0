//! HTTP response type for the OSF client.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

/// A raw response received from the API.
///
/// The body is kept undecoded so that both JSON documents and file
/// downloads flow through the same dispatch pipeline.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use osf_client::clients::HttpResponse;
///
/// let response = HttpResponse::new(200, HashMap::new(), br#"{"data": []}"#.to_vec());
/// assert!(!response.is_error());
/// assert!(response.json().is_some());
///
/// let empty = HttpResponse::new(204, HashMap::new(), Vec::new());
/// assert!(empty.json().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lower-cased names, possibly repeated.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
    /// The wait requested by a `Retry-After` header, if any.
    pub retry_after: Option<Duration>,
}

impl HttpResponse {
    /// Creates a response, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let retry_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| parse_retry_after(value));

        Self {
            code,
            headers,
            body,
            retry_after,
        }
    }

    pub(crate) async fn from_reqwest(res: reqwest::Response) -> Result<Self, reqwest::Error> {
        let code = res.status().as_u16();
        let headers = parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();
        Ok(Self::new(code, headers, body))
    }

    /// Returns `true` for a status of 400 or more.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.code >= 400
    }

    /// Returns `true` if the server throttled the request.
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        self.code == 429
    }

    /// Decodes the body as JSON.
    ///
    /// An empty or non-JSON body yields `None`.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        if self.body.is_empty() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the first value of a header, by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

// Seconds only; HTTP-date values are ignored.
fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds: f64 = value.trim().parse().ok()?;
    if seconds < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(seconds).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_retry_after_is_parsed_in_seconds() {
        let response = HttpResponse::new(429, headers(&[("retry-after", "3")]), Vec::new());
        assert_eq!(response.retry_after, Some(Duration::from_secs(3)));
        assert!(response.is_throttled());
        assert!(response.is_error());
    }

    #[test]
    fn test_fractional_retry_after() {
        let response = HttpResponse::new(429, headers(&[("retry-after", "0.5")]), Vec::new());
        assert_eq!(response.retry_after, Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_unparseable_retry_after_is_ignored() {
        for value in ["soon", "-1", "Wed, 21 Oct 2015 07:28:00 GMT", ""] {
            let response = HttpResponse::new(429, headers(&[("retry-after", value)]), Vec::new());
            assert_eq!(response.retry_after, None, "value {value:?}");
        }
    }

    #[test]
    fn test_json_decoding() {
        let response = HttpResponse::new(200, HashMap::new(), br#"{"data":{"id":"x"}}"#.to_vec());
        assert_eq!(response.json().unwrap()["data"]["id"], "x");
    }

    #[test]
    fn test_invalid_json_is_no_content() {
        let response = HttpResponse::new(200, HashMap::new(), b"<html></html>".to_vec());
        assert!(response.json().is_none());
        assert_eq!(response.text(), "<html></html>");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, headers(&[("content-type", "text/plain")]), Vec::new());
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("x-missing"), None);
    }
}
