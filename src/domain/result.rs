//! Search result model and response contract.
//!
//! The search endpoint answers with a JSON document of the shape
//! `{ "results": [ { "id", "title", "snippet", "url" }, ... ] }`. This module
//! owns that contract: [`parse_response`] turns a settled HTTP exchange into
//! either the ordered result list or a [`FetchError`].

use super::error::FetchError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One document returned by the search endpoint.
///
/// Results carry no identity across requests; `id` is only unique within the
/// response it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub url: String,
}

impl SearchResult {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }
}

/// Accepts `"id": "7"` as well as `"id": 7`.
fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

/// Whether an HTTP status code counts as success (2xx).
#[must_use]
pub const fn is_success_status(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Interprets a settled HTTP exchange against the response contract.
///
/// - Non-2xx: [`FetchError::Status`]; the body is kept only as a text excerpt.
/// - Body not JSON: [`FetchError::Decode`].
/// - JSON that is `null`, not an object, or whose `results` is missing or not
///   an array: [`FetchError::InvalidStructure`].
/// - A record that is not `{ id, title, snippet, url }`:
///   [`FetchError::InvalidRecord`].
///
/// Fields other than `results` (the reference backend also sends `query` and
/// `results_count`) are ignored. Records keep server order.
///
/// # Errors
///
/// Returns the [`FetchError`] describing the first contract violation found.
///
/// # Example
///
/// ```
/// use zearch::domain::parse_response;
///
/// let body = br#"{"results":[{"id":1,"title":"Mallorca Guide","snippet":"...","url":"http://x"}]}"#;
/// let results = parse_response(200, body).unwrap();
/// assert_eq!(results[0].title, "Mallorca Guide");
/// assert_eq!(results[0].id, "1");
/// ```
pub fn parse_response(status: u16, body: &[u8]) -> std::result::Result<Vec<SearchResult>, FetchError> {
    if !is_success_status(status) {
        return Err(FetchError::status(status, body));
    }

    let document: Value =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let Some(records) = document.get("results").and_then(Value::as_array) else {
        return Err(FetchError::InvalidStructure);
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            SearchResult::deserialize(record).map_err(|e| FetchError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_in_server_order() {
        let body = br#"{
            "query": "mallorca",
            "results_count": 2,
            "results": [
                {"id": "b", "title": "Second", "snippet": "s2", "url": "https://example.com/2"},
                {"id": "a", "title": "First", "snippet": "s1", "url": "https://example.com/1"}
            ]
        }"#;

        let results = parse_response(200, body).unwrap();
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[test]
    fn empty_results_array_is_success() {
        assert_eq!(parse_response(200, br#"{"results": []}"#).unwrap(), vec![]);
    }

    #[test]
    fn non_success_status_is_not_parsed() {
        assert_eq!(
            parse_response(500, b"<html>oops</html>"),
            Err(FetchError::Status {
                code: 500,
                detail: Some("<html>oops</html>".to_string()),
            })
        );
        assert_eq!(
            parse_response(404, b""),
            Err(FetchError::Status { code: 404, detail: None })
        );
    }

    #[test]
    fn results_not_a_list_is_invalid_structure() {
        let err = parse_response(200, br#"{"results": "not-a-list"}"#).unwrap_err();
        assert_eq!(err, FetchError::InvalidStructure);
        assert!(err.to_string().contains("invalid data structure"));
    }

    #[test]
    fn missing_results_and_null_document_are_invalid_structure() {
        assert_eq!(parse_response(200, br#"{"items": []}"#), Err(FetchError::InvalidStructure));
        assert_eq!(parse_response(200, b"null"), Err(FetchError::InvalidStructure));
        assert_eq!(parse_response(200, b"[1, 2]"), Err(FetchError::InvalidStructure));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = parse_response(200, b"{\"results\": [").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn record_missing_field_is_reported_with_index() {
        let body = br#"{"results": [
            {"id": 1, "title": "ok", "snippet": "", "url": "u"},
            {"id": 2, "snippet": "", "url": "u"}
        ]}"#;

        match parse_response(200, body) {
            Err(FetchError::InvalidRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("title"));
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(is_success_status(200));
        assert!(is_success_status(204));
        assert!(!is_success_status(199));
        assert!(!is_success_status(301));
        assert!(!is_success_status(400));
    }
}
