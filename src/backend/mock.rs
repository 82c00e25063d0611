//! Built-in mock search catalog.
//!
//! Mirrors the reference search API: every query is answered with the same
//! hardcoded result list, wrapped in the endpoint's response envelope. The
//! body is produced as JSON text so the plugin parses it exactly like a real
//! HTTP response.

use serde::Serialize;

/// Path the reference API serves search on; shown in the header in mock mode.
pub const MOCK_ENDPOINT: &str = "/api/search";

#[derive(Debug, Serialize)]
struct MockRecord {
    id: u32,
    title: &'static str,
    snippet: &'static str,
    url: &'static str,
}

const CATALOG: [MockRecord; 3] = [
    MockRecord {
        id: 1,
        title: "Result One",
        snippet: "This is the first search result.",
        url: "https://example.com/one",
    },
    MockRecord {
        id: 2,
        title: "Result Two",
        snippet: "This is the second search result.",
        url: "https://example.com/two",
    },
    MockRecord {
        id: 3,
        title: "Result Three",
        snippet: "This is the third search result.",
        url: "https://example.com/three",
    },
];

#[derive(Debug, Serialize)]
struct MockEnvelope<'a> {
    query: &'a str,
    results_count: usize,
    results: &'a [MockRecord],
}

/// Answers `query` with the catalog, as a `(status, body)` pair.
///
/// The query is echoed back but does not filter the catalog.
///
/// # Errors
///
/// Returns an error only if serialization fails, which the static catalog
/// cannot trigger in practice.
pub fn respond(query: &str) -> serde_json::Result<(u16, String)> {
    let envelope = MockEnvelope {
        query,
        results_count: CATALOG.len(),
        results: &CATALOG,
    };
    serde_json::to_string(&envelope).map(|body| (200, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_response;

    #[test]
    fn mock_body_satisfies_response_contract() {
        let (status, body) = respond("mallorca").unwrap();
        let results = parse_response(status, body.as_bytes()).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, "1");
        assert_eq!(results[2].url, "https://example.com/three");
    }

    #[test]
    fn mock_body_echoes_query() {
        let (_, body) = respond("ibiza").unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["query"], "ibiza");
        assert_eq!(value["results_count"], 3);
    }
}
