//! Search backend selection.
//!
//! The plugin talks to exactly one backend, chosen by configuration when the
//! plugin loads:
//!
//! - [`Backend::Http`]: a real search endpoint reached with Zellij's
//!   `web_request` (requires the `WebAccess` permission).
//! - [`Backend::Mock`]: the built-in catalog served by the background worker.
//!   Useful for demos and for running without network access.
//!
//! Both backends produce the same `{ "results": [...] }` JSON body, so the
//! fetch controller parses their responses through one code path.

pub mod mock;

use crate::domain::ZearchError;
use std::fmt;
use std::str::FromStr;

/// Endpoint used when the configuration does not name one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/search";

/// The search backend the fetch controller sends requests to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// A real HTTP search endpoint.
    Http {
        /// Endpoint URL without query string, e.g. `http://localhost:8000/api/search`.
        endpoint: String,
    },
    /// The built-in mock catalog served by the background worker.
    Mock,
}

impl Default for Backend {
    fn default() -> Self {
        Self::Http {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Backend {
    /// Builds a backend from the `backend` and `endpoint` configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ZearchError::Config`] for an unknown backend kind or an empty
    /// endpoint.
    pub fn from_config(kind: Option<&str>, endpoint: Option<&str>) -> crate::Result<Self> {
        let kind: BackendKind = kind.map_or(Ok(BackendKind::Http), str::parse)?;
        match kind {
            BackendKind::Mock => Ok(Self::Mock),
            BackendKind::Http => {
                let endpoint = endpoint.map_or(DEFAULT_ENDPOINT, str::trim);
                if endpoint.is_empty() {
                    return Err(ZearchError::Config("endpoint must not be empty".to_string()));
                }
                Ok(Self::Http {
                    endpoint: endpoint.to_string(),
                })
            }
        }
    }

    /// Whether results come from the built-in mock catalog.
    #[must_use]
    pub const fn is_mock(&self) -> bool {
        matches!(self, Self::Mock)
    }

    /// Human-readable origin used in error messages.
    #[must_use]
    pub const fn source_label(&self) -> &'static str {
        match self {
            Self::Http { .. } => "External API",
            Self::Mock => "Mock Data",
        }
    }

    /// The endpoint shown in the header. The mock backend reports the path
    /// the reference API serves.
    #[must_use]
    pub fn display_endpoint(&self) -> &str {
        match self {
            Self::Http { endpoint } => endpoint,
            Self::Mock => mock::MOCK_ENDPOINT,
        }
    }

    /// Builds the request URL for `query`, URL-encoding it as the `q` parameter.
    ///
    /// An endpoint that already carries a query string gets `&q=` appended.
    ///
    /// # Example
    ///
    /// ```
    /// use zearch::backend::Backend;
    ///
    /// let backend = Backend::Http { endpoint: "http://localhost:8000/api/search".into() };
    /// assert_eq!(
    ///     backend.request_url("palma de mallorca"),
    ///     "http://localhost:8000/api/search?q=palma%20de%20mallorca"
    /// );
    /// ```
    #[must_use]
    pub fn request_url(&self, query: &str) -> String {
        let endpoint = self.display_endpoint();
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{endpoint}{separator}q={}", urlencoding::encode(query))
    }
}

/// The `backend` configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Http,
    Mock,
}

impl FromStr for BackendKind {
    type Err = ZearchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" | "api" | "real" => Ok(Self::Http),
            "mock" => Ok(Self::Mock),
            other => Err(ZearchError::Config(format!(
                "unknown backend `{other}` (expected `http` or `mock`)"
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Mock => f.write_str("mock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_http_endpoint() {
        let backend = Backend::from_config(None, None).unwrap();
        assert_eq!(backend, Backend::default());
        assert!(!backend.is_mock());
        assert_eq!(backend.source_label(), "External API");
    }

    #[test]
    fn parses_mock_kind_case_insensitively() {
        let backend = Backend::from_config(Some(" MOCK "), Some("ignored")).unwrap();
        assert_eq!(backend, Backend::Mock);
        assert_eq!(backend.source_label(), "Mock Data");
    }

    #[test]
    fn rejects_unknown_kind_and_blank_endpoint() {
        assert!(matches!(
            Backend::from_config(Some("grpc"), None),
            Err(ZearchError::Config(_))
        ));
        assert!(matches!(
            Backend::from_config(Some("http"), Some("   ")),
            Err(ZearchError::Config(_))
        ));
    }

    #[test]
    fn request_url_encodes_reserved_characters() {
        let backend = Backend::Http {
            endpoint: "https://search.example/api".to_string(),
        };
        assert_eq!(
            backend.request_url("a&b=c/ü"),
            "https://search.example/api?q=a%26b%3Dc%2F%C3%BC"
        );
    }

    #[test]
    fn request_url_appends_to_existing_query_string() {
        let backend = Backend::Http {
            endpoint: "https://search.example/api?lang=en".to_string(),
        };
        assert_eq!(backend.request_url("x"), "https://search.example/api?lang=en&q=x");
    }
}
