//! Error types for the Zearch plugin.
//!
//! Two error enums live here:
//!
//! - [`ZearchError`]: crate-level failures (configuration, themes, worker
//!   messaging, I/O). These are logged and never surface in the result area.
//! - [`FetchError`]: failures of a single search round trip. The fetch
//!   controller converts every one of these into the visible error state.

use thiserror::Error;

/// The main error type for Zearch plugin operations.
///
/// # Examples
///
/// ```
/// use zearch::ZearchError;
///
/// fn validate_endpoint(endpoint: &str) -> Result<(), ZearchError> {
///     if endpoint.is_empty() {
///         return Err(ZearchError::Config("endpoint must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_endpoint("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZearchError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the mock search worker failed.
    ///
    /// Covers serialization of worker messages and malformed worker replies.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for Zearch operations.
pub type Result<T> = std::result::Result<T, ZearchError>;

/// Failure of one search request, from issue to settlement.
///
/// The `Display` text of each variant is embedded verbatim in the message the
/// user sees, so the wording is part of the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (unreachable host, DNS,
    /// refused connection, worker unavailable).
    #[error("network request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status. The body is not
    /// parsed; a short excerpt is kept because Zellij reports transport
    /// failures this way, with the failure text as the body.
    #[error(
        "HTTP error: status {code}{}",
        .detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default()
    )]
    Status {
        code: u16,
        /// Leading text of a non-empty body.
        detail: Option<String>,
    },

    /// The body of a successful response was not valid JSON.
    #[error("malformed JSON in response: {0}")]
    Decode(String),

    /// The body was JSON but did not match `{ "results": [...] }`.
    #[error("invalid data structure received")]
    InvalidStructure,

    /// `results` was an array but one of its records was unusable.
    #[error("invalid data structure received: result {index}: {reason}")]
    InvalidRecord {
        /// Position of the offending record in the `results` array.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// The host refused the permission needed to reach the endpoint.
    #[error("permission to access the web was denied")]
    PermissionDenied,
}

/// Characters of a non-success body kept in [`FetchError::Status`].
pub const STATUS_DETAIL_CHARS: usize = 80;

impl FetchError {
    /// Builds a [`FetchError::Status`] from a non-success exchange.
    ///
    /// The body is read as lossy UTF-8 with whitespace runs collapsed and cut
    /// to [`STATUS_DETAIL_CHARS`]. A blank body leaves no detail.
    #[must_use]
    pub fn status(code: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let detail = if collapsed.chars().count() > STATUS_DETAIL_CHARS {
            let cut: String = collapsed.chars().take(STATUS_DETAIL_CHARS).collect();
            Some(format!("{cut}..."))
        } else if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        };
        Self::Status { code, detail }
    }

    /// Whether the failure means the response violated the response contract.
    ///
    /// Contract violations clear the displayed results in addition to setting
    /// the error.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidStructure | Self::InvalidRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_embeds_code() {
        assert_eq!(FetchError::status(500, b"").to_string(), "HTTP error: status 500");
    }

    #[test]
    fn status_error_keeps_body_excerpt() {
        let err = FetchError::status(400, b"  Connection refused\n (os error 111) ");
        assert_eq!(
            err.to_string(),
            "HTTP error: status 400 (Connection refused (os error 111))"
        );
    }

    #[test]
    fn status_detail_is_cut_and_lossy() {
        let long = "x".repeat(STATUS_DETAIL_CHARS + 20);
        let FetchError::Status { detail: Some(detail), .. } = FetchError::status(502, long.as_bytes()) else {
            panic!("expected a detail");
        };
        assert_eq!(detail.chars().count(), STATUS_DETAIL_CHARS + 3);
        assert!(detail.ends_with("..."));

        let err = FetchError::status(500, &[0xff, b'o', b'k']);
        assert!(err.to_string().ends_with("(\u{fffd}ok)"));
    }

    #[test]
    fn record_error_keeps_structure_wording() {
        let err = FetchError::InvalidRecord {
            index: 2,
            reason: "missing field `title`".to_string(),
        };
        assert!(err.to_string().starts_with("invalid data structure"));
        assert!(err.is_contract_violation());
        assert!(!FetchError::status(404, b"").is_contract_violation());
    }

    #[test]
    fn crate_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ZearchError = io.into();
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
