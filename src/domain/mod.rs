//! Domain layer for the Zearch plugin.
//!
//! Core types that do not depend on Zellij APIs: the search result model,
//! the response contract, and the error types.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`result`]: Search result model and response parsing
//!
//! # Examples
//!
//! ```
//! use zearch::domain::{parse_response, FetchError};
//!
//! assert_eq!(parse_response(503, b""), Err(FetchError::Status { code: 503, detail: None }));
//! ```

pub mod error;
pub mod result;

pub use error::{FetchError, Result, ZearchError};
pub use result::{is_success_status, parse_response, SearchResult};
