//! Background worker serving the mock search backend.
//!
//! When the plugin runs with `backend "mock"`, searches are answered by a
//! Zellij worker thread instead of the network. The round trip is still
//! asynchronous, so the fetch controller sees the same issue/settle lifecycle
//! as with a real endpoint.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Message processing for the mock catalog

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
