//! Mock search worker.
//!
//! Runs on a Zellij worker thread when the plugin is configured with the mock
//! backend. Each `Search` message is answered from the built-in catalog with a
//! response shaped like an HTTP exchange.
//!
//! The Zellij worker trait itself is implemented by the plugin binary, which
//! owns the host bindings; this type holds the message processing.

use crate::backend::mock;
use crate::domain::error::{Result, ZearchError};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};

/// Worker state for answering mock searches.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchWorker {
    /// Number of searches answered since the worker started.
    #[serde(skip)]
    answered: u64,
}

impl SearchWorker {
    #[must_use]
    pub const fn answered(&self) -> u64 {
        self.answered
    }

    /// Decodes a JSON payload from the plugin, handles it, and encodes the reply.
    ///
    /// Undecodable payloads still get a reply, an `Error` without a trigger, so
    /// the plugin can log the failure.
    ///
    /// # Errors
    ///
    /// Returns an error only if the reply cannot be serialized.
    pub fn handle_payload(&mut self, payload: &str) -> Result<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    trigger: None,
                    message: format!("malformed worker message: {e}"),
                }
            }
        };

        serde_json::to_string(&response).map_err(ZearchError::from)
    }

    /// Processes a worker message and returns the response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::Search { trigger, query, .. } => self.handle_search(trigger, &query),
        }
    }

    fn handle_search(&mut self, trigger: u64, query: &str) -> WorkerResponse {
        match mock::respond(query) {
            Ok((status, body)) => {
                self.answered += 1;
                tracing::debug!(trigger, status, body_len = body.len(), "mock search answered");
                WorkerResponse::SearchCompleted {
                    trigger,
                    status,
                    body,
                }
            }
            Err(e) => {
                tracing::warn!(trigger, error = %e, "mock search failed");
                WorkerResponse::Error {
                    trigger: Some(trigger),
                    message: e.to_string(),
                }
            }
        }
    }

    /// Re-enters the plugin's trace on the worker thread.
    ///
    /// The returned guard must be held for the duration of message handling.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_response;

    #[test]
    fn search_is_answered_with_catalog() {
        let mut worker = SearchWorker::default();
        let response = worker.handle_message(WorkerMessage::search(3, "mallorca".to_string()));

        let WorkerResponse::SearchCompleted { trigger, status, body } = response else {
            panic!("expected SearchCompleted, got {response:?}");
        };
        assert_eq!(trigger, 3);
        assert_eq!(parse_response(status, body.as_bytes()).unwrap().len(), 3);
        assert_eq!(worker.answered(), 1);
    }

    #[test]
    fn payload_round_trip_preserves_trigger() {
        let mut worker = SearchWorker::default();
        let request = serde_json::to_string(&WorkerMessage::search(9, "ibiza".to_string())).unwrap();

        let reply = worker.handle_payload(&request).unwrap();
        let response: WorkerResponse = serde_json::from_str(&reply).unwrap();
        assert!(matches!(response, WorkerResponse::SearchCompleted { trigger: 9, status: 200, .. }));
    }

    #[test]
    fn garbage_payload_yields_error_reply() {
        let mut worker = SearchWorker::default();
        let reply = worker.handle_payload("not json").unwrap();
        let response: WorkerResponse = serde_json::from_str(&reply).unwrap();

        assert!(matches!(response, WorkerResponse::Error { trigger: None, .. }));
        assert_eq!(worker.answered(), 0);
    }

    #[test]
    fn invalid_trace_context_is_ignored() {
        let mut worker = SearchWorker::default();
        let message = WorkerMessage::Search {
            trigger: 1,
            query: "q".to_string(),
            trace_context: Some(crate::worker::TraceContext {
                trace_id: "zz".to_string(),
                parent_span_id: "yy".to_string(),
            }),
        };
        assert!(matches!(
            worker.handle_message(message),
            WorkerResponse::SearchCompleted { trigger: 1, .. }
        ));
    }
}
