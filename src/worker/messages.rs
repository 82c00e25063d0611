//! Message types exchanged with the mock search worker.
//!
//! The plugin and its background worker communicate through JSON payloads
//! carried by Zellij plugin messages. Requests carry the trigger value of the
//! search they belong to and the caller's trace context, so the worker's
//! spans join the plugin's trace.

use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry IDs of the current `tracing` span.
    ///
    /// Returns `None` when no valid span context is active, for instance when
    /// tracing was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    search(Search { trigger: u64, query: String }),
}

/// Messages sent from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Answer `query` from the mock catalog.
    Search {
        /// Trigger value of the search; echoed back in the response.
        trigger: u64,

        /// Query text as read from the query store.
        query: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Search { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The mock backend answered. Shaped like an HTTP exchange so the plugin
    /// parses it with the same response contract.
    SearchCompleted {
        /// Trigger value of the search this answers.
        trigger: u64,
        /// HTTP-equivalent status code.
        status: u16,
        /// JSON response body.
        body: String,
    },

    /// The worker could not produce a response.
    Error {
        /// Trigger value of the failed search, when the request was readable.
        trigger: Option<u64>,
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_builder_without_tracing_has_no_context() {
        let message = WorkerMessage::search(4, "mallorca".to_string());
        assert_eq!(
            message,
            WorkerMessage::Search {
                trigger: 4,
                query: "mallorca".to_string(),
                trace_context: None,
            }
        );
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn message_without_trace_context_deserializes() {
        let payload = r#"{"Search":{"trigger":2,"query":"ibiza"}}"#;
        let message: WorkerMessage = serde_json::from_str(payload).unwrap();
        assert_eq!(
            message,
            WorkerMessage::Search {
                trigger: 2,
                query: "ibiza".to_string(),
                trace_context: None,
            }
        );
    }
}
