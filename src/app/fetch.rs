//! Fetch controller: the request lifecycle behind every search.
//!
//! The controller is the only writer of [`FetchState`]. It reacts to search
//! trigger advances by either short-circuiting (blank query) or producing a
//! [`SearchRequest`] for the plugin runtime to send, and it folds the eventual
//! settlement back into state.
//!
//! # Lifecycle
//!
//! ```text
//!            advance (blank query)
//!   Idle ───────────────────────────────▶ Idle (results cleared)
//!    │
//!    │ advance (non-blank)
//!    ▼
//!  Loading ── settle Ok ──▶ Success (results, no error)
//!    │
//!    └────── settle Err ──▶ Error (message, results cleared)
//! ```
//!
//! # Overlapping requests
//!
//! Every request is keyed to the trigger value that issued it. Only the
//! settlement for the most recently issued trigger is applied; settlements
//! for older triggers, duplicates, and settlements arriving after a blank
//! query short-circuit are dropped.
//!
//! Each transition replaces the whole [`FetchState`] in one assignment, and the
//! plugin renders only after event handling returns, so a half-applied state
//! is never drawn.

use crate::backend::Backend;
use crate::domain::{parse_response, FetchError, SearchResult};
use chrono::{DateTime, Utc};

/// Observable outcome of the most recent search.
///
/// `loading == true` implies `error == None`. While loading, `results` still
/// holds the previous settlement's results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    pub loading: bool,
    pub error: Option<String>,
    pub results: Vec<SearchResult>,
}

/// Where the fetch lifecycle currently stands, derived from [`FetchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Nothing to show yet, or a blank query cleared the results.
    Idle,
    Loading,
    Success,
    Error,
}

impl FetchState {
    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Error
        } else if self.results.is_empty() {
            FetchPhase::Idle
        } else {
            FetchPhase::Success
        }
    }
}

/// A request the runtime must send on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Trigger value this request answers. Settlements must quote it back.
    pub trigger: u64,
    /// Query text read from the store when the trigger fired.
    pub query: String,
    /// Fully built request URL (`<endpoint>?q=<encoded query>`).
    pub url: String,
}

/// Owns [`FetchState`] and enforces one authoritative outcome per trigger.
#[derive(Debug, Clone)]
pub struct FetchController {
    state: FetchState,
    /// Highest trigger value observed so far.
    observed: Option<u64>,
    /// Trigger of the request whose settlement is still awaited.
    pending: Option<u64>,
    source_label: &'static str,
    settled_at: Option<DateTime<Utc>>,
}

impl FetchController {
    /// Creates an idle controller. `source_label` names the backend in error
    /// messages (see [`Backend::source_label`]).
    #[must_use]
    pub fn new(source_label: &'static str) -> Self {
        Self {
            state: FetchState::default(),
            observed: None,
            pending: None,
            source_label,
            settled_at: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState {
        &self.state
    }

    /// Trigger value of the in-flight request, if any.
    #[must_use]
    pub const fn pending_trigger(&self) -> Option<u64> {
        self.pending
    }

    /// When the last request settled, successfully or not.
    #[must_use]
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }

    /// Reacts to the trigger reaching `trigger`.
    ///
    /// `query` is the store's text right now. Returns the request to send, or
    /// `None` when the query is blank or `trigger` is not an advance over the
    /// last observed value.
    pub fn observe_trigger(&mut self, trigger: u64, query: &str, backend: &Backend) -> Option<SearchRequest> {
        let _span = tracing::debug_span!("observe_trigger", trigger, query_len = query.len()).entered();

        if self.observed.is_some_and(|seen| trigger <= seen) {
            tracing::debug!(last_observed = ?self.observed, "trigger did not advance, ignoring");
            return None;
        }
        self.observed = Some(trigger);

        if query.trim().is_empty() {
            tracing::debug!("blank query, clearing results without a request");
            if let Some(stale) = self.pending.take() {
                tracing::debug!(stale_trigger = stale, "abandoning in-flight request");
            }
            self.state = FetchState::default();
            return None;
        }

        if let Some(stale) = self.pending.replace(trigger) {
            tracing::debug!(stale_trigger = stale, "superseding in-flight request");
        }

        self.state = FetchState {
            loading: true,
            error: None,
            results: std::mem::take(&mut self.state.results),
        };

        let request = SearchRequest {
            trigger,
            query: query.to_string(),
            url: backend.request_url(query),
        };
        tracing::debug!(url = %request.url, "issuing search request");
        Some(request)
    }

    /// Applies the outcome of the request issued for `trigger`.
    ///
    /// Returns `true` if state changed. Settlements for any trigger other than
    /// the pending one are discarded.
    pub fn settle(&mut self, trigger: u64, outcome: Result<Vec<SearchResult>, FetchError>) -> bool {
        let _span = tracing::debug_span!("settle", trigger).entered();

        if self.pending != Some(trigger) {
            tracing::debug!(pending = ?self.pending, "discarding stale settlement");
            return false;
        }
        self.pending = None;
        self.settled_at = Some(Utc::now());

        self.state = match outcome {
            Ok(results) => {
                tracing::debug!(result_count = results.len(), "search succeeded");
                FetchState {
                    loading: false,
                    error: None,
                    results,
                }
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    contract_violation = err.is_contract_violation(),
                    "search failed"
                );
                FetchState {
                    loading: false,
                    error: Some(self.user_message(&err)),
                    results: Vec::new(),
                }
            }
        };
        true
    }

    /// Parses a raw `(status, body)` settlement and applies it.
    pub fn settle_response(&mut self, trigger: u64, status: u16, body: &[u8]) -> bool {
        self.settle(trigger, parse_response(status, body))
    }

    /// Fails whatever is pending, or the idle state, with `err`.
    ///
    /// Used when the request cannot be issued at all, such as a denied
    /// permission, so the UI does not stay in loading forever.
    pub fn fail(&mut self, err: &FetchError) {
        tracing::warn!(error = %err, pending = ?self.pending, "search aborted");
        self.pending = None;
        self.settled_at = Some(Utc::now());
        self.state = FetchState {
            loading: false,
            error: Some(self.user_message(err)),
            results: Vec::new(),
        };
    }

    fn user_message(&self, err: &FetchError) -> String {
        format!("Data error from {} (message: {err})", self.source_label)
    }
}
