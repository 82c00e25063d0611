//! Event handling and state transition logic.
//!
//! [`handle_event`] is the one place where the query store, the search
//! trigger and the fetch controller are wired together. Events arrive from
//! the plugin runtime (keys, web responses, permission results) or from the
//! mock worker, and each one produces a render flag plus the side effects the
//! runtime must perform.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `PermissionDenied`
//! - **Query input**: `Char`, `Backspace`, `ClearQuery`, `Submit`
//! - **Navigation**: `FocusResults`, `FocusQuery`, `KeyDown`, `KeyUp`, `OpenSelected`
//! - **Settlement**: `WebResponse`, `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use zearch::app::{handle_event, AppState, Event};
//! use zearch::backend::Backend;
//! use zearch::ui::theme::Theme;
//!
//! let mut state = AppState::new("mallorca", Backend::Mock, Theme::default(), "xdg-open");
//! let (render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! assert!(state.fetch_state().loading);
//! # Ok::<(), zearch::ZearchError>(())
//! ```

use crate::app::{Action, AppState, Focus};
use crate::backend::Backend;
use crate::domain::error::{Result, ZearchError};
use crate::domain::FetchError;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::collections::BTreeMap;

/// Web request context key carrying the trigger value.
pub const CONTEXT_TRIGGER: &str = "trigger";
/// Web request context key carrying the query text.
pub const CONTEXT_QUERY: &str = "query";

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The plugin is ready to fetch. Fires the initial search once.
    Mount,
    /// Web access was refused by the user.
    PermissionDenied,

    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Empties the query.
    ClearQuery,
    /// Submits the search form.
    Submit,

    /// Moves keyboard focus to the result cards.
    FocusResults,
    /// Moves keyboard focus back to the query input.
    FocusQuery,
    /// Selects the next result card (wraps to top).
    KeyDown,
    /// Selects the previous result card (wraps to bottom).
    KeyUp,
    /// Opens the selected result's URL.
    OpenSelected,
    /// Hides the plugin pane.
    CloseFocus,

    /// A web request issued by the plugin completed.
    ///
    /// Zellij reports transport failures through the status code as well, so
    /// every completion arrives here.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        /// Context attached when the request was issued.
        context: BTreeMap<String, String>,
    },
    /// The mock worker answered.
    WorkerResponse(WorkerResponse),
}

/// Processes a single event and returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns [`ZearchError::Worker`] when the worker reports a message it could
/// not read. Search state is left untouched in that case.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mount => {
            if state.mounted {
                tracing::debug!("already mounted");
                return Ok((false, vec![]));
            }
            state.mounted = true;
            let trigger = state.trigger.current();
            tracing::info!(trigger, query = %state.query.query(), "initial search");
            Ok((true, fire_search(state, trigger)))
        }
        Event::PermissionDenied => {
            if state.backend.is_mock() {
                tracing::info!("web access denied, mock backend does not need it");
                return handle_event(state, &Event::Mount);
            }
            state.web_access_denied = true;
            state.mounted = true;
            state.fetch.fail(&FetchError::PermissionDenied);
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !accepts_edits(state) {
                return Ok((false, vec![]));
            }
            state.query.push(*c);
            tracing::trace!(query = %state.query.query(), char = %c, "query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !accepts_edits(state) {
                return Ok((false, vec![]));
            }
            Ok((state.query.pop().is_some(), vec![]))
        }
        Event::ClearQuery => {
            if !accepts_edits(state) {
                return Ok((false, vec![]));
            }
            state.query.clear();
            Ok((true, vec![]))
        }
        Event::Submit => {
            if !state.submit_enabled() {
                tracing::debug!(
                    loading = state.fetch_state().loading,
                    blank = state.query.is_blank(),
                    mounted = state.mounted,
                    "submit ignored"
                );
                return Ok((false, vec![]));
            }
            let trigger = state.trigger.request_search();
            tracing::info!(trigger, query = %state.query.query(), "search requested");
            Ok((true, fire_search(state, trigger)))
        }
        Event::FocusResults => {
            if state.visible_results().is_empty() {
                return Ok((false, vec![]));
            }
            state.focus = Focus::Results;
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::FocusQuery => {
            let changed = state.focus != Focus::Query;
            state.focus = Focus::Query;
            Ok((changed, vec![]))
        }
        Event::KeyDown => {
            if state.focus != Focus::Results {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.focus != Focus::Results {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            if state.focus != Focus::Results {
                return Ok((false, vec![]));
            }
            let Some(result) = state.selected_result() else {
                tracing::debug!("no result selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(id = %result.id, url = %result.url, "opening result");
            Ok((
                false,
                vec![Action::OpenUrl {
                    command: state.open_command.clone(),
                    url: result.url.clone(),
                }],
            ))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::WebResponse { status, body, context } => {
            let Some(trigger) = context.get(CONTEXT_TRIGGER).and_then(|t| t.parse::<u64>().ok()) else {
                tracing::warn!(?context, status, "web response without a trigger, ignoring");
                return Ok((false, vec![]));
            };
            let changed = state.fetch.settle_response(trigger, *status, body);
            if changed {
                state.clamp_selection();
            }
            Ok((changed, vec![]))
        }
        Event::WorkerResponse(response) => {
            let changed = match response {
                WorkerResponse::SearchCompleted { trigger, status, body } => {
                    state.fetch.settle_response(*trigger, *status, body.as_bytes())
                }
                WorkerResponse::Error {
                    trigger: Some(trigger),
                    message,
                } => state
                    .fetch
                    .settle(*trigger, Err(FetchError::Transport(message.clone()))),
                WorkerResponse::Error { trigger: None, message } => {
                    return Err(ZearchError::Worker(message.clone()));
                }
            };
            if changed {
                state.clamp_selection();
            }
            Ok((changed, vec![]))
        }
    }
}

/// Query edits are accepted only with the input focused and no request loading.
fn accepts_edits(state: &AppState) -> bool {
    state.focus == Focus::Query && state.input_enabled()
}

/// Hands the trigger to the fetch controller and turns the resulting request,
/// if any, into the backend's side effect.
fn fire_search(state: &mut AppState, trigger: u64) -> Vec<Action> {
    if !state.can_fetch() {
        tracing::warn!(trigger, "web access denied, not issuing request");
        state.fetch.fail(&FetchError::PermissionDenied);
        state.clamp_selection();
        return vec![];
    }

    let request = state
        .fetch
        .observe_trigger(trigger, state.query.query(), &state.backend);
    state.clamp_selection();

    let Some(request) = request else {
        return vec![];
    };

    let action = match state.backend {
        Backend::Http { .. } => {
            let mut context = BTreeMap::new();
            context.insert(CONTEXT_TRIGGER.to_string(), request.trigger.to_string());
            context.insert(CONTEXT_QUERY.to_string(), request.query);
            Action::WebRequest {
                url: request.url,
                context,
            }
        }
        Backend::Mock => Action::PostToWorker(WorkerMessage::search(request.trigger, request.query)),
    };
    vec![action]
}
