//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the zearch library and the Zellij host. It maps
//! host events to library events, runs the handler, and executes the actions
//! it returns with host calls. No search logic lives here.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   Zellij Main Thread         │
//! │  ┌────────────────────────┐  │   web_request ──► search endpoint
//! │  │  State (plugin)        │──┼─► WebRequestResult ◄──┘
//! │  └────────────────────────┘  │
//! │          │ IPC (mock only)   │
//! │          ▼                   │
//! │  ┌────────────────────────┐  │
//! │  │ MockSearchWorker       │  │  ← answers from the built-in catalog
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `PermissionRequestResult(Granted)` → `Event::Mount`
//! - `PermissionRequestResult(Denied)` → `Event::PermissionDenied`
//! - `WebRequestResult` → `Event::WebResponse`
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `Key` → see keybindings below
//!
//! # Keybindings
//!
//! Query input:
//! - characters, `Backspace`: edit the query
//! - `Ctrl+u`: clear the query
//! - `Enter`: search
//! - `Tab`/`Down`/`Ctrl+n`: focus results
//! - `Esc`: hide the plugin
//!
//! Results:
//! - `j`/`Down`/`Ctrl+n`: next card
//! - `k`/`Up`/`Ctrl+p`: previous card
//! - `Enter`: open the card's URL
//! - `Tab`/`/`/`Esc`: back to the query
//! - `q`: hide the plugin

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use zearch::worker::{SearchWorker, WorkerMessage, WorkerResponse};
use zearch::{handle_event, Action, Config, Event, Focus};

register_plugin!(State);
register_worker!(MockSearchWorker, mock_search_worker, MOCK_SEARCH_WORKER);

/// Name the worker is registered under (`register_worker!` strips `_worker`).
const WORKER_NAME: &str = "mock_search";

/// Context key marking `run_command` calls issued to open URLs.
const OPEN_URL_CONTEXT: &str = "open_url";

/// Zellij-facing wrapper around the library's [`SearchWorker`].
#[derive(Default, Serialize, Deserialize)]
struct MockSearchWorker(SearchWorker);

impl ZellijWorker<'_> for MockSearchWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if message != WORKER_NAME {
            return;
        }

        match self.0.handle_payload(&payload) {
            Ok(reply) => post_message_to_plugin(PluginMessage {
                name: WORKER_NAME.to_string(),
                payload: reply,
                worker_name: None,
            }),
            Err(e) => tracing::error!(error = %e, "failed to encode worker reply"),
        }
    }
}

struct State {
    app: zearch::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zearch::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        if let Err(e) = zearch::observability::init_tracing(&config) {
            eprintln!("zearch: tracing disabled: {e}");
        }

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = zearch::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
            EventType::RunCommandResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        );
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::Mount,
                PermissionStatus::Denied => Event::PermissionDenied,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::WebResponse { status, body, context }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                if context.contains_key(OPEN_URL_CONTEXT) && exit_code != Some(0) {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        "opening result URL failed"
                    );
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zearch::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, focus = ?self.app.focus, "key event");

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        let typing = key.has_no_modifiers() || key.has_modifiers(&[KeyModifier::Shift]);

        match (self.app.focus, key.bare_key) {
            (Focus::Query, BareKey::Char('u')) if ctrl => Some(Event::ClearQuery),
            (Focus::Query, BareKey::Char('n')) if ctrl => Some(Event::FocusResults),
            (Focus::Query, BareKey::Enter) => Some(Event::Submit),
            (Focus::Query, BareKey::Tab | BareKey::Down) => Some(Event::FocusResults),
            (Focus::Query, BareKey::Esc) => Some(Event::CloseFocus),
            (Focus::Query, BareKey::Backspace) => Some(Event::Backspace),
            (Focus::Query, BareKey::Char(c)) if typing => Some(Event::Char(c)),

            (Focus::Results, BareKey::Char('n')) if ctrl => Some(Event::KeyDown),
            (Focus::Results, BareKey::Char('p')) if ctrl => Some(Event::KeyUp),
            (Focus::Results, BareKey::Down | BareKey::Char('j')) => Some(Event::KeyDown),
            (Focus::Results, BareKey::Up | BareKey::Char('k')) => Some(Event::KeyUp),
            (Focus::Results, BareKey::Enter) => Some(Event::OpenSelected),
            (Focus::Results, BareKey::Tab | BareKey::Esc | BareKey::Char('/')) => Some(Event::FocusQuery),
            (Focus::Results, BareKey::Char('q')) => Some(Event::CloseFocus),

            _ => None,
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::error!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::WebRequest { url, context } => {
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
            Action::PostToWorker(message) => Self::post_worker_message(&message),
            Action::OpenUrl { command, url } => {
                let context = BTreeMap::from([(OPEN_URL_CONTEXT.to_string(), url.clone())]);
                run_command(&[command.as_str(), url.as_str()], context);
            }
        }
    }
}
