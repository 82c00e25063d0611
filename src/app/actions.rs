//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij. It mutates [`AppState`] and returns
//! a `Vec<Action>` describing the effects to perform; the plugin shim executes
//! them in order.
//!
//! [`AppState`]: crate::app::AppState
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use zearch::app::Action;
//!
//! let action = Action::WebRequest {
//!     url: "http://localhost:8000/api/search?q=mallorca".to_string(),
//!     context: BTreeMap::from([("trigger".to_string(), "0".to_string())]),
//! };
//! assert!(matches!(action, Action::WebRequest { .. }));
//! ```

use crate::worker::WorkerMessage;
use std::collections::BTreeMap;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends an HTTP GET through the host.
    ///
    /// The host answers with a web request result event carrying `context`
    /// back unchanged, which is how the settlement finds its trigger.
    WebRequest {
        /// Full request URL including the encoded `q` parameter.
        url: String,
        /// Opaque key/value pairs echoed back with the response.
        context: BTreeMap<String, String>,
    },

    /// Posts a message to the background mock search worker.
    PostToWorker(WorkerMessage),

    /// Opens a result URL with the configured opener command.
    OpenUrl {
        /// Program to run, e.g. `xdg-open`.
        command: String,
        /// URL of the selected result card.
        url: String,
    },
}
