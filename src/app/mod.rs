//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain, backend and
//! worker layers. Data flows one way:
//!
//! ```text
//! Keys → Events → handle_event → QueryStore / SearchTrigger → FetchController
//!                      ↑                                          ↓
//!                      └──── WebResponse / WorkerResponse ←── Actions
//! ```
//!
//! # Modules
//!
//! - [`query`]: the shared query string
//! - [`trigger`]: the monotonic search trigger
//! - [`fetch`]: the fetch controller and its observable state
//! - [`handler`]: event processing
//! - [`actions`]: side effects emitted by the handler
//! - [`modes`]: keyboard focus
//! - [`state`]: the state container and the render projector

pub mod actions;
pub mod fetch;
pub mod handler;
pub mod modes;
pub mod query;
pub mod state;
pub mod trigger;

pub use actions::Action;
pub use fetch::{FetchController, FetchPhase, FetchState, SearchRequest};
pub use handler::{handle_event, Event};
pub use modes::Focus;
pub use query::QueryStore;
pub use state::AppState;
pub use trigger::SearchTrigger;
