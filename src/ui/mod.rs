//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: rendering entry point
//! - [`components`]: per-section renderers
//! - [`helpers`]: cursor movement, centering, match highlighting
//! - [`theme`]: color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{EmptyState, FooterInfo, HeaderInfo, ResultCard, ResultsView, SearchBarInfo, UIViewModel};
