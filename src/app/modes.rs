//! Input focus state for the application.
//!
//! The plugin has two places keyboard input can go:
//!
//! - **Query**: the search input; characters edit the query, `Enter` submits.
//! - **Results**: the card list; `j`/`k` move the selection, `Enter` opens the
//!   selected card's URL.
//!
//! # Example
//!
//! ```
//! use zearch::app::Focus;
//!
//! assert_eq!(Focus::default(), Focus::Query);
//! ```

/// Where keyboard input is routed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Typing into the search input.
    ///
    /// Accepts characters, backspace, `Enter` (submit) and `Tab` (move to results).
    #[default]
    Query,

    /// Navigating the result cards.
    ///
    /// Accepts j/k or arrows to move, `Enter` to open, `Tab`/`/`/`Esc` to go
    /// back to the query.
    Results,
}
