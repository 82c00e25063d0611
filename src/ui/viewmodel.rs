//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel` and consumed by the renderer. They hold
//! display-ready strings and flags only, so everything the user can see is
//! decided before a single escape sequence is printed.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// What the results area shows. Exactly one variant is rendered.
    pub body: ResultsView,
    pub footer: FooterInfo,
}

/// Title bar and request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// The request the current query maps to, e.g. `GET /api/search?q=mallorca`.
    pub request_line: String,
    /// Time of the last settlement, if any.
    pub status: Option<String>,
}

/// Search form: query input plus submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// False while a request is loading.
    pub input_enabled: bool,
    /// False while loading or when the query is blank.
    pub submit_enabled: bool,
    /// `Search` or `Searching...`.
    pub submit_label: String,
    /// Whether keyboard focus is on the input.
    pub focused: bool,
}

/// The results area, in render priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// A request is in flight. Errors and empty-state text are suppressed.
    Loading {
        message: String,
    },
    /// The last request failed. The result list is suppressed.
    Error {
        title: String,
        message: String,
    },
    /// The last settlement had no results.
    Empty(EmptyState),
    /// One card per result, in response order.
    Cards {
        /// Cards inside the visible window.
        cards: Vec<ResultCard>,
        /// Trailing count line, e.g. `Displaying 3 results.`
        summary: String,
        /// Total number of results in the response.
        total: usize,
    },
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g. `No results found for "mallorca".`).
    pub message: String,
    /// Secondary hint.
    pub subtitle: String,
}

/// One search result, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    /// 1-based position in the response.
    pub position: usize,
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub is_selected: bool,
    /// Character ranges of `title` matching the query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Footer help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
