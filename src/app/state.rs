//! Application state and view model computation.
//!
//! [`AppState`] bundles the query store, the search trigger and the fetch
//! controller with the presentation state (focus, selection, theme). The
//! render projector, [`AppState::compute_viewmodel`], is a pure function of
//! this state and the pane size.
//!
//! # Render priority
//!
//! 1. Loading: indicator only, submit disabled.
//! 2. Error: error panel only.
//! 3. No results: explicit empty-state message.
//! 4. Results: one card per result plus a trailing count.

use super::fetch::{FetchController, FetchState};
use super::modes::Focus;
use super::query::QueryStore;
use super::trigger::SearchTrigger;
use crate::backend::Backend;
use crate::domain::SearchResult;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, ResultCard, ResultsView, SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows occupied by one result card (title, snippet, URL, spacer).
pub const CARD_HEIGHT: usize = 4;

/// Rows used by everything except the cards: blank line, two header rows,
/// border, three-row search box, summary, border, footer.
const CHROME_ROWS: usize = 10;

/// Columns kept free on each side of card text.
const CARD_MARGIN: usize = 2;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub query: QueryStore,
    pub trigger: SearchTrigger,
    /// Sole owner of the loading/error/results state.
    pub fetch: FetchController,
    pub backend: Backend,
    pub focus: Focus,
    /// Index of the selected card within the current results.
    pub selected_index: usize,
    pub theme: Theme,
    /// Program used to open result URLs.
    pub open_command: String,
    /// Set once the initial search (trigger value 0) has fired.
    pub mounted: bool,
    /// The host refused web access. Only the HTTP backend is affected.
    pub web_access_denied: bool,
}

impl AppState {
    /// Creates an unmounted state. Nothing is fetched until the mount event.
    #[must_use]
    pub fn new(initial_query: impl Into<String>, backend: Backend, theme: Theme, open_command: impl Into<String>) -> Self {
        Self {
            query: QueryStore::new(initial_query),
            trigger: SearchTrigger::default(),
            fetch: FetchController::new(backend.source_label()),
            backend,
            focus: Focus::Query,
            selected_index: 0,
            theme,
            open_command: open_command.into(),
            mounted: false,
            web_access_denied: false,
        }
    }

    #[must_use]
    pub const fn fetch_state(&self) -> &FetchState {
        self.fetch.state()
    }

    /// Whether the query input accepts edits. Locked while a request is loading.
    #[must_use]
    pub const fn input_enabled(&self) -> bool {
        !self.fetch.state().loading
    }

    /// Whether the backend can be reached at all. The host drops web requests
    /// made without web access and never answers them.
    #[must_use]
    pub const fn can_fetch(&self) -> bool {
        self.backend.is_mock() || !self.web_access_denied
    }

    /// Whether the submit control is active: mounted, backend reachable, not
    /// loading, non-blank query.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.mounted && self.can_fetch() && !self.fetch.state().loading && !self.query.is_blank()
    }

    /// Results the user can interact with: only those of a settled,
    /// successful request.
    #[must_use]
    pub fn visible_results(&self) -> &[SearchResult] {
        let state = self.fetch.state();
        if state.loading || state.error.is_some() {
            &[]
        } else {
            state.results.as_slice()
        }
    }

    /// Moves the card selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the card selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.visible_results().get(self.selected_index)
    }

    /// Keeps the selection in bounds after results change, and returns focus
    /// to the query when there is nothing left to navigate.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            self.selected_index = 0;
            self.focus = Focus::Query;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// Computes the view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            body: self.compute_body(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.backend.is_mock() {
            " Simple Search App (MOCKED) "
        } else {
            " Simple Search App "
        };

        HeaderInfo {
            title: title.to_string(),
            request_line: format!("GET {}", self.backend.request_url(self.query.query())),
            status: self
                .fetch
                .settled_at()
                .map(|at| format!("last updated {}", at.format("%H:%M:%S UTC"))),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let loading = self.fetch.state().loading;
        SearchBarInfo {
            query: self.query.query().to_string(),
            input_enabled: self.input_enabled(),
            submit_enabled: self.submit_enabled(),
            submit_label: if loading { "Searching..." } else { "Search" }.to_string(),
            focused: self.focus == Focus::Query,
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> ResultsView {
        let state = self.fetch.state();

        if state.loading {
            let source = if self.backend.is_mock() { "mock API" } else { "search API" };
            return ResultsView::Loading {
                message: format!("Loading results from {source}..."),
            };
        }

        if let Some(message) = &state.error {
            return ResultsView::Error {
                title: "Error".to_string(),
                message: message.clone(),
            };
        }

        if state.results.is_empty() {
            return ResultsView::Empty(self.compute_empty_state());
        }

        let total = state.results.len();
        let per_page = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);
        let (start, end) = visible_window(self.selected_index, per_page, total);

        let matcher = if self.query.is_blank() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };
        let text_width = cols.saturating_sub(CARD_MARGIN * 2);

        let cards = state.results[start..end]
            .iter()
            .enumerate()
            .map(|(offset, result)| {
                let index = start + offset;
                ResultCard {
                    position: index + 1,
                    title: truncate(&result.title, text_width),
                    snippet: truncate(&result.snippet, text_width),
                    url: truncate(&result.url, text_width),
                    is_selected: self.focus == Focus::Results && index == self.selected_index,
                    highlight_ranges: matcher
                        .as_ref()
                        .map_or_else(Vec::new, |m| highlight_ranges(m, &result.title, self.query.query())),
                }
            })
            .collect();

        let label = if self.backend.is_mock() { "mocked results" } else { "results" };
        ResultsView::Cards {
            cards,
            summary: format!("Displaying {total} {label}."),
            total,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let kind = if self.backend.is_mock() { "mock results" } else { "results" };
        let subtitle = if self.query.is_blank() {
            "Type a query to search"
        } else {
            "Edit the query and press Enter to search again"
        };

        EmptyState {
            message: format!("No {kind} found for \"{}\".", self.query.query()),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::Query if self.fetch.state().loading => "Searching...  Esc: quit",
            Focus::Query => "Enter: search  Tab: results  Ctrl+u: clear  Esc: quit",
            Focus::Results => "j/k or Ctrl+n/p: navigate  Enter: open  Tab or /: edit query  Esc: back",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Window of `per_page` items containing `selected`, as `(start, end)`.
///
/// The selection sits mid-window when possible; near either end the window
/// is pushed inward so it stays full.
fn visible_window(selected: usize, per_page: usize, total: usize) -> (usize, usize) {
    if total <= per_page {
        return (0, total);
    }
    let start = selected.saturating_sub(per_page / 2).min(total - per_page);
    (start, start + per_page)
}

/// Cuts `text` to `width` characters, marking the cut with `...`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Coalesces fuzzy-match character indices into `(start, end)` ranges.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query.trim()) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FetchError;

    fn mounted_state(query: &str, backend: Backend) -> AppState {
        let mut state = AppState::new(query, backend, Theme::default(), "xdg-open");
        state.mounted = true;
        state
    }

    fn http() -> Backend {
        Backend::Http {
            endpoint: "http://localhost:8000/api/search".to_string(),
        }
    }

    fn settle_with(state: &mut AppState, results: Vec<SearchResult>) {
        let trigger = state.trigger.request_search();
        state
            .fetch
            .observe_trigger(trigger, state.query.query(), &state.backend)
            .unwrap();
        state.fetch.settle(trigger, Ok(results));
    }

    fn sample(n: usize) -> Vec<SearchResult> {
        (1..=n)
            .map(|i| SearchResult::new(i.to_string(), format!("Title {i}"), "snippet", format!("https://example.com/{i}")))
            .collect()
    }

    #[test]
    fn loading_shows_indicator_and_disables_submit() {
        let mut state = mounted_state("mallorca", Backend::Mock);
        state.fetch.observe_trigger(0, "mallorca", &Backend::Mock).unwrap();

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(
            vm.body,
            ResultsView::Loading {
                message: "Loading results from mock API...".to_string()
            }
        );
        assert!(!vm.search_bar.submit_enabled);
        assert!(!vm.search_bar.input_enabled);
        assert_eq!(vm.search_bar.submit_label, "Searching...");
    }

    #[test]
    fn error_panel_replaces_results() {
        let mut state = mounted_state("q", http());
        let trigger = state.trigger.request_search();
        state.fetch.observe_trigger(trigger, "q", &state.backend).unwrap();
        state.fetch.settle(trigger, Err(FetchError::status(500, b"")));

        let vm = state.compute_viewmodel(24, 80);
        match vm.body {
            ResultsView::Error { title, message } => {
                assert_eq!(title, "Error");
                assert!(message.contains("500"));
            }
            other => panic!("expected error panel, got {other:?}"),
        }
        assert!(vm.search_bar.submit_enabled);
    }

    #[test]
    fn empty_results_show_no_results_message() {
        let mut state = mounted_state("mallorca", http());
        settle_with(&mut state, vec![]);

        let vm = state.compute_viewmodel(24, 80);
        let ResultsView::Empty(empty) = vm.body else {
            panic!("expected empty state");
        };
        assert_eq!(empty.message, "No results found for \"mallorca\".");
    }

    #[test]
    fn whitespace_query_disables_submit_and_shows_nothing_pending() {
        let state = mounted_state("   ", http());
        let vm = state.compute_viewmodel(24, 80);

        assert!(!vm.search_bar.submit_enabled);
        assert!(matches!(vm.body, ResultsView::Empty(_)));
    }

    #[test]
    fn submit_disabled_before_mount() {
        let state = AppState::new("mallorca", http(), Theme::default(), "xdg-open");
        assert!(!state.submit_enabled());
    }

    #[test]
    fn mocked_single_result_scenario() {
        let mut state = mounted_state("mallorca", Backend::Mock);
        settle_with(
            &mut state,
            vec![SearchResult::new("1", "Mallorca Guide", "...", "http://x")],
        );

        let vm = state.compute_viewmodel(24, 80);
        let ResultsView::Cards { cards, summary, total } = vm.body else {
            panic!("expected cards");
        };
        assert_eq!(total, 1);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Mallorca Guide");
        assert_eq!(cards[0].url, "http://x");
        assert_eq!(summary, "Displaying 1 mocked results.");
    }

    #[test]
    fn cards_follow_response_order_and_count() {
        let mut state = mounted_state("title", http());
        settle_with(&mut state, sample(3));

        let vm = state.compute_viewmodel(40, 80);
        let ResultsView::Cards { cards, summary, total } = vm.body else {
            panic!("expected cards");
        };
        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Title 1", "Title 2", "Title 3"]);
        assert_eq!(total, 3);
        assert_eq!(summary, "Displaying 3 results.");
    }

    #[test]
    fn window_follows_selection_but_count_covers_all() {
        let mut state = mounted_state("title", http());
        settle_with(&mut state, sample(20));
        state.focus = Focus::Results;
        state.selected_index = 19;

        // 10 chrome rows + 3 cards of 4 rows.
        let vm = state.compute_viewmodel(22, 80);
        let ResultsView::Cards { cards, total, .. } = vm.body else {
            panic!("expected cards");
        };
        assert_eq!(total, 20);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards.last().unwrap().position, 20);
        assert!(cards.last().unwrap().is_selected);
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = mounted_state("q", http());
        settle_with(&mut state, sample(3));

        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);

        state.selected_index = 2;
        state.focus = Focus::Results;
        settle_with(&mut state, sample(1));
        state.clamp_selection();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_result().unwrap().id, "1");

        settle_with(&mut state, vec![]);
        state.clamp_selection();
        assert_eq!(state.focus, Focus::Query);
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges(&matcher, "Mallorca Guide", "mall"), vec![(0, 4)]);
        assert!(highlight_ranges(&matcher, "Ibiza", "zzz").is_empty());
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ñandú-ñandú", 8), "ñandú...");
    }

    #[test]
    fn request_line_tracks_current_query() {
        let state = mounted_state("palma beach", http());
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(
            vm.header.request_line,
            "GET http://localhost:8000/api/search?q=palma%20beach"
        );
        assert_eq!(vm.header.status, None);
    }
}
