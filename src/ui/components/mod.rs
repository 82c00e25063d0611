//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: title and request line
//! - [`search`]: query input and submit control
//! - [`results`]: result cards and the count line
//! - [`status`]: loading, error and empty panels
//! - [`footer`]: keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header - 2 lines]
//! [Border]
//! [Search box - 3 lines]
//! [Results area: cards, or one status panel]
//! [Summary]
//! [Border]
//! [Footer]
//! ```

mod footer;
mod header;
mod results;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultsView, UIViewModel};

use footer::render_footer;
use header::render_header;
use results::{render_cards, render_summary};
use search::render_search_bar;
use status::{render_empty_state, render_error, render_loading};

/// Renders a horizontal border line at `row` and returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Renders the whole frame.
///
/// The results area shows exactly one of: loading indicator, error panel,
/// empty-state message, or cards with a count line.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let summary_row = border_row.saturating_sub(1);

    match &vm.body {
        ResultsView::Loading { message } => render_loading(current_row, message, theme, cols),
        ResultsView::Error { title, message } => {
            render_error(current_row, border_row, title, message, theme, cols);
        }
        ResultsView::Empty(empty) => render_empty_state(current_row, empty, theme, cols),
        ResultsView::Cards { cards, summary, .. } => {
            render_cards(current_row, cards, theme);
            render_summary(summary_row, summary, theme, cols);
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
