//! Single-message panels for the results area: loading, error, and empty.

use crate::ui::helpers::{print_centered, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Rows skipped above a status panel so it sits below the search box.
const PANEL_OFFSET: usize = 2;

/// Renders the loading indicator. Nothing else appears in the results area.
pub fn render_loading(row: usize, message: &str, theme: &Theme, cols: usize) {
    let style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.loading_fg));
    print_centered(row + PANEL_OFFSET, &format!("⟳ {message}"), &style, cols);
}

/// Renders the error panel: a bold title followed by the message, wrapped to
/// the pane width. Lines that would reach `bottom` are dropped.
pub fn render_error(row: usize, bottom: usize, title: &str, message: &str, theme: &Theme, cols: usize) {
    let title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg));
    print_centered(row + PANEL_OFFSET, title, &title_style, cols);

    let style = Theme::fg(&theme.colors.error_fg);
    let first = row + PANEL_OFFSET + 1;
    for (offset, line) in wrap_text(message, cols.saturating_sub(2)).iter().enumerate() {
        if first + offset >= bottom {
            break;
        }
        print_centered(first + offset, line, &style, cols);
    }
}

/// Renders the no-results message and its hint.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    print_centered(row + PANEL_OFFSET, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);
    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(row + PANEL_OFFSET + 1, &empty.subtitle, &subtitle_style, cols);
}
