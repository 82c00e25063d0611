//! Search form renderer: a bordered query input with the submit control on
//! the right.
//!
//! ```text
//!      ┌──────────────────────────────────────────────┐
//!      │ Query: mallorca█                  [ Search ] │
//!      └──────────────────────────────────────────────┘
//! ```

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the three-row search box at `row` and returns the next free row.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        Theme::fg(&theme.colors.search_bar_border)
    } else {
        Theme::fg(&theme.colors.border)
    };
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let button = format!("[ {} ]", search.submit_label);
    let button_style = if search.submit_enabled {
        format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.button_fg),
            Theme::bg(&theme.colors.button_bg)
        )
    } else {
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.button_disabled_fg))
    };

    let cursor = if search.focused && search.input_enabled { "█" } else { "" };
    let query_room = inner_width.saturating_sub(char_width(&button) + 10);
    let query: String = search.query.chars().take(query_room).collect();
    let input = format!(" Query: {query}{cursor}");
    let input_style = if search.input_enabled {
        Theme::fg(&theme.colors.text_normal)
    } else {
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))
    };
    let gap = inner_width.saturating_sub(char_width(&input) + char_width(&button) + 1);

    position_cursor(row + 1, 1);
    print!("{margin}{border}│{}{input_style}{input}", Theme::reset());
    print!("{}", " ".repeat(gap));
    print!("{}{button_style}{button}{} ", Theme::reset(), Theme::reset());
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
