//! Result card renderer.
//!
//! Each card takes four rows: title (with query matches highlighted), snippet,
//! URL, and a spacer. The selected card carries a marker in the left gutter.

use crate::ui::helpers::{highlighted_text, position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ResultCard;

/// Renders `cards` from `row` on and returns the next free row.
pub fn render_cards(row: usize, cards: &[ResultCard], theme: &Theme) -> usize {
    let mut current_row = row;
    for card in cards {
        current_row = render_card(current_row, card, theme);
    }
    current_row
}

fn render_card(row: usize, card: &ResultCard, theme: &Theme) -> usize {
    let gutter = if card.is_selected {
        format!(
            "{}{}▌{} ",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg),
            Theme::reset()
        )
    } else {
        "  ".to_string()
    };

    let title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.title_fg));
    position_cursor(row, 1);
    print!(
        "{gutter}{title_style}{}{}",
        highlighted_text(&card.title, &card.highlight_ranges, theme, &title_style),
        Theme::reset()
    );

    position_cursor(row + 1, 1);
    print!("  {}{}{}", Theme::fg(&theme.colors.text_normal), card.snippet, Theme::reset());

    position_cursor(row + 2, 1);
    print!(
        "  {}{}{}{}",
        Theme::underline(),
        Theme::fg(&theme.colors.link_fg),
        card.url,
        Theme::reset()
    );

    row + 4
}

/// Renders the trailing `Displaying N results.` line.
pub fn render_summary(row: usize, summary: &str, theme: &Theme, cols: usize) {
    print_centered(row, summary, &Theme::fg(&theme.colors.text_dim), cols);
}
