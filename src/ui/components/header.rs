//! Header component renderer.
//!
//! Two rows: the centered title, then the request line with the time of the
//! last settlement on the right.

use crate::ui::helpers::{char_width, position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header starting at `row` and returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let mut style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        style.push_str(&Theme::bg(bg));
    }
    print_centered(row, &header.title, &style, cols);

    let status = header.status.as_deref().unwrap_or("");
    let status_width = char_width(status);
    let request_width = cols.saturating_sub(status_width + 3);
    let request: String = header.request_line.chars().take(request_width).collect();
    let gap = cols.saturating_sub(1 + char_width(&request) + status_width + 1);

    position_cursor(row + 1, 1);
    print!(" {}{request}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(gap));
    print!("{}{}{status} {}", Theme::dim(), Theme::fg(&theme.colors.text_dim), Theme::reset());

    row + 2
}
