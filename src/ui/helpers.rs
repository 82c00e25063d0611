//! Shared rendering utilities.
//!
//! All widths are measured in characters, not bytes, so titles with accents
//! or other multibyte characters line up.

use crate::ui::theme::Theme;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in characters.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Left and right padding that centers `text_width` within `cols`.
///
/// The left side gets the smaller half when the split is uneven.
#[must_use]
pub const fn center_padding(text_width: usize, cols: usize) -> (usize, usize) {
    let total = cols.saturating_sub(text_width);
    let left = total / 2;
    (left, total - left)
}

/// Prints `text` centered on `row`, filling the line with `style` applied.
pub fn print_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text: String = text.chars().take(cols).collect();
    let (left, right) = center_padding(char_width(&text), cols);

    position_cursor(row, 1);
    print!("{style}{}{text}{}{}", " ".repeat(left), " ".repeat(right), Theme::reset());
}

/// Splits `text` into lines of at most `width` characters, breaking at
/// spaces. Words longer than `width` are split mid-word.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }

        let line_width = char_width(&line);
        if line_width > 0 && line_width + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wraps the character ranges of `text` in match-highlight colors.
///
/// `base` is the style to restore after each highlighted section. Ranges are
/// `(start, end)` character indices; anything past the end of `text` is
/// ignored.
#[must_use]
pub fn highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let highlight = format!(
        "{}{}",
        Theme::fg(&theme.colors.match_highlight_fg),
        Theme::bg(&theme.colors.match_highlight_bg)
    );

    let mut out = String::with_capacity(text.len() * 2);
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.max(pos).min(chars.len());
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[pos..start]);
        out.push_str(&highlight);
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(base);
        pos = end;
    }

    out.extend(&chars[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_splits_padding() {
        assert_eq!(center_padding(4, 10), (3, 3));
        assert_eq!(center_padding(3, 10), (3, 4));
        assert_eq!(center_padding(20, 10), (0, 0));
    }

    #[test]
    fn highlighting_wraps_ranges_and_restores_base() {
        let theme = Theme::default();
        let base = Theme::fg(&theme.colors.title_fg);
        let out = highlighted_text("Mallorca", &[(0, 4)], &theme, &base);

        let highlight = format!(
            "{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg)
        );
        assert_eq!(out, format!("{highlight}Mall{}{base}orca", Theme::reset()));
    }

    #[test]
    fn highlighting_ignores_out_of_range() {
        let theme = Theme::default();
        assert_eq!(highlighted_text("abc", &[(5, 9)], &theme, ""), "abc");
        assert_eq!(highlighted_text("abc", &[], &theme, ""), "abc");
    }

    #[test]
    fn wrapping_breaks_at_spaces() {
        let lines = wrap_text("Data error from External API (message: HTTP error: status 500)", 30);
        assert_eq!(
            lines,
            vec![
                "Data error from External API",
                "(message: HTTP error: status",
                "500)",
            ]
        );
        assert!(lines.iter().all(|l| char_width(l) <= 30));
    }

    #[test]
    fn wrapping_splits_long_words() {
        assert_eq!(wrap_text("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
        assert_eq!(wrap_text("short", 80), vec!["short"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn width_counts_chars() {
        assert_eq!(char_width("ñandú"), 5);
    }
}
