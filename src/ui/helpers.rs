//! Shared rendering utilities.
//!
//! Components append ANSI-styled text to a frame buffer rather than printing
//! directly, so a whole frame can be assembled and inspected before it is
//! written to stdout. All width math counts chars, not bytes.

use crate::ui::theme::Theme;

/// Marker appended to text cut short by [`truncate`].
pub const ELLIPSIS: char = '…';

/// Appends a cursor move to a 0-based `line` and `col`.
///
/// The escape sequence itself is 1-indexed.
pub fn position_cursor(out: &mut String, line: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{};{}H", line + 1, col + 1));
}

/// Cuts `text` to at most `max` chars, ending in [`ELLIPSIS`] when shortened.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Keeps the last `max` chars of `text`, so the caret end of an input stays visible.
#[must_use]
pub fn tail(text: &str, max: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(max)).collect()
}

/// Right-pads with spaces to exactly `width` chars (never truncates).
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(count)))
}

/// Appends `text` with the char ranges in `ranges` highlighted as query matches.
///
/// `restore` is re-applied after each highlight so the surrounding row styling
/// (selection or active background) continues past the match.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    restore: &str,
) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }

        out.extend(&chars[pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        pos = end;
    }

    out.extend(&chars[pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Executive Summary", 40), "Executive Summary");
        assert_eq!(truncate("Executive Summary", 10), "Executive…");
        assert_eq!(truncate("Executive Summary", 9), "Executiv…");
        assert_eq!(truncate("Executive", 9), "Executive");
        assert_eq!(truncate("Executive", 0), "");
    }

    #[test]
    fn test_tail_and_pad() {
        assert_eq!(tail("stakeholder", 6), "holder");
        assert_eq!(tail("abc", 6), "abc");
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_highlight_wraps_matches() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Bug fixes", &[(0, 3)], &theme, "");

        let highlight = format!(
            "{}{}Bug{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset()
        );
        assert_eq!(out, format!("{highlight} fixes"));
    }

    #[test]
    fn test_position_cursor_is_one_based() {
        let mut out = String::new();
        position_cursor(&mut out, 0, 4);
        assert_eq!(out, "\u{1b}[1;5H");
    }
}
