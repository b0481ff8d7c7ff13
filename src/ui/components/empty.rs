//! Empty state component renderer.
//!
//! Shown in place of the body when a filter leaves nothing visible or a
//! section has no rows at all.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message centered within the context area.
///
/// # Parameters
///
/// * `empty` - Message and the body line it goes on
/// * `theme` - Active color theme
/// * `col` - First column of the context area
/// * `width` - Width of the context area
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, col: usize, width: usize) {
    let message = truncate(&empty.message, width.saturating_sub(2));
    let padding = width.saturating_sub(message.chars().count()) / 2;

    position_cursor(out, empty.line, col + padding);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&message);
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_centered() {
        let empty = EmptyState { line: 5, message: "No matches".to_string() };
        let mut out = String::new();
        render_empty_state(&mut out, &empty, &Theme::default(), 4, 30);

        // (30 - 10) / 2 = 10 columns into the context area
        assert!(out.starts_with("\u{1b}[6;15H"));
        assert!(out.contains("No matches"));
    }
}
