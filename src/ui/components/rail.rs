//! Icon rail component renderer.
//!
//! The rail is a fixed column of section buttons on the left edge of the pane.
//! It is always drawn, collapsed or not, as long as the pane is wide enough.

use crate::ui::helpers::position_cursor;
use crate::ui::layout::RAIL_WIDTH;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{RailButton, RailInfo};

/// Renders the rail background, its right separator and every button.
///
/// # Layout
///
/// ```text
///  ▦ │
///    │
/// ›✓ │   ← cursor marker in column 0, active section on a highlighted cell
/// ```
pub fn render_rail(out: &mut String, rail: &RailInfo, theme: &Theme, rows: usize, cols: usize) {
    if cols < RAIL_WIDTH {
        return;
    }

    for line in 0..rows {
        position_cursor(out, line, 0);
        out.push_str(&Theme::bg(&theme.colors.rail_bg));
        out.push_str(&" ".repeat(RAIL_WIDTH - 1));
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.border));
        out.push('│');
        out.push_str(Theme::reset());
    }

    for button in &rail.buttons {
        render_button(out, button, theme);
    }
}

fn render_button(out: &mut String, button: &RailButton, theme: &Theme) {
    position_cursor(out, button.line, 0);

    if button.is_active {
        out.push_str(&Theme::fg(&theme.colors.rail_active_fg));
        out.push_str(&Theme::bg(&theme.colors.rail_active_bg));
        out.push_str(Theme::bold());
    } else {
        out.push_str(&Theme::fg(&theme.colors.rail_fg));
        out.push_str(&Theme::bg(&theme.colors.rail_bg));
    }

    out.push(if button.is_cursor { '›' } else { ' ' });
    out.push(button.icon);
    out.push(' ');
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(line: usize, is_active: bool, is_cursor: bool) -> RailButton {
        RailButton {
            line,
            index: line / 2,
            icon: '✓',
            title: "Tasks".to_string(),
            is_active,
            is_cursor,
        }
    }

    #[test]
    fn test_active_button_uses_active_colors() {
        let theme = Theme::default();
        let rail = RailInfo { buttons: vec![button(0, false, false), button(2, true, true)] };
        let mut out = String::new();
        render_rail(&mut out, &rail, &theme, 4, 40);

        let active = format!(
            "{}{}{}›✓ ",
            Theme::fg(&theme.colors.rail_active_fg),
            Theme::bg(&theme.colors.rail_active_bg),
            Theme::bold()
        );
        assert!(out.contains(&format!("\u{1b}[3;1H{active}")));
        assert!(out.contains(" ✓ "));
    }

    #[test]
    fn test_too_narrow_draws_nothing() {
        let rail = RailInfo { buttons: vec![] };
        let mut out = String::new();
        render_rail(&mut out, &rail, &Theme::default(), 10, 2);
        assert!(out.is_empty());
    }
}
