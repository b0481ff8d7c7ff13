//! Header component renderer.
//!
//! Draws the section title on the left of the context area and the collapse
//! and theme controls on the right.

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ControlInfo, HeaderInfo};

/// Renders the header line.
///
/// # Layout
///
/// ```text
/// │ Tasks               « Collapse  ☾ │
/// ```
///
/// The title is omitted while the rail is collapsed; the controls stay so the
/// rail can be expanded again with the mouse.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme) {
    position_cursor(out, header.line, header.col);
    out.push_str(&" ".repeat(header.width));

    if let Some(title) = &header.title {
        position_cursor(out, header.line, header.col + 1);
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.header_fg));
        out.push_str(title);
        out.push_str(Theme::reset());
    }

    render_control(out, header.line, &header.collapse, theme);
    render_control(out, header.line, &header.theme_toggle, theme);
}

fn render_control(out: &mut String, line: usize, control: &ControlInfo, theme: &Theme) {
    position_cursor(out, line, control.col);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push(control.icon);
    if !control.label.is_empty() {
        out.push(' ');
        out.push_str(&pad(&control.label, control.width() - 2));
    }
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(title: Option<&str>) -> HeaderInfo {
        HeaderInfo {
            line: 0,
            col: 4,
            width: 40,
            title: title.map(str::to_string),
            collapse: ControlInfo { col: 30, icon: '«', label: "Collapse".to_string() },
            theme_toggle: ControlInfo { col: 42, icon: '☾', label: String::new() },
            theme_toggle_title: "Switch to dark theme".to_string(),
        }
    }

    #[test]
    fn test_header_draws_title_and_controls() {
        let mut out = String::new();
        render_header(&mut out, &header(Some("Tasks")), &Theme::default());

        assert!(out.contains("\u{1b}[1;6H"));
        assert!(out.contains("Tasks"));
        assert!(out.contains("« Collapse"));
        assert!(out.contains("\u{1b}[1;43H"));
        assert!(out.contains('☾'));
    }

    #[test]
    fn test_collapsed_header_has_no_title() {
        let mut out = String::new();
        render_header(&mut out, &header(None), &Theme::default());
        assert!(!out.contains("Tasks"));
        assert!(out.contains('«'));
    }
}
