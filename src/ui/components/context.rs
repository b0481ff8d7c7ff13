//! Context rail body renderer.
//!
//! Renders group labels and rows of the current section. Parent rows carry a
//! right-aligned caret; expanded parents are followed by their indented
//! children. Labels were already truncated by the view model, so highlight
//! ranges line up with the text drawn here.

use crate::ui::helpers::{self, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{row_indent, BodyInfo, BodyLine, DisplayRow};

/// Renders every body line.
pub fn render_context(out: &mut String, body: &BodyInfo, theme: &Theme) {
    for line in &body.lines {
        match line {
            BodyLine::Group { line, label } => render_group(out, *line, label, body, theme),
            BodyLine::Row(row) => render_row(out, row, body, theme),
        }
    }
}

fn render_group(out: &mut String, line: usize, label: &str, body: &BodyInfo, theme: &Theme) {
    position_cursor(out, line, body.col);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.group_label_fg));
    out.push(' ');
    out.push_str(&pad(label, body.width.saturating_sub(1)));
    out.push_str(Theme::reset());
}

/// Style prefix for a row; also re-applied after each highlighted match.
///
/// # Styling Precedence
///
/// 1. Keyboard selection
/// 2. Active row
/// 3. Normal text
fn row_style(row: &DisplayRow, theme: &Theme) -> String {
    if row.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else if row.is_active {
        format!(
            "{}{}{}",
            Theme::fg(&theme.colors.active_fg),
            Theme::bg(&theme.colors.active_bg),
            Theme::bold()
        )
    } else if row.depth > 0 {
        Theme::fg(&theme.colors.text_dim)
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

/// Renders one row across the full body width.
///
/// # Layout
///
/// ```text
///  ☰ Due today                     ▾
///      Bug fixes
/// ```
fn render_row(out: &mut String, row: &DisplayRow, body: &BodyInfo, theme: &Theme) {
    let style = row_style(row, theme);
    let indent = row_indent(row.depth);

    position_cursor(out, row.line, body.col);
    out.push_str(&style);
    out.push_str(&" ".repeat(body.width));

    position_cursor(out, row.line, body.col);
    match row.icon {
        Some(icon) => {
            out.push(' ');
            out.push(icon);
            out.push_str(&" ".repeat(indent - 2));
        }
        None => out.push_str(&" ".repeat(indent)),
    }

    helpers::render_highlighted_text(out, &row.label, &row.highlight_ranges, theme, &style);

    if let Some(caret) = row.caret {
        position_cursor(out, row.line, body.caret_col());
        out.push(caret);
    }

    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::RowId;

    fn row(label: &str, depth: usize, caret: Option<char>) -> DisplayRow {
        DisplayRow {
            line: 5,
            id: RowId(0),
            depth,
            icon: (depth == 0).then_some('☰'),
            label: label.to_string(),
            highlight_ranges: Vec::new(),
            caret,
            is_active: false,
            is_selected: false,
        }
    }

    fn body(lines: Vec<BodyLine>) -> BodyInfo {
        BodyInfo { col: 4, width: 30, lines }
    }

    #[test]
    fn test_parent_row_has_caret_at_right_edge() {
        let theme = Theme::default();
        let body = body(vec![BodyLine::Row(row("Due today", 0, Some('▸')))]);
        let mut out = String::new();
        render_context(&mut out, &body, &theme);

        assert!(out.contains(" ☰ Due today"));
        // caret_col = 4 + 30 - 2 = 32, 1-based 33
        assert!(out.contains("\u{1b}[6;33H▸"));
    }

    #[test]
    fn test_child_row_is_indented() {
        let theme = Theme::default();
        let body = body(vec![BodyLine::Row(row("Bug fixes", 1, None))]);
        let mut out = String::new();
        render_context(&mut out, &body, &theme);

        assert!(out.contains("     Bug fixes"));
        assert!(out.contains(&Theme::fg(&theme.colors.text_dim)));
    }

    #[test]
    fn test_selected_row_uses_selection_colors() {
        let theme = Theme::default();
        let mut selected = row("Inbox", 0, None);
        selected.is_selected = true;
        selected.is_active = true;
        let body = body(vec![BodyLine::Row(selected)]);
        let mut out = String::new();
        render_context(&mut out, &body, &theme);

        assert!(out.contains(&Theme::bg(&theme.colors.selection_bg)));
        assert!(!out.contains(&Theme::bg(&theme.colors.active_bg)));
    }

    #[test]
    fn test_group_label() {
        let theme = Theme::default();
        let body = body(vec![BodyLine::Group { line: 4, label: "My Tasks".to_string() }]);
        let mut out = String::new();
        render_context(&mut out, &body, &theme);
        assert!(out.contains("\u{1b}[5;5H"));
        assert!(out.contains(" My Tasks"));
    }
}
