//! Search row component renderer.
//!
//! This module renders the search input line. While the rail is collapsed only
//! the search glyph is shown, which still acts as a click target.

use crate::ui::helpers::position_cursor;
use crate::ui::icons::glyph;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Text shown in an empty, expanded search row.
pub const PLACEHOLDER: &str = "Search";

/// Renders the search row.
///
/// # Layout
///
/// ```text
/// │ ⌕ stake▏                          │   focused
/// │ ⌕ Search                          │   empty, unfocused
/// │ ⌕                                 │   collapsed
/// ```
///
/// Focus is shown by coloring the glyph with `search_focus_fg` and appending a
/// bar cursor after the input.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme) {
    position_cursor(out, search.line, search.col);
    out.push_str(&" ".repeat(search.width));

    position_cursor(out, search.line, search.col + 1);
    let glyph_color = if search.is_focused {
        &theme.colors.search_focus_fg
    } else {
        &theme.colors.search_bar_border
    };
    out.push_str(&Theme::fg(glyph_color));
    out.push(glyph("search"));
    out.push_str(Theme::reset());

    if search.is_collapsed {
        return;
    }

    out.push(' ');
    if search.input.is_empty() && !search.is_focused {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(PLACEHOLDER);
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&search.input);
        if search.is_focused {
            out.push_str(&Theme::fg(&theme.colors.search_focus_fg));
            out.push('▏');
        }
    }
    out.push_str(Theme::reset());
}
