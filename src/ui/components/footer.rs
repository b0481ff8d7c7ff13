//! Footer component renderer.

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints on the footer line, dimmed and left-aligned
/// inside the context area. Hints were already truncated to fit.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, col: usize, width: usize) {
    position_cursor(out, footer.line, col);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push(' ');
    out.push_str(&pad(&footer.keybindings, width.saturating_sub(1)));
    out.push_str(Theme::reset());
}
