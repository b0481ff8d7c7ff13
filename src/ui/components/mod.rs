//! Composable UI component renderers.
//!
//! Each component appends the ANSI output for one part of the pane to a frame
//! buffer. Components never decide *what* to show; that was settled when the
//! view model was computed. They only decide *how* it looks.
//!
//! # Components
//!
//! - `rail`: Icon rail column with the active section highlighted
//! - `header`: Section title with collapse and theme controls
//! - `search`: Search row (input, placeholder or bare glyph)
//! - `context`: Group labels, rows, children and carets
//! - `empty`: Message shown when nothing is visible
//! - `footer`: Keybinding hints
//!
//! # Example
//!
//! ```rust
//! use navrail::ui::components::render_frame;
//! use navrail::ui::Theme;
//! # use navrail::app::AppState;
//! # use navrail::domain::{Catalog, ThemeMode};
//! # use navrail::ui::ThemeSet;
//! # let state = AppState::new(Catalog::builtin(), ThemeSet::default(), ThemeMode::Light);
//!
//! let vm = state.compute_viewmodel(24, 60);
//! let mut out = String::new();
//! render_frame(&mut out, &vm, &Theme::default());
//! assert!(out.contains("Dashboard"));
//! ```

mod context;
mod empty;
mod footer;
mod header;
mod rail;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::layout::RAIL_WIDTH;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use context::render_context;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use rail::render_rail;
use search::render_search_bar;

/// Appends a horizontal separator starting at `col`.
///
/// Used under the header, under the search row and above the footer.
fn render_border(out: &mut String, line: usize, col: usize, width: usize, color: &str) {
    position_cursor(out, line, col);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(width));
    out.push_str(Theme::reset());
}

/// Renders every component present in `vm`.
///
/// Layout structure:
/// ```text
/// [Rail] [Header]
/// [Rail] [Border]
/// [Rail] [Search]
/// [Rail] [Border]
/// [Rail] [Body rows or empty state]
/// [Rail] [Border]
/// [Rail] [Footer]
/// ```
///
/// Missing parts of the view model (small panes) are skipped along with their
/// separators.
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme) {
    render_rail(out, &vm.rail, theme, vm.rows, vm.cols);

    if let Some(header) = &vm.header {
        render_header(out, header, theme);
    }

    if let Some(search) = &vm.search_bar {
        let color = &theme.colors.border;
        if search.line > 0 {
            render_border(out, search.line - 1, search.col, search.width, color);
        }
        render_search_bar(out, search, theme);
        if search.line + 1 < vm.rows {
            render_border(out, search.line + 1, search.col, search.width, color);
        }
    }

    let col = RAIL_WIDTH;
    let width = vm.cols.saturating_sub(RAIL_WIDTH);

    if let Some(body) = &vm.body {
        render_context(out, body, theme);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, empty, theme, col, width);
    }

    if let Some(footer) = &vm.footer {
        if footer.line > 0 {
            render_border(out, footer.line - 1, col, width, &theme.colors.border);
        }
        render_footer(out, footer, theme, col, width);
    }
}
