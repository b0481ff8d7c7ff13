//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: truncated labels, resolved
//! glyphs, highlight ranges and the 0-based line each element occupies. The
//! click [`HitMap`] is derived from the same data so drawing and hit testing
//! never disagree.

use crate::tree::RowId;
use crate::ui::layout::{HitMap, HitTarget, RAIL_WIDTH};

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub rows: usize,
    pub cols: usize,

    pub rail: RailInfo,

    /// Context rail title and controls. `None` when the pane is too narrow.
    pub header: Option<HeaderInfo>,

    /// `None` when the pane is too small for the search row.
    pub search_bar: Option<SearchBarInfo>,

    /// Visible window of group labels and rows. `None` when collapsed or when
    /// there is no room.
    pub body: Option<BodyInfo>,

    /// Message shown in the body when nothing is visible.
    pub empty_state: Option<EmptyState>,

    pub footer: Option<FooterInfo>,

    /// Scroll offset actually used for the body window.
    pub scroll_offset: usize,
}

/// Icon rail column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailInfo {
    pub buttons: Vec<RailButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailButton {
    pub line: usize,
    pub index: usize,
    pub icon: char,
    /// Section title, carried for tooltips in hosts that support them.
    pub title: String,
    /// The button of the current section.
    pub is_active: bool,
    /// Keyboard cursor is on this button.
    pub is_cursor: bool,
}

/// A clickable header control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlInfo {
    pub col: usize,
    pub icon: char,
    /// Text drawn after the icon; may be empty.
    pub label: String,
}

impl ControlInfo {
    /// Columns the control occupies on screen.
    #[must_use]
    pub fn width(&self) -> usize {
        if self.label.is_empty() {
            1
        } else {
            2 + self.label.chars().count()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub line: usize,
    pub col: usize,
    pub width: usize,
    /// Section title; omitted while collapsed.
    pub title: Option<String>,
    pub collapse: ControlInfo,
    pub theme_toggle: ControlInfo,
    /// Accessible description of the theme toggle ("Switch to dark theme").
    pub theme_toggle_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub line: usize,
    pub col: usize,
    pub width: usize,
    /// Raw input text, tail-truncated to fit.
    pub input: String,
    pub is_focused: bool,
    /// Collapsed rails show only the search glyph.
    pub is_collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyInfo {
    pub col: usize,
    pub width: usize,
    pub lines: Vec<BodyLine>,
}

impl BodyInfo {
    /// Column of parent carets, right-aligned in the body.
    #[must_use]
    pub const fn caret_col(&self) -> usize {
        (self.col + self.width).saturating_sub(2)
    }

    /// Columns available for a row label at `depth`.
    #[must_use]
    pub const fn label_width(&self, depth: usize) -> usize {
        self.width.saturating_sub(row_indent(depth) + 3)
    }
}

/// Columns before a row label: icon and padding for top-level rows, a deeper
/// indent for children.
#[must_use]
pub const fn row_indent(depth: usize) -> usize {
    if depth == 0 {
        3
    } else {
        5
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    Group { line: usize, label: String },
    Row(DisplayRow),
}

/// One simple, parent or child row ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub line: usize,
    pub id: RowId,
    /// 0 for top-level rows, 1 for children.
    pub depth: usize,
    /// Children have no icon.
    pub icon: Option<char>,
    pub label: String,
    /// Char ranges of query matches within `label`.
    pub highlight_ranges: Vec<(usize, usize)>,
    /// Parent rows only: `expand_more` or `expand_less` glyph.
    pub caret: Option<char>,
    pub is_active: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub line: usize,
    pub keybindings: String,
}

impl UIViewModel {
    /// Click regions for everything this view model draws.
    #[must_use]
    pub fn hit_map(&self) -> HitMap {
        let mut map = HitMap::default();

        for button in &self.rail.buttons {
            map.add(button.line, 0, RAIL_WIDTH, HitTarget::RailSection(button.index));
        }

        if let Some(header) = &self.header {
            let collapse = &header.collapse;
            map.add(header.line, collapse.col, collapse.col + collapse.width(), HitTarget::CollapseToggle);
            let toggle = &header.theme_toggle;
            map.add(header.line, toggle.col, toggle.col + toggle.width(), HitTarget::ThemeToggle);
        }

        if let Some(search) = &self.search_bar {
            map.add(search.line, search.col, search.col + search.width, HitTarget::SearchRow);
        }

        if let Some(body) = &self.body {
            for line in &body.lines {
                let BodyLine::Row(row) = line else { continue };
                map.add(row.line, body.col, body.col + body.width, HitTarget::Row(row.id));
                if row.caret.is_some() {
                    let caret = body.caret_col();
                    map.add(row.line, caret, caret + 1, HitTarget::Caret(row.id));
                }
            }
        }

        map
    }
}
