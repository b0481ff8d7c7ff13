//! Pane geometry and click hit testing.
//!
//! All coordinates here are 0-based, matching the line/column Zellij reports for
//! mouse events. Components add one when positioning the terminal cursor.
//!
//! ```text
//! col 0..RAIL_WIDTH   RAIL_WIDTH..cols
//! ┌──────┬───────────────────────────────┐
//! │ ▦    │ Title        « Collapse  ☾    │ line 0  header
//! │      │───────────────────────────────│ line 1
//! │ ✓    │ ⌕ query                       │ line 2  search row
//! │      │───────────────────────────────│ line 3
//! │ ⚙    │ GROUP                         │ line 4.. body
//! │      │   + Row                       │
//! │ ☺    │───────────────────────────────│ rows-2
//! │      │ key hints                     │ rows-1  footer
//! └──────┴───────────────────────────────┘
//! ```
//!
//! Elements that do not fit in a small pane are left out entirely, together
//! with their hit targets.

use crate::tree::RowId;

/// Columns taken by the icon rail, including its right separator.
pub const RAIL_WIDTH: usize = 4;

/// Narrowest context area still drawn next to the rail.
pub const MIN_CONTEXT_WIDTH: usize = 16;

/// Lines between consecutive rail buttons.
pub const RAIL_SPACING: usize = 2;

const HEADER_LINE: usize = 0;
const SEARCH_LINE: usize = 2;
const BODY_START: usize = 4;

/// Pane height needed for the search row and its separators.
const MIN_ROWS_SEARCH: usize = 4;
/// Pane height needed before the footer is drawn.
const MIN_ROWS_FOOTER: usize = 10;

/// Line assignments for one pane size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    /// First column of the context area, if it is drawn at all.
    pub context_col: Option<usize>,
    pub header_line: Option<usize>,
    pub search_line: Option<usize>,
    /// Body lines as a half-open range.
    pub body: Option<(usize, usize)>,
    pub footer_line: Option<usize>,
}

impl Layout {
    #[must_use]
    pub fn compute(rows: usize, cols: usize) -> Self {
        let context_col = (cols >= RAIL_WIDTH + MIN_CONTEXT_WIDTH && rows > 0).then_some(RAIL_WIDTH);

        if context_col.is_none() {
            return Self {
                rows,
                cols,
                context_col: None,
                header_line: None,
                search_line: None,
                body: None,
                footer_line: None,
            };
        }

        let search_line = (rows >= MIN_ROWS_SEARCH).then_some(SEARCH_LINE);
        let footer_line = (rows >= MIN_ROWS_FOOTER).then(|| rows - 1);
        let body_end = if footer_line.is_some() { rows - 2 } else { rows };
        let body = (body_end > BODY_START && search_line.is_some()).then_some((BODY_START, body_end));

        Self {
            rows,
            cols,
            context_col,
            header_line: Some(HEADER_LINE),
            search_line,
            body,
            footer_line,
        }
    }

    /// Width of the context area.
    #[must_use]
    pub const fn context_width(&self) -> usize {
        match self.context_col {
            Some(col) => self.cols.saturating_sub(col),
            None => 0,
        }
    }

    /// Number of body lines available for groups and rows.
    #[must_use]
    pub const fn body_height(&self) -> usize {
        match self.body {
            Some((start, end)) => end - start,
            None => 0,
        }
    }

    /// Line of the `index`-th rail button, if it fits.
    #[must_use]
    pub const fn rail_line(&self, index: usize) -> Option<usize> {
        let line = index * RAIL_SPACING;
        if line < self.rows && self.cols >= RAIL_WIDTH {
            Some(line)
        } else {
            None
        }
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Rail button, by section index.
    RailSection(usize),
    CollapseToggle,
    ThemeToggle,
    SearchRow,
    Row(RowId),
    /// Expand caret of a parent row.
    Caret(RowId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    line: usize,
    start_col: usize,
    end_col: usize,
    target: HitTarget,
}

/// Clickable regions of the last rendered frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    regions: Vec<Region>,
}

impl HitMap {
    /// Registers `target` on `line` for columns `start_col..end_col`.
    ///
    /// Regions added later win when they overlap earlier ones.
    pub fn add(&mut self, line: usize, start_col: usize, end_col: usize, target: HitTarget) {
        if start_col < end_col {
            self.regions.push(Region {
                line,
                start_col,
                end_col,
                target,
            });
        }
    }

    #[must_use]
    pub fn hit(&self, line: usize, col: usize) -> Option<HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|r| r.line == line && (r.start_col..r.end_col).contains(&col))
            .map(|r| r.target)
    }

    /// Whether any region maps to `target`.
    #[must_use]
    pub fn contains(&self, target: HitTarget) -> bool {
        self.regions.iter().any(|r| r.target == target)
    }
}
