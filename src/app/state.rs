//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the catalog, the
//! rendered tree of the current section, the search query and its visibility
//! map, collapse/theme flags, keyboard focus and cursors. It is owned by the
//! plugin struct and changed only through the methods below.
//!
//! # Invariants
//!
//! - `current_section_key` always names a section of the catalog
//! - at most one row is active, and it is never a parent row
//! - `query` is always `normalize_query(search_input)`
//! - `visibility` is always computed from `tree` and `query`

use super::modes::{Focus, FrameTask};
use crate::domain::error::{NavrailError, Result};
use crate::domain::{Catalog, ThemeMode};
use crate::tree::{self, compute_visibility, match_ranges, normalize_query, DisplayTree, RowId, RowKind, RowNode, Visibility};
use crate::ui::helpers::{tail, truncate};
use crate::ui::icons::glyph;
use crate::ui::layout::{HitMap, HitTarget, Layout};
use crate::ui::theme::{Theme, ThemeSet};
use crate::ui::viewmodel::{
    BodyInfo, BodyLine, ControlInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo, RailButton, RailInfo,
    SearchBarInfo, UIViewModel,
};
use crate::worker::WorkerMessage;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Catalog,
    current_section_key: String,
    tree: DisplayTree,
    visibility: Visibility,

    /// Raw text of the search input.
    search_input: String,
    /// Trimmed, lower-cased form of `search_input`.
    query: String,

    is_collapsed: bool,
    active_row: Option<RowId>,

    theme: ThemeMode,
    themes: ThemeSet,
    /// The user picked a theme this session; a late store read must not undo it.
    theme_touched: bool,

    focus: Focus,
    rail_cursor: usize,
    /// Remembered context cursor; see [`AppState::cursor_row`] for the effective one.
    context_cursor: Option<RowId>,
    /// First body line shown, as last drawn.
    scroll_offset: usize,

    pending_frame_tasks: Vec<FrameTask>,

    /// Click regions of the last drawn frame.
    hit_map: HitMap,
}

impl AppState {
    /// Creates state showing the catalog's first section.
    #[must_use]
    pub fn new(catalog: Catalog, themes: ThemeSet, theme: ThemeMode) -> Self {
        let (current_section_key, tree) = {
            let section = catalog.first();
            (section.key.clone(), tree::render(section))
        };
        let visibility = compute_visibility(&tree, "");

        Self {
            catalog,
            current_section_key,
            tree,
            visibility,
            search_input: String::new(),
            query: String::new(),
            is_collapsed: false,
            active_row: None,
            theme,
            themes,
            theme_touched: false,
            focus: Focus::default(),
            rail_cursor: 0,
            context_cursor: None,
            scroll_offset: 0,
            pending_frame_tasks: Vec::new(),
            hit_map: HitMap::default(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn current_section_key(&self) -> &str {
        &self.current_section_key
    }

    #[must_use]
    pub const fn tree(&self) -> &DisplayTree {
        &self.tree
    }

    #[must_use]
    pub const fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    #[must_use]
    pub const fn active_row(&self) -> Option<RowId> {
        self.active_row
    }

    #[must_use]
    pub const fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Palette of the current theme mode.
    #[must_use]
    pub const fn palette(&self) -> &Theme {
        self.themes.get(self.theme)
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub const fn rail_cursor(&self) -> usize {
        self.rail_cursor
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    // ----- Sections -----

    /// Switches the context rail to another section.
    ///
    /// Re-renders the tree from scratch, clears the search input and query,
    /// clears the active row and resets the context cursor and scroll. The
    /// collapse flag and theme are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`NavrailError::UnknownSection`] if `key` is not in the catalog;
    /// nothing changes in that case.
    pub fn select_section(&mut self, key: &str) -> Result<()> {
        let Some(position) = self.catalog.position(key) else {
            tracing::debug!(key = %key, "ignoring unknown section");
            return Err(NavrailError::UnknownSection(key.to_string()));
        };

        let section = &self.catalog.sections()[position];
        self.tree = tree::render(section);
        self.current_section_key.clone_from(&section.key);

        self.search_input.clear();
        self.query.clear();
        self.visibility = compute_visibility(&self.tree, &self.query);

        self.active_row = None;
        self.context_cursor = None;
        self.scroll_offset = 0;
        self.rail_cursor = position;

        tracing::debug!(
            section = %self.current_section_key,
            rows = self.tree.row_count(),
            "section selected"
        );
        Ok(())
    }

    /// Switches to the section at rail position `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`NavrailError::UnknownSection`] if there is no such position.
    pub fn select_section_index(&mut self, index: usize) -> Result<()> {
        let key = self
            .catalog
            .sections()
            .get(index)
            .map(|section| section.key.clone())
            .ok_or_else(|| NavrailError::UnknownSection(format!("#{}", index + 1)))?;
        self.select_section(&key)
    }

    // ----- Rows -----

    /// Flips the expanded flag of one parent row.
    ///
    /// Returns `false` for simple rows, children and unknown ids. The active
    /// row is never touched.
    pub fn toggle_expand(&mut self, id: RowId) -> bool {
        let toggled = self.tree.toggle_expanded(id);
        if toggled {
            tracing::trace!(row = %id, expanded = self.tree.is_expanded(id), "row toggled");
            self.clamp_cursor();
        }
        toggled
    }

    /// Marks a simple or child row as the single active row.
    ///
    /// Returns `false` without changing anything for parent rows and unknown ids.
    pub fn set_active(&mut self, id: RowId) -> bool {
        match self.tree.row_kind(id) {
            Some(kind) if kind.is_selectable() => {
                tracing::debug!(row = %id, previous = ?self.active_row, "row activated");
                self.active_row = Some(id);
                true
            }
            _ => false,
        }
    }

    // ----- Search -----

    /// Replaces the search input and refilters.
    ///
    /// Expansion flags and the active row are untouched.
    pub fn set_query(&mut self, text: &str) {
        text.clone_into(&mut self.search_input);
        self.query = normalize_query(text);
        self.visibility = compute_visibility(&self.tree, &self.query);
        self.clamp_cursor();

        tracing::trace!(
            query = %self.query,
            visible = self.visibility.visible_count(),
            "query updated"
        );
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut text = self.search_input.clone();
        text.push(c);
        self.set_query(&text);
    }

    /// Removes the last input char. Returns `false` if the input was empty.
    pub fn pop_search_char(&mut self) -> bool {
        let mut text = self.search_input.clone();
        if text.pop().is_none() {
            return false;
        }
        self.set_query(&text);
        true
    }

    pub fn clear_search(&mut self) {
        self.set_query("");
    }

    // ----- Collapse and focus -----

    /// Collapses or expands the context rail.
    ///
    /// Collapsing blurs the search input before the rail is hidden.
    pub fn toggle_collapsed(&mut self) {
        if self.is_collapsed {
            self.is_collapsed = false;
        } else {
            self.blur_search();
            if self.focus == Focus::Context {
                self.focus = Focus::Rail;
            }
            self.is_collapsed = true;
        }
        tracing::debug!(collapsed = self.is_collapsed, "rail collapse toggled");
    }

    /// Expands a collapsed rail and queues focusing the search input for the
    /// next frame.
    ///
    /// Returns `true` when a frame tick must be scheduled. A rail that is
    /// already expanded is left as is.
    pub fn expand_if_collapsed_and_focus_search(&mut self) -> bool {
        if !self.is_collapsed {
            return false;
        }
        self.is_collapsed = false;
        self.pending_frame_tasks.push(FrameTask::FocusSearch);
        tracing::debug!("rail expanded, search focus deferred to next frame");
        true
    }

    /// Focuses the search input. Returns `false` while collapsed.
    ///
    /// The context scroll offset is preserved.
    pub fn focus_search(&mut self) -> bool {
        if self.is_collapsed {
            return false;
        }
        self.focus = Focus::Search;
        true
    }

    /// Moves focus out of the search input. Returns `false` if it was not focused.
    pub fn blur_search(&mut self) -> bool {
        if self.focus != Focus::Search {
            return false;
        }
        self.focus = if self.is_collapsed { Focus::Rail } else { Focus::Context };
        true
    }

    pub fn focus_rail(&mut self) {
        self.focus = Focus::Rail;
    }

    /// Focuses the context rows. Returns `false` while collapsed.
    pub fn focus_context(&mut self) -> bool {
        if self.is_collapsed {
            return false;
        }
        self.focus = Focus::Context;
        true
    }

    /// Tab order: rail ↔ context; search returns to the context rows.
    pub fn cycle_focus(&mut self) {
        match self.focus {
            Focus::Rail => {
                self.focus_context();
            }
            Focus::Context => self.focus = Focus::Rail,
            Focus::Search => {
                self.blur_search();
            }
        }
    }

    #[must_use]
    pub fn has_pending_frame_tasks(&self) -> bool {
        !self.pending_frame_tasks.is_empty()
    }

    /// Runs the work queued for this frame. Returns `true` if anything ran.
    pub fn run_frame_tasks(&mut self) -> bool {
        let tasks = std::mem::take(&mut self.pending_frame_tasks);
        for task in &tasks {
            match task {
                FrameTask::FocusSearch => {
                    self.focus_search();
                }
            }
        }
        !tasks.is_empty()
    }

    // ----- Theme -----

    /// Switches the theme mode and palette, returning the write to post to the
    /// worker.
    pub fn set_theme(&mut self, mode: ThemeMode) -> WorkerMessage {
        tracing::debug!(from = %self.theme, to = %mode, "theme changed");
        self.theme = mode;
        self.theme_touched = true;
        WorkerMessage::persist_theme(mode)
    }

    /// Applies a theme read back from the preference store.
    ///
    /// Nothing is written back, and the stored value is ignored once the user
    /// has chosen a theme this session. Returns whether the theme changed.
    pub fn adopt_stored_theme(&mut self, mode: ThemeMode) -> bool {
        if self.theme_touched || self.theme == mode {
            return false;
        }
        tracing::debug!(from = %self.theme, to = %mode, "stored theme adopted");
        self.theme = mode;
        true
    }

    pub fn toggle_theme(&mut self) -> WorkerMessage {
        self.set_theme(self.theme.opposite())
    }

    // ----- Cursor -----

    /// Rows the context cursor can land on, in display order.
    ///
    /// Visible top-level rows, plus visible children of expanded parents.
    #[must_use]
    pub fn navigable_rows(&self) -> Vec<RowId> {
        let mut rows = Vec::new();
        for row in self.tree.groups.iter().flat_map(|g| &g.rows) {
            if !self.visibility.is_visible(row.id()) {
                continue;
            }
            rows.push(row.id());
            if let RowNode::Parent(parent) = row {
                if parent.expanded {
                    rows.extend(
                        parent
                            .children
                            .iter()
                            .map(|child| child.id)
                            .filter(|id| self.visibility.is_visible(*id)),
                    );
                }
            }
        }
        rows
    }

    /// Row under the context cursor: the remembered one if still navigable,
    /// otherwise the first navigable row.
    #[must_use]
    pub fn cursor_row(&self) -> Option<RowId> {
        let rows = self.navigable_rows();
        match self.context_cursor {
            Some(id) if rows.contains(&id) => Some(id),
            _ => rows.first().copied(),
        }
    }

    /// Keeps the remembered cursor on a navigable row after a filter or expand
    /// change. A child hidden by collapsing its parent moves to the parent.
    fn clamp_cursor(&mut self) {
        let Some(id) = self.context_cursor else {
            return;
        };
        let rows = self.navigable_rows();
        if rows.contains(&id) {
            return;
        }
        self.context_cursor = self
            .tree
            .parent_of(id)
            .map(|parent| parent.id)
            .filter(|parent| rows.contains(parent))
            .or_else(|| rows.first().copied());
    }

    /// Puts the context cursor on `id` and focuses the rows.
    pub fn set_cursor(&mut self, id: RowId) {
        self.context_cursor = Some(id);
        self.focus_context();
    }

    pub fn move_cursor_down(&mut self) {
        self.step_cursor(true);
    }

    pub fn move_cursor_up(&mut self) {
        self.step_cursor(false);
    }

    /// Moves the cursor of the focused area one step, wrapping at the ends.
    fn step_cursor(&mut self, forward: bool) {
        let step = |index: usize, len: usize| {
            if forward {
                (index + 1) % len
            } else if index == 0 {
                len - 1
            } else {
                index - 1
            }
        };

        match self.focus {
            Focus::Rail => {
                let len = self.catalog.sections().len();
                self.rail_cursor = step(self.rail_cursor.min(len - 1), len);
            }
            Focus::Context => {
                let rows = self.navigable_rows();
                if rows.is_empty() {
                    return;
                }
                let current = self
                    .cursor_row()
                    .and_then(|id| rows.iter().position(|r| *r == id))
                    .unwrap_or(0);
                self.context_cursor = Some(rows[step(current, rows.len())]);
            }
            Focus::Search => {}
        }
    }

    /// Activates whatever the focused cursor is on.
    ///
    /// Rail: opens the section. Context: expands a parent or activates a
    /// simple/child row. Search: moves focus to the results.
    pub fn activate_cursor(&mut self) -> bool {
        match self.focus {
            Focus::Rail => self.select_section_index(self.rail_cursor).is_ok(),
            Focus::Context => {
                let Some(id) = self.cursor_row() else {
                    return false;
                };
                self.context_cursor = Some(id);
                match self.tree.row_kind(id) {
                    Some(RowKind::Parent) => self.toggle_expand(id),
                    Some(_) => self.set_active(id),
                    None => false,
                }
            }
            Focus::Search => self.blur_search(),
        }
    }

    // ----- Frames -----

    /// Looks up what a click at `line`/`col` hit in the last drawn frame.
    #[must_use]
    pub fn hit_test(&self, line: usize, col: usize) -> Option<HitTarget> {
        self.hit_map.hit(line, col)
    }

    /// Records the layout of a frame that was just drawn.
    pub fn remember_frame(&mut self, viewmodel: &UIViewModel) {
        self.hit_map = viewmodel.hit_map();
        self.scroll_offset = viewmodel.scroll_offset;
    }

    /// Computes the view model for a pane of `rows` × `cols` cells.
    ///
    /// Elements that do not fit are omitted.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let layout = Layout::compute(rows, cols);
        let (body, empty_state, scroll_offset) = self.compute_body(&layout);

        UIViewModel {
            rows,
            cols,
            rail: self.compute_rail(&layout),
            header: self.compute_header(&layout),
            search_bar: self.compute_search_bar(&layout),
            body,
            empty_state,
            footer: self.compute_footer(&layout),
            scroll_offset,
        }
    }

    fn compute_rail(&self, layout: &Layout) -> RailInfo {
        let buttons = self
            .catalog
            .sections()
            .iter()
            .enumerate()
            .filter_map(|(index, section)| {
                layout.rail_line(index).map(|line| RailButton {
                    line,
                    index,
                    icon: glyph(&section.icon),
                    title: section.title.clone(),
                    is_active: section.key == self.current_section_key,
                    is_cursor: self.focus == Focus::Rail && index == self.rail_cursor,
                })
            })
            .collect();

        RailInfo { buttons }
    }

    fn compute_header(&self, layout: &Layout) -> Option<HeaderInfo> {
        let line = layout.header_line?;
        let col = layout.context_col?;
        let width = layout.context_width();

        let theme_toggle = ControlInfo {
            col: col + width - 2,
            icon: glyph(self.theme.toggle_icon()),
            label: String::new(),
        };

        let (icon, label) = if self.is_collapsed {
            ("left_panel_open", "Expand")
        } else {
            ("left_panel_close", "Collapse")
        };
        let collapse = ControlInfo {
            col: theme_toggle.col.saturating_sub(4 + label.len()),
            icon: glyph(icon),
            label: label.to_string(),
        };

        let title = (!self.is_collapsed)
            .then(|| truncate(&self.tree.title, collapse.col.saturating_sub(col + 2)));

        Some(HeaderInfo {
            line,
            col,
            width,
            title,
            collapse,
            theme_toggle,
            theme_toggle_title: self.theme.toggle_label().to_string(),
        })
    }

    fn compute_search_bar(&self, layout: &Layout) -> Option<SearchBarInfo> {
        let line = layout.search_line?;
        let col = layout.context_col?;
        let width = layout.context_width();

        let input = if self.is_collapsed {
            String::new()
        } else {
            tail(&self.search_input, width.saturating_sub(5))
        };

        Some(SearchBarInfo {
            line,
            col,
            width,
            input,
            is_focused: self.focus == Focus::Search,
            is_collapsed: self.is_collapsed,
        })
    }

    /// Body window, empty-state message and the scroll offset used.
    fn compute_body(&self, layout: &Layout) -> (Option<BodyInfo>, Option<EmptyState>, usize) {
        let (Some((start, end)), Some(col)) = (layout.body, layout.context_col) else {
            return (None, None, self.scroll_offset);
        };
        if self.is_collapsed {
            return (None, None, self.scroll_offset);
        }

        let width = layout.context_width();
        let mut body = BodyInfo {
            col,
            width,
            lines: Vec::new(),
        };
        let lines = self.body_lines(&body);

        if lines.is_empty() {
            let message = if self.query.is_empty() {
                "Nothing here yet".to_string()
            } else {
                format!("No matches for \"{}\"", self.search_input.trim())
            };
            let empty = EmptyState {
                line: start,
                message: truncate(&message, width.saturating_sub(2)),
            };
            return (None, Some(empty), 0);
        }

        let height = layout.body_height();
        let mut offset = self.scroll_offset.min(lines.len().saturating_sub(height));
        let selected = lines
            .iter()
            .position(|line| matches!(line, BodyLine::Row(row) if row.is_selected));
        if let Some(index) = selected {
            if index < offset {
                offset = index;
            } else if index >= offset + height {
                offset = index + 1 - height;
            }
        }

        body.lines = lines
            .into_iter()
            .skip(offset)
            .take(height)
            .enumerate()
            .map(|(i, line)| place(line, start + i))
            .collect();

        (Some(body), None, offset)
    }

    /// Every drawable group label and row, numbered from 0.
    fn body_lines(&self, body: &BodyInfo) -> Vec<BodyLine> {
        let cursor = if self.focus == Focus::Context {
            self.cursor_row()
        } else {
            None
        };

        let mut lines = Vec::new();
        for group in &self.tree.groups {
            if !self.visibility.group_visible(group) {
                continue;
            }
            lines.push(BodyLine::Group {
                line: lines.len(),
                label: truncate(&group.label, body.width.saturating_sub(2)),
            });

            for row in &group.rows {
                if !self.visibility.is_visible(row.id()) {
                    continue;
                }
                match row {
                    RowNode::Simple(simple) => {
                        let row = self.display_row(body, lines.len(), simple.id, 0, &simple.label, cursor);
                        lines.push(BodyLine::Row(DisplayRow {
                            icon: Some(glyph(&simple.icon)),
                            ..row
                        }));
                    }
                    RowNode::Parent(parent) => {
                        let caret = if parent.expanded { "expand_less" } else { "expand_more" };
                        let row = self.display_row(body, lines.len(), parent.id, 0, &parent.label, cursor);
                        lines.push(BodyLine::Row(DisplayRow {
                            icon: Some(glyph(&parent.icon)),
                            caret: Some(glyph(caret)),
                            ..row
                        }));

                        if parent.expanded {
                            for child in &parent.children {
                                if self.visibility.is_visible(child.id) {
                                    let row = self.display_row(body, lines.len(), child.id, 1, &child.label, cursor);
                                    lines.push(BodyLine::Row(row));
                                }
                            }
                        }
                    }
                }
            }
        }
        lines
    }

    fn display_row(
        &self,
        body: &BodyInfo,
        line: usize,
        id: RowId,
        depth: usize,
        label: &str,
        cursor: Option<RowId>,
    ) -> DisplayRow {
        let label = truncate(label, body.label_width(depth));
        let highlight_ranges = match_ranges(&label, &self.query);

        DisplayRow {
            line,
            id,
            depth,
            icon: None,
            label,
            highlight_ranges,
            caret: None,
            is_active: self.active_row == Some(id),
            is_selected: cursor == Some(id),
        }
    }

    fn compute_footer(&self, layout: &Layout) -> Option<FooterInfo> {
        let line = layout.footer_line?;

        let keybindings = match (self.focus, self.is_collapsed) {
            (Focus::Search, _) => "Esc: done  Enter: results  Ctrl+u: clear  Type to filter",
            (Focus::Rail, true) => "j/k: move  Enter: open  /: search  [: expand  t: theme  q: hide",
            (Focus::Rail, false) => "j/k: move  Enter: open  Tab: rows  /: search  [: collapse  t: theme  q: hide",
            (Focus::Context, _) => "j/k: move  Enter: select  Tab: rail  /: search  [: collapse  t: theme  q: hide",
        };

        Some(FooterInfo {
            line,
            keybindings: truncate(keybindings, layout.context_width().saturating_sub(2)),
        })
    }
}

/// Moves a numbered body line onto its screen line.
fn place(line: BodyLine, screen_line: usize) -> BodyLine {
    match line {
        BodyLine::Group { label, .. } => BodyLine::Group {
            line: screen_line,
            label,
        },
        BodyLine::Row(row) => BodyLine::Row(DisplayRow {
            line: screen_line,
            ..row
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{self, JsonStorage};
    use crate::worker::NavrailWorker;

    fn state() -> AppState {
        AppState::new(Catalog::builtin(), ThemeSet::default(), ThemeMode::Light)
    }

    fn tasks_state() -> AppState {
        let mut state = state();
        state.select_section("tasks").unwrap();
        state
    }

    fn id_of(state: &AppState, label: &str) -> RowId {
        state
            .tree()
            .rows()
            .into_iter()
            .find(|r| r.label == label)
            .map(|r| r.id)
            .unwrap()
    }

    fn visible_labels(state: &AppState) -> Vec<String> {
        state
            .tree()
            .rows()
            .into_iter()
            .filter(|r| state.visibility().is_visible(r.id))
            .map(|r| r.label.to_string())
            .collect()
    }

    #[test]
    fn test_starts_on_first_section() {
        let state = state();
        assert_eq!(state.current_section_key(), "dashboard");
        assert_eq!(state.tree().title, "Dashboard");
        assert!(state.visibility().all_visible());
        assert_eq!(state.focus(), Focus::Rail);
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let mut state = tasks_state();
        state.set_query("   ");
        assert_eq!(state.query(), "");
        assert_eq!(state.visibility().visible_count(), state.tree().row_count());
    }

    #[test]
    fn test_query_is_normalized_substring_and_idempotent() {
        let mut state = tasks_state();
        state.set_query("  BUG ");
        assert_eq!(state.query(), "bug");
        assert_eq!(state.search_input(), "  BUG ");
        let first = state.visibility().clone();

        state.set_query("  BUG ");
        assert_eq!(state.visibility(), &first);
        assert_eq!(visible_labels(&state), vec!["Completed", "Bug fixes"]);
    }

    #[test]
    fn test_parent_visible_when_child_matches() {
        let mut state = tasks_state();
        state.set_query("stakeholder");
        let priority = id_of(&state, "Priority tasks");
        let critical = id_of(&state, "Critical launch items");
        assert!(state.visibility().is_visible(priority));
        assert!(!state.visibility().is_visible(critical));
    }

    #[test]
    fn test_review_scenario() {
        let mut state = tasks_state();
        state.set_query("review");

        assert_eq!(visible_labels(&state), vec!["Due today", "Review design mockups"]);

        let groups: Vec<&str> = state
            .tree()
            .groups
            .iter()
            .filter(|g| state.visibility().group_visible(g))
            .map(|g| g.label.as_str())
            .collect();
        assert_eq!(groups, vec!["My Tasks"]);
    }

    #[test]
    fn test_clearing_query_restores_rows() {
        let mut state = tasks_state();
        state.set_query("review");
        state.clear_search();
        assert_eq!(state.search_input(), "");
        assert!(state.visibility().all_visible());
    }

    #[test]
    fn test_typing_funnels_through_query() {
        let mut state = tasks_state();
        for c in "Due".chars() {
            state.push_search_char(c);
        }
        assert_eq!(state.query(), "due");
        assert!(state.pop_search_char());
        assert_eq!(state.query(), "du");
        state.clear_search();
        assert!(!state.pop_search_char());
    }

    #[test]
    fn test_filter_keeps_expansion_and_active_row() {
        let mut state = tasks_state();
        let due = id_of(&state, "Due today");
        let archived = id_of(&state, "Archived");
        state.toggle_expand(due);
        state.set_active(archived);

        state.set_query("zzz");
        assert!(state.tree().is_expanded(due));
        assert_eq!(state.active_row(), Some(archived));
    }

    #[test]
    fn test_section_switch_resets_query_and_active_row() {
        let mut state = tasks_state();
        state.set_query("review");
        let archived = id_of(&state, "Archived");
        state.set_active(archived);
        state.toggle_collapsed();
        state.set_theme(ThemeMode::Dark);

        state.select_section("settings").unwrap();
        assert_eq!(state.current_section_key(), "settings");
        assert_eq!(state.query(), "");
        assert_eq!(state.search_input(), "");
        assert!(state.visibility().all_visible());
        assert_eq!(state.active_row(), None);
        assert_eq!(state.rail_cursor(), 2);
        assert!(state.is_collapsed());
        assert_eq!(state.theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_unknown_section_changes_nothing() {
        let mut state = tasks_state();
        state.set_query("review");
        let archived = id_of(&state, "Archived");
        state.set_active(archived);
        let tree = state.tree().clone();

        let err = state.select_section("reports").unwrap_err();
        assert!(matches!(err, NavrailError::UnknownSection(key) if key == "reports"));
        assert_eq!(state.current_section_key(), "tasks");
        assert_eq!(state.tree(), &tree);
        assert_eq!(state.query(), "review");
        assert_eq!(state.active_row(), Some(archived));

        assert!(state.select_section_index(9).is_err());
        assert_eq!(state.current_section_key(), "tasks");
    }

    #[test]
    fn test_toggle_expand_twice_is_identity() {
        let mut state = tasks_state();
        let due = id_of(&state, "Due today");
        let before = state.tree().clone();

        assert!(state.toggle_expand(due));
        assert!(state.tree().is_expanded(due));
        assert!(state.toggle_expand(due));
        assert_eq!(state.tree(), &before);

        assert!(!state.toggle_expand(id_of(&state, "New task")));
        assert!(!state.toggle_expand(RowId(999)));
    }

    #[test]
    fn test_single_active_row() {
        let mut state = tasks_state();
        let new_task = id_of(&state, "New task");
        let review = id_of(&state, "Review design mockups");
        let due = id_of(&state, "Due today");

        assert!(state.set_active(new_task));
        assert!(state.set_active(review));
        assert_eq!(state.active_row(), Some(review));

        assert!(!state.set_active(due));
        assert!(!state.set_active(RowId(999)));
        assert_eq!(state.active_row(), Some(review));
    }

    #[test]
    fn test_toggle_theme_twice_restores_theme_and_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut worker = NavrailWorker::with_storage(Box::new(JsonStorage::new(path.clone()).unwrap()));
        let mut state = state();

        worker.handle_message(state.toggle_theme());
        assert_eq!(state.theme(), ThemeMode::Dark);
        assert_eq!(state.palette().name, "dark");

        worker.handle_message(state.toggle_theme());
        assert_eq!(state.theme(), ThemeMode::Light);
        drop(worker);

        let store = JsonStorage::open_read_only(path).unwrap();
        assert_eq!(storage::load_theme(&store).unwrap(), Some(ThemeMode::Light));
    }

    #[test]
    fn test_collapse_blurs_search_first() {
        let mut state = tasks_state();
        assert!(state.focus_search());
        state.toggle_collapsed();
        assert!(state.is_collapsed());
        assert_ne!(state.focus(), Focus::Search);

        assert!(!state.focus_search());
        state.toggle_collapsed();
        assert!(!state.is_collapsed());
    }

    #[test]
    fn test_deferred_search_focus_preserves_scroll() {
        let mut state = tasks_state();
        state.scroll_offset = 3;
        state.toggle_collapsed();

        assert!(state.expand_if_collapsed_and_focus_search());
        assert!(!state.is_collapsed());
        assert_ne!(state.focus(), Focus::Search);
        assert!(state.has_pending_frame_tasks());

        assert!(state.run_frame_tasks());
        assert_eq!(state.focus(), Focus::Search);
        assert_eq!(state.scroll_offset(), 3);
        assert!(!state.run_frame_tasks());

        assert!(!state.expand_if_collapsed_and_focus_search());
    }

    #[test]
    fn test_navigable_rows_follow_expansion_and_filter() {
        let mut state = tasks_state();
        let due = id_of(&state, "Due today");
        let review = id_of(&state, "Review design mockups");
        assert_eq!(state.navigable_rows().len(), 7);

        state.toggle_expand(due);
        assert_eq!(state.navigable_rows().len(), 10);

        state.set_query("review");
        assert_eq!(state.navigable_rows(), vec![due, review]);
    }

    #[test]
    fn test_cursor_wraps_and_clamps_to_parent() {
        let mut state = tasks_state();
        assert!(state.focus_context());
        let due = id_of(&state, "Due today");
        let review = id_of(&state, "Review design mockups");

        state.move_cursor_up();
        assert_eq!(state.cursor_row(), Some(id_of(&state, "Archived")));
        state.move_cursor_down();
        assert_eq!(state.cursor_row(), Some(id_of(&state, "New task")));

        state.toggle_expand(due);
        state.set_cursor(review);
        state.toggle_expand(due);
        assert_eq!(state.cursor_row(), Some(due));
    }

    #[test]
    fn test_activate_cursor_by_focus() {
        let mut state = tasks_state();
        state.focus_rail();
        state.move_cursor_down();
        assert!(state.activate_cursor());
        assert_eq!(state.current_section_key(), "settings");

        state.select_section("tasks").unwrap();
        state.focus_context();
        let new_task = id_of(&state, "New task");
        assert!(state.activate_cursor());
        assert_eq!(state.active_row(), Some(new_task));

        state.move_cursor_down();
        state.move_cursor_down();
        let due = id_of(&state, "Due today");
        assert!(state.activate_cursor());
        assert!(state.tree().is_expanded(due));
        assert_eq!(state.active_row(), Some(new_task));
    }

    #[test]
    fn test_viewmodel_header_and_toggle() {
        let mut state = tasks_state();
        let vm = state.compute_viewmodel(30, 60);
        let header = vm.header.unwrap();
        assert_eq!(header.title.as_deref(), Some("Tasks"));
        assert_eq!(header.collapse.label, "Collapse");
        assert_eq!(header.theme_toggle.icon, glyph("dark_mode"));
        assert_eq!(header.theme_toggle_title, "Switch to dark theme");

        state.set_theme(ThemeMode::Dark);
        state.toggle_collapsed();
        let header = state.compute_viewmodel(30, 60).header.unwrap();
        assert_eq!(header.title, None);
        assert_eq!(header.collapse.label, "Expand");
        assert_eq!(header.theme_toggle.icon, glyph("light_mode"));
        assert_eq!(header.theme_toggle_title, "Switch to light theme");
    }

    #[test]
    fn test_viewmodel_rows_and_highlights() {
        let mut state = tasks_state();
        let due = id_of(&state, "Due today");
        state.toggle_expand(due);
        state.set_query("review");
        state.set_active(id_of(&state, "Review design mockups"));

        let vm = state.compute_viewmodel(30, 60);
        let body = vm.body.unwrap();
        assert_eq!(body.lines.len(), 3);
        assert!(matches!(&body.lines[0], BodyLine::Group { line: 4, label } if label == "My Tasks"));

        let BodyLine::Row(parent) = &body.lines[1] else { panic!("expected row") };
        assert_eq!(parent.caret, Some(glyph("expand_less")));
        assert!(!parent.is_active);

        let BodyLine::Row(child) = &body.lines[2] else { panic!("expected row") };
        assert_eq!(child.depth, 1);
        assert_eq!(child.highlight_ranges, vec![(0, 6)]);
        assert!(child.is_active);
        assert_eq!(child.line, 6);
    }

    #[test]
    fn test_viewmodel_rail_highlight() {
        let state = tasks_state();
        let vm = state.compute_viewmodel(30, 60);
        let active: Vec<usize> = vm.rail.buttons.iter().filter(|b| b.is_active).map(|b| b.index).collect();
        assert_eq!(active, vec![1]);
        assert_eq!(vm.rail.buttons.len(), 4);
    }

    #[test]
    fn test_viewmodel_empty_state() {
        let mut state = tasks_state();
        state.set_query("zzz");
        let vm = state.compute_viewmodel(30, 60);
        assert!(vm.body.is_none());
        assert_eq!(vm.empty_state.unwrap().message, "No matches for \"zzz\"");
    }

    #[test]
    fn test_viewmodel_omits_what_does_not_fit() {
        let state = tasks_state();

        let narrow = state.compute_viewmodel(30, 10);
        assert!(narrow.header.is_none());
        assert!(narrow.search_bar.is_none());
        assert!(narrow.body.is_none());
        assert!(!narrow.rail.buttons.is_empty());
        assert!(!narrow.hit_map().contains(HitTarget::SearchRow));

        let short = state.compute_viewmodel(3, 60);
        assert!(short.header.is_some());
        assert!(short.search_bar.is_none());
        assert!(short.footer.is_none());
        assert_eq!(short.rail.buttons.len(), 2);
    }

    #[test]
    fn test_viewmodel_scrolls_to_cursor() {
        let mut state = tasks_state();
        state.focus_context();
        for _ in 0..6 {
            state.move_cursor_down();
        }
        let vm = state.compute_viewmodel(8, 60);
        let body = vm.body.unwrap();
        assert_eq!(body.lines.len(), 4);
        assert!(body
            .lines
            .iter()
            .any(|l| matches!(l, BodyLine::Row(r) if r.is_selected && r.label == "Archived")));
        assert!(vm.scroll_offset > 0);
    }

    #[test]
    fn test_remember_frame_enables_hit_testing() {
        let mut state = tasks_state();
        let vm = state.compute_viewmodel(30, 60);
        state.remember_frame(&vm);

        assert_eq!(state.hit_test(2, 20), Some(HitTarget::SearchRow));
        assert_eq!(state.hit_test(0, 1), Some(HitTarget::RailSection(0)));
        assert_eq!(state.hit_test(2, 1), Some(HitTarget::RailSection(1)));
        assert_eq!(state.hit_test(5, 20), Some(HitTarget::Row(id_of(&state, "New task"))));
    }
}
