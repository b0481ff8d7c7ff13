//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point from the plugin runtime: it maps
//! an [`Event`] to `AppState` operations and returns whether a redraw is needed
//! plus the side effects to execute.
//!
//! # Event Types
//!
//! - **Sections**: `SelectSection`, `SelectSectionIndex`
//! - **Rows**: `ToggleExpand`, `SetActive`, cursor movement and activation
//! - **Search**: `SetQuery`, `SearchChar`, `SearchBackspace`, `ClearSearch`,
//!   `SearchRowClicked`, `FocusSearch`, `ExitSearch`
//! - **Chrome**: `ToggleCollapsed`, `ToggleTheme`, `SetTheme`, `StoredThemeLoaded`, focus moves
//! - **System**: `Click`, `FrameTick`, `CloseFocus`, `WorkerResponse`

use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::ThemeMode;
use crate::tree::{RowId, RowKind};
use crate::ui::layout::HitTarget;
use crate::worker::WorkerResponse;

/// Events produced by input, timers and the worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Opens a section by key.
    SelectSection(String),
    /// Opens the section at a 1-based rail position (number keys).
    SelectSectionIndex(usize),

    ToggleExpand(RowId),
    SetActive(RowId),

    /// Replaces the whole search input.
    SetQuery(String),
    SearchChar(char),
    SearchBackspace,
    ClearSearch,

    ToggleCollapsed,
    /// The search row was clicked; expands a collapsed rail first.
    SearchRowClicked,
    /// Keyboard request to focus search; expands a collapsed rail first.
    FocusSearch,
    /// Leaves the search input, keeping the query.
    ExitSearch,

    ToggleTheme,
    SetTheme(ThemeMode),
    /// Theme read from the preference store after startup (e.g. once
    /// filesystem access is granted).
    StoredThemeLoaded(ThemeMode),

    /// One frame has passed since `Action::ScheduleFrame`.
    FrameTick,

    CursorDown,
    CursorUp,
    ActivateCursor,
    CycleFocus,
    FocusRail,
    FocusContext,

    /// Left click at 0-based pane coordinates.
    Click { line: usize, col: usize },

    /// Hides the plugin pane.
    CloseFocus,

    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI must be redrawn.
///
/// # Errors
///
/// Reserved for failures that must reach the runtime; invalid input such as an
/// unknown section key is logged and handled as a no-op.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SelectSection(key) => Ok((select_or_ignore(state.select_section(key)), vec![])),
        Event::SelectSectionIndex(n) => {
            let selected = n
                .checked_sub(1)
                .is_some_and(|index| select_or_ignore(state.select_section_index(index)));
            Ok((selected, vec![]))
        }
        Event::ToggleExpand(id) => Ok((state.toggle_expand(*id), vec![])),
        Event::SetActive(id) => Ok((state.set_active(*id), vec![])),
        Event::SetQuery(text) => {
            state.set_query(text);
            Ok((true, vec![]))
        }
        Event::SearchChar(c) => {
            state.push_search_char(*c);
            Ok((true, vec![]))
        }
        Event::SearchBackspace => Ok((state.pop_search_char(), vec![])),
        Event::ClearSearch => {
            let had_input = !state.search_input().is_empty();
            state.clear_search();
            Ok((had_input, vec![]))
        }
        Event::ToggleCollapsed => {
            state.toggle_collapsed();
            Ok((true, vec![]))
        }
        Event::SearchRowClicked | Event::FocusSearch => Ok(focus_search(state)),
        Event::ExitSearch => Ok((state.blur_search(), vec![])),
        Event::ToggleTheme => {
            let message = state.toggle_theme();
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::SetTheme(mode) => {
            if state.theme() == *mode {
                return Ok((false, vec![]));
            }
            let message = state.set_theme(*mode);
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::StoredThemeLoaded(mode) => Ok((state.adopt_stored_theme(*mode), vec![])),
        Event::FrameTick => Ok((state.run_frame_tasks(), vec![])),
        Event::CursorDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::ActivateCursor => Ok((state.activate_cursor(), vec![])),
        Event::CycleFocus => {
            state.cycle_focus();
            Ok((true, vec![]))
        }
        Event::FocusRail => {
            state.focus_rail();
            Ok((true, vec![]))
        }
        Event::FocusContext => Ok((state.focus_context(), vec![])),
        Event::Click { line, col } => {
            let Some(target) = state.hit_test(*line, *col) else {
                tracing::trace!(line, col, "click on empty area");
                return Ok((false, vec![]));
            };
            tracing::debug!(line, col, target = ?target, "click");
            handle_click(state, target)
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::WorkerResponse(response) => {
            match response {
                WorkerResponse::ThemePersisted { theme } => {
                    tracing::debug!(theme = %theme, "theme persisted");
                }
                WorkerResponse::Error { message } => {
                    tracing::warn!(error = %message, "worker error");
                }
            }
            Ok((false, vec![]))
        }
    }
}

fn select_or_ignore(result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "section switch ignored");
            false
        }
    }
}

/// Focuses search directly, or expands first and defers focus by one frame.
fn focus_search(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.expand_if_collapsed_and_focus_search() {
        (true, vec![Action::ScheduleFrame])
    } else {
        (state.focus_search(), vec![])
    }
}

fn handle_click(state: &mut AppState, target: HitTarget) -> Result<(bool, Vec<Action>)> {
    match target {
        HitTarget::RailSection(index) => {
            state.focus_rail();
            select_or_ignore(state.select_section_index(index));
            Ok((true, vec![]))
        }
        HitTarget::CollapseToggle => handle_event(state, &Event::ToggleCollapsed),
        HitTarget::ThemeToggle => handle_event(state, &Event::ToggleTheme),
        HitTarget::SearchRow => handle_event(state, &Event::SearchRowClicked),
        HitTarget::Caret(id) => {
            state.set_cursor(id);
            state.toggle_expand(id);
            Ok((true, vec![]))
        }
        HitTarget::Row(id) => {
            state.set_cursor(id);
            match state.tree().row_kind(id) {
                Some(RowKind::Parent) => {
                    state.toggle_expand(id);
                }
                Some(_) => {
                    state.set_active(id);
                }
                None => {}
            }
            Ok((true, vec![]))
        }
    }
}
