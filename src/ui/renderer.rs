//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! Between the two it hands the view model back to the state, so the next click
//! is hit tested against exactly what was drawn.
//!
//! # Example
//!
//! ```rust
//! use navrail::app::AppState;
//! use navrail::domain::{Catalog, ThemeMode};
//! use navrail::ui::{render, ThemeSet};
//!
//! let mut state = AppState::new(Catalog::builtin(), ThemeSet::default(), ThemeMode::Light);
//! let frame = render(&mut state, 24, 80);
//! print!("{frame}");
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Clears the pane and homes the cursor.
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders one complete frame for a pane of `rows` x `cols`.
///
/// Returns the ANSI output instead of printing it; the plugin runtime writes it
/// to stdout. Rendering also records the frame's hit map and scroll offset in
/// `state`.
pub fn render(state: &mut AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    state.remember_frame(&viewmodel);

    let mut out = String::from(CLEAR_SCREEN);
    components::render_frame(&mut out, &viewmodel, state.palette());
    out
}
