//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the tree, storage and worker
//! layers:
//!
//! ```text
//! Key / Mouse / Timer → Event → handle_event → AppState operations → Actions → host calls
//!                                    ↑                                   ↓
//!                                    └──────── Worker responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Focus areas and deferred frame tasks
//! - [`state`]: Central application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use navrail::app::{handle_event, AppState, Event};
//! use navrail::domain::{Catalog, ThemeMode};
//! use navrail::ui::ThemeSet;
//!
//! let mut state = AppState::new(Catalog::builtin(), ThemeSet::default(), ThemeMode::Light);
//! let (should_render, actions) = handle_event(&mut state, &Event::SelectSection("tasks".into()))?;
//! assert!(should_render && actions.is_empty());
//! # Ok::<(), navrail::NavrailError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Focus, FrameTask};
pub use state::AppState;
