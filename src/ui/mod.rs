//! User interface rendering layer with component-based architecture.
//!
//! Transforms application state into ANSI-styled frames through composable
//! rendering components, and maps mouse clicks back onto what was drawn.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//!                                    └──────→ HitMap → click targets
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`layout`]: Pane geometry and hit testing
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`icons`]: Icon names to terminal glyphs
//! - [`theme`]: Color palettes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod icons;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use layout::{HitMap, HitTarget, Layout};
pub use renderer::render;
pub use theme::{Theme, ThemeSet};
pub use viewmodel::{
    BodyInfo, BodyLine, DisplayRow, EmptyState, FooterInfo, HeaderInfo, RailInfo, SearchBarInfo, UIViewModel,
};
