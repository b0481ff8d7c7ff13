//! Domain layer for the Navrail plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific APIs
//! or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`catalog`]: Sections, groups and items that drive the context rail
//! - [`appearance`]: Light/dark theme mode and its storage key
//!
//! # Examples
//!
//! ```
//! use navrail::domain::{Catalog, Result};
//!
//! fn tasks_title() -> Result<String> {
//!     let catalog = Catalog::builtin();
//!     Ok(catalog.get("tasks").map(|s| s.title.clone()).unwrap_or_default())
//! }
//! assert_eq!(tasks_title().unwrap(), "Tasks");
//! ```

pub mod appearance;
pub mod catalog;
pub mod error;

pub use appearance::{ThemeMode, THEME_KEY};
pub use catalog::{Catalog, Group, Item, Section};
pub use error::{NavrailError, Result};
