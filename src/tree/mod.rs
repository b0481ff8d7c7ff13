//! Display tree: rendering catalog sections and filtering the result.
//!
//! ```text
//! Section ──render──▶ DisplayTree ──compute_visibility(query)──▶ Visibility
//! ```
//!
//! # Modules
//!
//! - [`display`]: Node types (`GroupNode`, `RowNode`, `ParentRow`, ...)
//! - [`render`](mod@render): Pure section → tree conversion
//! - [`filter`]: Query normalization, matching and per-row visibility

pub mod display;
pub mod filter;
pub mod render;

pub use display::{
    ChildRow, DisplayTree, GroupNode, ParentRow, RowId, RowKind, RowNode, RowRef, SimpleRow,
};
pub use filter::{compute_visibility, label_matches, match_ranges, normalize_query, Visibility};
pub use render::render;
