//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait, a minimal durable key-value store.
//! The plugin keeps a single preference in it (the theme flag), but the trait is
//! string-keyed so the backend stays independent of what is stored.

use crate::domain::error::Result;

/// Abstraction over persistent key-value backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use navrail::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/preferences.json"))?;
/// storage.set("theme", "dark")?;
/// assert_eq!(storage.get("theme")?.as_deref(), Some("dark"));
/// # Ok::<(), navrail::NavrailError>(())
/// ```
pub trait Storage: Send {
    /// Reads the value stored under `key`, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value, and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted. The in-memory copy may
    /// already hold the new value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<bool>;
}
