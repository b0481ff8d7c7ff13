//! Storage layer for the persisted theme preference.
//!
//! The only durable state the plugin owns is the light/dark flag. It lives in a
//! small JSON key-value file behind the [`Storage`] trait. Reads happen once at
//! startup on the plugin thread; writes are posted to the background worker and
//! never block or fail the UI.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `models`: Storage record types

pub mod backend;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use json::JsonStorage;
pub use models::PreferenceRecord;

use crate::domain::{Result, ThemeMode, THEME_KEY};

/// Reads the persisted theme mode.
///
/// Returns `Ok(None)` when no theme has been stored yet, or when the stored value
/// is not a recognized mode (treated the same as absent).
///
/// # Errors
///
/// Returns an error if the backend read fails.
pub fn load_theme(storage: &dyn Storage) -> Result<Option<ThemeMode>> {
    let Some(raw) = storage.get(THEME_KEY)? else {
        return Ok(None);
    };

    match raw.parse::<ThemeMode>() {
        Ok(mode) => Ok(Some(mode)),
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "ignoring unrecognized stored theme");
            Ok(None)
        }
    }
}

/// Persists the theme mode.
///
/// # Errors
///
/// Returns an error if the backend write fails.
pub fn save_theme(storage: &mut dyn Storage, mode: ThemeMode) -> Result<()> {
    storage.set(THEME_KEY, mode.as_str())
}
