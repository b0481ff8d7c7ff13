//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable key-value store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) to prevent
//! corruption on crashes.

use crate::domain::error::{NavrailError, Result};
use crate::storage::backend::Storage;
use crate::storage::models::PreferenceRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Stored preferences by key.
    #[serde(default)]
    preferences: BTreeMap<String, PreferenceRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            preferences: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The entire dataset is kept in memory and persisted on every modification.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "preferences": {
///     "theme": { "value": "dark", "updated_at": 1700000000 }
///   }
/// }
/// ```
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation.
    data: StorageData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty without
    /// touching the disk. Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(preference_count = data.preferences.len(), "storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Opens an existing store for reading without creating directories.
    ///
    /// Used at startup, before the plugin may write anything: a missing file
    /// yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open_read_only(file_path: PathBuf) -> Result<Self> {
        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            StorageData::default()
        };

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Loads storage data from a JSON file.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| NavrailError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            preferences = data.preferences.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Saves storage data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| NavrailError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "storage saved successfully");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.preferences.get(key).map(|r| r.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = %key, value = %value).entered();

        if self.data.preferences.get(key).is_some_and(|r| r.value == value) {
            tracing::trace!("value unchanged");
            return Ok(());
        }

        self.data
            .preferences
            .insert(key.to_string(), PreferenceRecord::new(value));
        self.dirty = true;
        self.save_to_file()
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let removed = self.data.preferences.remove(key).is_some();
        if removed {
            self.dirty = true;
            self.save_to_file()?;
        }
        Ok(removed)
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("prefs.json")).unwrap();
        assert_eq!(storage.get("theme").unwrap(), None);
        assert!(!dir.path().join("prefs.json").exists());
    }

    #[test]
    fn test_set_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.set("theme", "dark").unwrap();
        }

        let reopened = JsonStorage::open_read_only(path.clone()).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_overwrite_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut storage = JsonStorage::new(path.clone()).unwrap();

        storage.set("theme", "dark").unwrap();
        storage.set("theme", "light").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("light"));

        assert!(storage.remove("theme").unwrap());
        assert!(!storage.remove("theme").unwrap());
        drop(storage);

        let reopened = JsonStorage::open_read_only(path).unwrap();
        assert_eq!(reopened.get("theme").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonStorage::open_read_only(path),
            Err(NavrailError::Storage(_))
        ));
    }
}
