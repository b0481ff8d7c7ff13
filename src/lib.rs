//! Navrail: a two-level navigation rail for Zellij.
//!
//! Navrail is a terminal multiplexer plugin that provides:
//! - An icon rail of top-level sections, always visible
//! - A collapsible context rail with grouped rows and expandable parents
//! - Live substring search over row and child labels
//! - Light and dark palettes, with the choice persisted across sessions
//! - Keyboard and mouse navigation with a single active row per section
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Controller
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Tree Layer    │   │ Worker Layer  │
//! │ (ui/)         │   │ (tree/)       │   │ (worker/)     │
//! │ - Rendering   │   │ - Display tree│   │ - Preference  │
//! │ - Theming     │   │ - Filtering   │   │   writes      │
//! │ - Hit testing │   │               │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage & Infrastructure Layers            │
//! │  - Catalog and theme mode (domain/)                 │
//! │  - Key-value preference store (storage/)            │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state and event/action model
//! - [`domain`]: Section catalog, theme mode, errors
//! - [`tree`]: Display tree building and search filtering
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: JSON preference store
//! - [`worker`]: Background worker persisting preferences
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! pane size=40 {
//!     plugin location="file:/path/to/navrail.wasm" {
//!         default_section "tasks"
//!         theme "dark"
//!         dark_theme_file "~/.config/navrail/dark.toml"
//!         catalog_file "~/.config/navrail/catalog.toml"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`):
//!    - Parse configuration from Zellij
//!    - Initialize tracing
//!    - Build `AppState` from the catalog, palettes and stored theme
//!    - Subscribe to key, mouse, timer and worker events
//!
//! 2. **Interaction**:
//!    - Keys and clicks become [`Event`]s
//!    - [`handle_event`] mutates state and returns [`Action`]s
//!    - Theme changes are posted to the worker, which writes them to disk
//!
//! 3. **UI Rendering**:
//!    - Compute view model from state
//!    - Render components (rail, header, search, body, footer)
//!    - Remember the frame's click regions for hit testing
//!
//! # Example
//!
//! ```rust
//! use navrail::{handle_event, initialize_from, Config, Event};
//! use navrail::storage::JsonStorage;
//!
//! let dir = std::env::temp_dir().join("navrail-doc");
//! let storage = JsonStorage::open_read_only(dir.join("prefs.json"))?;
//! let mut state = initialize_from(&Config::default(), &storage);
//!
//! for event in [Event::SelectSection("tasks".into()), Event::SearchChar('b')] {
//!     let (_should_render, _actions) = handle_event(&mut state, &event)?;
//! }
//! assert_eq!(state.query(), "b");
//! # Ok::<(), navrail::NavrailError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Library tests**: any native target; nothing outside `main.rs` touches the host

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod tree;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Focus};
pub use domain::{Catalog, NavrailError, Result, ThemeMode};
pub use ui::{Theme, ThemeSet};

use std::collections::BTreeMap;

use crate::infrastructure::{expand_tilde, preferences_path};
use crate::storage::{JsonStorage, Storage};

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/navrail.wasm" {
///     default_section "settings"
///     theme "light"
///     light_theme_file "/path/to/light.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Section shown at startup. Falls back to the first section when absent
    /// or unknown.
    pub default_section: Option<String>,

    /// Theme used when nothing has been persisted yet. Default: light
    pub theme: ThemeMode,

    /// Path to a TOML palette replacing the built-in light theme.
    pub light_theme_file: Option<String>,

    /// Path to a TOML palette replacing the built-in dark theme.
    pub dark_theme_file: Option<String>,

    /// Path to a TOML catalog replacing the built-in sections.
    pub catalog_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `theme`: `"light"` or `"dark"`; anything else keeps the default
    /// - empty strings count as unset
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use navrail::{Config, ThemeMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "dark".to_string());
    /// map.insert("default_section".to_string(), "tasks".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.theme, ThemeMode::Dark);
    /// assert_eq!(config.default_section.as_deref(), Some("tasks"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let theme = value("theme").map_or_else(ThemeMode::default, |raw| {
            raw.parse().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "unknown theme in config, using light");
                ThemeMode::default()
            })
        });

        Self {
            default_section: value("default_section"),
            theme,
            light_theme_file: value("light_theme_file"),
            dark_theme_file: value("dark_theme_file"),
            catalog_file: value("catalog_file"),
            trace_level: value("trace_level"),
        }
    }
}

/// Initializes the plugin state, reading the stored theme from the default
/// preference file.
///
/// A store that cannot be read is treated as empty.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    build_state(config, read_stored_theme().unwrap_or(config.theme))
}

/// Initializes the plugin state against an explicit preference store.
///
/// # Side Effects
///
/// None: the store is only read. Custom catalog and palette files that fail to
/// load are logged and replaced by the built-ins.
#[must_use]
pub fn initialize_from(config: &Config, storage: &dyn Storage) -> AppState {
    build_state(config, stored_theme(storage).unwrap_or(config.theme))
}

/// Reads the persisted theme from the default preference file, if any.
///
/// The plugin calls this again once filesystem access is granted, since the
/// read during load may have been refused.
#[must_use]
pub fn read_stored_theme() -> Option<ThemeMode> {
    match JsonStorage::open_read_only(preferences_path()) {
        Ok(storage) => stored_theme(&storage),
        Err(e) => {
            tracing::warn!(error = %e, "preference store unreadable, using configured theme");
            None
        }
    }
}

fn stored_theme(storage: &dyn Storage) -> Option<ThemeMode> {
    storage::load_theme(storage).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read stored theme");
        None
    })
}

fn build_state(config: &Config, theme: ThemeMode) -> AppState {
    tracing::debug!(theme = %theme, "initializing navrail plugin");

    let catalog = config.catalog_file.as_ref().map_or_else(Catalog::builtin, |file| {
        Catalog::from_file(expand_tilde(file)).unwrap_or_else(|e| {
            tracing::warn!(catalog_file = %file, error = %e, "failed to load catalog, using built-in");
            Catalog::builtin()
        })
    });

    let themes = ThemeSet::load(config.light_theme_file.as_deref(), config.dark_theme_file.as_deref());
    let mut state = AppState::new(catalog, themes, theme);

    if let Some(section) = &config.default_section {
        if let Err(e) = state.select_section(section) {
            tracing::warn!(section = %section, error = %e, "unknown default section, showing first section");
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::THEME_KEY;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.theme, ThemeMode::Light);
        assert!(config.default_section.is_none());
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn test_config_ignores_bad_values() {
        let config = Config::from_zellij(&map(&[("theme", "sepia"), ("catalog_file", "  ")]));
        assert_eq!(config.theme, ThemeMode::Light);
        assert!(config.catalog_file.is_none());
    }

    #[test]
    fn test_stored_theme_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("prefs.json")).unwrap();
        storage.set(THEME_KEY, "dark").unwrap();

        let state = initialize_from(&Config::default(), &storage);
        assert_eq!(state.theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_empty_store_uses_config_theme() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open_read_only(dir.path().join("missing.json")).unwrap();
        let config = Config { theme: ThemeMode::Dark, ..Config::default() };

        let state = initialize_from(&config, &storage);
        assert_eq!(state.theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_default_section() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open_read_only(dir.path().join("prefs.json")).unwrap();

        let config = Config { default_section: Some("settings".to_string()), ..Config::default() };
        assert_eq!(initialize_from(&config, &storage).current_section_key(), "settings");

        let config = Config { default_section: Some("nope".to_string()), ..Config::default() };
        assert_eq!(initialize_from(&config, &storage).current_section_key(), "dashboard");
    }

    #[test]
    fn test_missing_catalog_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::open_read_only(dir.path().join("prefs.json")).unwrap();
        let config = Config {
            catalog_file: Some(dir.path().join("absent.toml").display().to_string()),
            ..Config::default()
        };

        let state = initialize_from(&config, &storage);
        assert_eq!(state.catalog().sections().len(), Catalog::builtin().sections().len());
    }
}
