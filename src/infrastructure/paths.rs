//! Path manipulation utilities for Zellij sandbox environment.
//!
//! In the Zellij plugin sandbox the host filesystem is mounted under `/host`.
//! These helpers locate the plugin's data directory and resolve user-supplied
//! configuration paths (theme and catalog files) inside the sandbox.

use std::path::PathBuf;

/// Returns the data directory for Navrail storage.
///
/// The directory is located at `/host/.local/share/zellij/navrail` in the Zellij
/// sandbox, which typically resolves to `~/.local/share/zellij/navrail` on the
/// host. It holds `preferences.json` and the trace file.
///
/// # Examples
///
/// ```
/// use navrail::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/navrail");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("navrail")
}

/// Path of the preference store inside the data directory.
#[must_use]
pub fn preferences_path() -> PathBuf {
    get_data_dir().join("preferences.json")
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// # Examples
///
/// ```
/// use navrail::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/light.toml"), "/host/themes/light.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
