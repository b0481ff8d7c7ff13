//! Color palettes and ANSI escape sequence generation.
//!
//! Each [`ThemeMode`] has a palette. The built-in palettes are compiled in from
//! `themes/light.toml` and `themes/dark.toml`; either can be replaced by a
//! custom TOML file named in the plugin configuration.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-light"
//!
//! [colors]
//! header_fg = "#4c4f69"
//! rail_bg = "#e6e9ef"
//! rail_fg = "#5c5f77"
//! rail_active_fg = "#eff1f5"
//! rail_active_bg = "#1e66f5"
//! text_normal = "#4c4f69"
//! text_dim = "#9ca0b0"
//! group_label_fg = "#7c7f93"
//! border = "#ccd0da"
//! search_bar_border = "#ea76cb"
//! search_focus_fg = "#ea76cb"
//! selection_fg = "#eff1f5"
//! selection_bg = "#7287fd"
//! active_fg = "#1e66f5"
//! active_bg = "#dce0e8"
//! match_highlight_fg = "#4c4f69"
//! match_highlight_bg = "#df8e1d"
//! empty_state_fg = "#1e66f5"
//! ```

use crate::domain::error::{NavrailError, Result};
use crate::domain::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named color palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Context rail title.
    pub header_fg: String,

    /// Icon rail column background.
    pub rail_bg: String,
    /// Icon rail button glyphs.
    pub rail_fg: String,
    /// Button of the current section.
    pub rail_active_fg: String,
    pub rail_active_bg: String,

    pub text_normal: String,
    /// Footer hints and secondary text.
    pub text_dim: String,
    pub group_label_fg: String,

    /// Separator lines.
    pub border: String,

    /// Search row frame, and its text color while focused.
    pub search_bar_border: String,
    pub search_focus_fg: String,

    /// Keyboard cursor row.
    pub selection_fg: String,
    pub selection_bg: String,

    /// The active (clicked) row.
    pub active_fg: String,
    pub active_bg: String,

    /// Query matches inside row labels.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// "No matches" message.
    pub empty_state_fg: String,
}

impl Theme {
    /// The compiled-in palette for `mode`.
    ///
    /// # Panics
    ///
    /// Panics if a compiled-in theme file fails to parse.
    #[must_use]
    pub fn builtin(mode: ThemeMode) -> Self {
        let source = match mode {
            ThemeMode::Light => include_str!("../../themes/light.toml"),
            ThemeMode::Dark => include_str!("../../themes/dark.toml"),
        };
        toml::from_str(source).expect("built-in theme should always parse")
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NavrailError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| NavrailError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| NavrailError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb`; anything malformed renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(ThemeMode::default())
    }
}

/// The light and dark palettes, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    pub light: Theme,
    pub dark: Theme,
}

impl ThemeSet {
    /// Built-in palettes, each optionally replaced by a custom file.
    ///
    /// A custom file that fails to load is logged and the built-in palette is
    /// used instead.
    #[must_use]
    pub fn load(light_file: Option<&str>, dark_file: Option<&str>) -> Self {
        Self {
            light: Self::resolve(ThemeMode::Light, light_file),
            dark: Self::resolve(ThemeMode::Dark, dark_file),
        }
    }

    fn resolve(mode: ThemeMode, file: Option<&str>) -> Theme {
        let Some(file) = file else {
            return Theme::builtin(mode);
        };

        let path = crate::infrastructure::expand_tilde(file);
        Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(mode = %mode, path = %path, error = %e, "custom theme unavailable, using built-in");
            Theme::builtin(mode)
        })
    }

    /// The palette for `mode`.
    #[must_use]
    pub const fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::load(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_palettes_parse() {
        assert_eq!(Theme::builtin(ThemeMode::Light).name, "light");
        assert_eq!(Theme::builtin(ThemeMode::Dark).name, "dark");
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("0000ff"), "\u{1b}[48;2;0;0;255m");
        assert_eq!(Theme::fg("nonsense"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn test_custom_file_overrides_and_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom = Theme::builtin(ThemeMode::Dark);
        custom.name = "midnight".to_string();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes()).unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let set = ThemeSet::load(Some("/nonexistent/theme.toml"), Some(&path));

        assert_eq!(set.get(ThemeMode::Light).name, "light");
        assert_eq!(set.get(ThemeMode::Dark).name, "midnight");
    }
}
