//! Light/dark appearance mode.

use crate::domain::error::NavrailError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key under which the current theme mode is persisted.
pub const THEME_KEY: &str = "theme";

/// Which of the two palettes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored string form: `"light"` or `"dark"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Icon identifier of the toggle action, i.e. the theme a click would switch to.
    #[must_use]
    pub const fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "dark_mode",
            Self::Dark => "light_mode",
        }
    }

    /// Label/title of the toggle action.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark theme",
            Self::Dark => "Switch to light theme",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = NavrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(NavrailError::Theme(format!("unknown theme mode: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_shows_next_action() {
        assert_eq!(ThemeMode::Dark.toggle_icon(), "light_mode");
        assert_eq!(ThemeMode::Dark.toggle_label(), "Switch to light theme");
        assert_eq!(ThemeMode::Light.toggle_icon(), "dark_mode");
        assert_eq!(ThemeMode::Light.toggle_label(), "Switch to dark theme");
    }

    #[test]
    fn test_parse_round_trip_and_rejects_unknown() {
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.opposite().opposite(), ThemeMode::Light);
        assert!("Dark".parse::<ThemeMode>().is_err());
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}
