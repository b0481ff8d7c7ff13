//! Navigation catalog: sections, groups and items.
//!
//! The catalog is the static data that drives the context rail. Each section has
//! a title, a rail icon and one or more groups; a group has a label and an ordered
//! list of items. An item with a non-empty `children` list is a parent row, any
//! other item is a simple row.
//!
//! The built-in catalog is compiled into the plugin from `catalog/default.toml`.
//! A replacement can be loaded from a TOML file with the same shape.

use crate::domain::error::{NavrailError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One entry in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Symbolic icon identifier, resolved to a glyph by the UI layer.
    pub icon: String,
    pub label: String,
    /// Child labels. Empty for simple rows.
    #[serde(default)]
    pub children: Vec<String>,
}

impl Item {
    /// Returns `true` when this item renders as an expandable parent row.
    #[must_use]
    pub fn is_parent(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A labeled cluster of items within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub label: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A top-level navigable area selected from the icon rail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique key used to address the section.
    pub key: String,
    /// Title shown in the context rail header.
    pub title: String,
    /// Icon shown on the section's rail button.
    #[serde(default = "default_section_icon")]
    pub icon: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

fn default_section_icon() -> String {
    "circle".to_string()
}

/// Ordered set of sections, immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// Builds a catalog from sections, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`NavrailError::Catalog`] if there are no sections or if two
    /// sections share a key.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        let catalog = Self { sections };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`NavrailError::Catalog`] on malformed TOML or failed validation.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(contents)
            .map_err(|e| NavrailError::Catalog(format!("failed to parse catalog TOML: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Returns the catalog compiled into the plugin.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in catalog fails to parse (should never occur).
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(include_str!("../../catalog/default.toml"))
            .expect("Built-in catalog should always parse")
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(NavrailError::Catalog("catalog has no sections".to_string()));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.key.as_str()) {
                return Err(NavrailError::Catalog(format!(
                    "duplicate section key: {}",
                    section.key
                )));
            }
        }
        Ok(())
    }

    /// All sections in rail order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Looks up a section by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Rail position of a section key.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.key == key)
    }

    /// The first section; the default when no other is configured.
    #[must_use]
    pub fn first(&self) -> &Section {
        // validate() guarantees at least one section
        &self.sections[0]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
