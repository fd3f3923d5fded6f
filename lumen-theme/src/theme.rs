//! # Theme Definitions
//!
//! A [ThemeConfig] is the unit stored in the
//! [ThemeRegistry](crate::registry::ThemeRegistry): a registry key, some
//! presentation metadata and a [ThemeColors] block.
//!
//! Definitions can be written in TOML or JSON. Keys are camelCase in both
//! formats so that a definition exported from one tool can be dropped into
//! another unchanged:
//!
//! ```toml
//! name = "harbor"
//! displayName = "Harbor"
//! icon = "⚓"
//! category = "nature"
//!
//! [colors]
//! primary = "#1b9aaa"
//! secondary = "#dddbcb"
//! surface = "#f5f1e3"
//! background = "#ffffff"
//! text = "#050505"
//! ```
//!
//! Parsing never validates. An incomplete definition deserializes fine and is
//! rejected later by [validate](crate::validator::validate), which reports
//! every problem at once instead of stopping at the first.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors::ThemeColors;
use crate::error::{ThemeError, ThemeResult};

/// A named theme definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Registry key. Must be non-empty.
    #[serde(default)]
    pub name: String,
    /// Human-readable name shown in theme pickers.
    #[serde(default)]
    pub display_name: String,
    /// Short icon, usually a single emoji.
    #[serde(default)]
    pub icon: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grouping used by theme pickers, e.g. `nature` or `warm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Author of the theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Version string of the theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Search tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether the theme was supplied at runtime rather than shipped.
    #[serde(default)]
    pub is_custom: bool,
    /// The color block. `None` only for definitions that have not been
    /// validated yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ThemeColors>,
}

impl ThemeConfig {
    /// Create a theme definition with the given key, display name and colors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lumen_theme::colors::ThemeColors;
    /// use lumen_theme::theme::ThemeConfig;
    ///
    /// let theme = ThemeConfig::new(
    ///     "harbor",
    ///     "Harbor",
    ///     ThemeColors::new("#1b9aaa", "#dddbcb", "#f5f1e3", "#ffffff", "#050505"),
    /// )
    /// .with_icon("⚓")
    /// .with_category("nature");
    ///
    /// assert_eq!(theme.primary(), Some("#1b9aaa"));
    /// ```
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, colors: ThemeColors) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            colors: Some(colors),
            ..Default::default()
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add a search tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Mark the theme as supplied at runtime.
    pub fn custom(mut self) -> Self {
        self.is_custom = true;
        self
    }

    /// Copy of this definition registered under another key.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Shortcut for the primary color, if the definition has colors.
    pub fn primary(&self) -> Option<&str> {
        self.colors
            .as_ref()
            .map(|colors| colors.primary.as_str())
            .filter(|primary| !primary.is_empty())
    }

    /// Parse a definition from JSON.
    pub fn from_json(content: &str) -> ThemeResult<Self> {
        serde_json::from_str(content).map_err(|e| ThemeError::Serialization(e.to_string()))
    }

    /// Serialize the definition to pretty-printed JSON.
    pub fn to_json(&self) -> ThemeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ThemeError::Serialization(e.to_string()))
    }

    /// Parse a definition from TOML.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        toml::from_str(content).map_err(|e| ThemeError::Serialization(e.to_string()))
    }

    /// Serialize the definition to TOML.
    pub fn to_toml(&self) -> ThemeResult<String> {
        toml::to_string_pretty(self).map_err(|e| ThemeError::Serialization(e.to_string()))
    }

    /// Load a definition from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// [ThemeError::ThemeFileNotFound] when the file does not exist and
    /// [ThemeError::ThemeParseError] when it cannot be parsed or has an
    /// unsupported extension.
    pub fn from_file(path: impl AsRef<Path>) -> ThemeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::file_not_found(path));
        }

        let content = fs::read_to_string(path)?;
        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => {
                return Err(ThemeError::parse_error(
                    path,
                    "Unsupported theme file format. Use .toml or .json",
                ))
            },
        };

        parsed.map_err(|err| match err {
            ThemeError::Serialization(details) => ThemeError::parse_error(path, details),
            other => other,
        })
    }
}
