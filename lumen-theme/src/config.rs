//! # Theme Service Configuration
//!
//! [ThemeServiceConfig] holds the policy switches of a
//! [ThemeService](crate::manager::ThemeService): the default theme, whether
//! to follow the system preference, persistence, validation, strictness and
//! fallbacks.
//!
//! ## Sources
//!
//! - **Programmatic**: [ThemeServiceConfig::default] plus `with_*` builders
//! - **TOML**: [ThemeServiceConfig::from_toml] / [ThemeServiceConfig::from_file]
//! - **Environment**: [ThemeServiceConfig::from_env_or_default]
//!
//! ## Configuration File Format
//!
//! All keys live in a `[theme]` table and are optional. Missing keys keep
//! their default value:
//!
//! ```toml
//! [theme]
//! default_theme = "icarus"
//! enable_system_mode = true
//! persist_theme = true
//! storage_key_theme = "bb-theme"
//! storage_key_mode = "bb-mode"
//! validate_themes = true
//! strict_mode = false
//! enable_fallbacks = true
//! ```
//!
//! ## Environment Variables
//!
//! - `LUMEN_THEME`: the default theme
//! - `LUMEN_THEME_STRICT`: enable strict mode (`1`, `true`, `yes`, `on`)
//! - `LUMEN_THEME_CONFIG`: path to a TOML file that replaces the whole
//!   configuration

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builtin::DEFAULT_THEME;
use crate::error::{ThemeError, ThemeResult};

/// Policy switches of a [ThemeService](crate::manager::ThemeService).
///
/// # Examples
///
/// ```rust
/// use lumen_theme::config::ThemeServiceConfig;
///
/// let config = ThemeServiceConfig::default()
///     .with_default_theme("icarus")
///     .with_strict_mode(true);
///
/// assert_eq!(config.default_theme, "icarus");
/// assert!(config.enable_fallbacks);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeServiceConfig {
    /// Theme activated when nothing is persisted, and the fallback target.
    pub default_theme: String,
    /// Follow the system light/dark preference.
    pub enable_system_mode: bool,
    /// Persist the active theme and display mode.
    pub persist_theme: bool,
    /// Storage key of the persisted theme name.
    pub storage_key_theme: String,
    /// Storage key of the persisted display mode.
    pub storage_key_mode: String,
    /// Validate themes on registration and activation.
    pub validate_themes: bool,
    /// Surface validation and application failures as hard errors.
    pub strict_mode: bool,
    /// Fall back to the default theme when a theme cannot be used.
    pub enable_fallbacks: bool,
}

impl Default for ThemeServiceConfig {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME.to_string(),
            enable_system_mode: true,
            persist_theme: true,
            storage_key_theme: "bb-theme".to_string(),
            storage_key_mode: "bb-mode".to_string(),
            validate_themes: true,
            strict_mode: false,
            enable_fallbacks: true,
        }
    }
}

/// A partial configuration, as read from one configuration file.
///
/// Only the keys that are present override anything when passed to
/// [ThemeServiceConfig::merge].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    /// See [ThemeServiceConfig::default_theme].
    pub default_theme: Option<String>,
    /// See [ThemeServiceConfig::enable_system_mode].
    pub enable_system_mode: Option<bool>,
    /// See [ThemeServiceConfig::persist_theme].
    pub persist_theme: Option<bool>,
    /// See [ThemeServiceConfig::storage_key_theme].
    pub storage_key_theme: Option<String>,
    /// See [ThemeServiceConfig::storage_key_mode].
    pub storage_key_mode: Option<String>,
    /// See [ThemeServiceConfig::validate_themes].
    pub validate_themes: Option<bool>,
    /// See [ThemeServiceConfig::strict_mode].
    pub strict_mode: Option<bool>,
    /// See [ThemeServiceConfig::enable_fallbacks].
    pub enable_fallbacks: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: ConfigLayer,
}

impl ConfigLayer {
    /// Parse the `[theme]` table of a TOML document.
    ///
    /// A document without a `[theme]` table yields an empty layer.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        toml::from_str::<ConfigFile>(content)
            .map(|file| file.theme)
            .map_err(|e| ThemeError::Serialization(e.to_string()))
    }
}

impl ThemeServiceConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables or use defaults.
    ///
    /// This method reads the following environment variables:
    /// - `LUMEN_THEME`: The default theme
    /// - `LUMEN_THEME_STRICT`: Strict mode
    /// - `LUMEN_THEME_CONFIG`: Path to a configuration file
    ///
    /// A configuration file that cannot be read is logged and ignored.
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [ThemeServiceConfig::from_env_or_default], reading variables
    /// through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(theme) = lookup("LUMEN_THEME").filter(|t| !t.trim().is_empty()) {
            config.default_theme = theme.trim().to_string();
        }

        if let Some(strict) = lookup("LUMEN_THEME_STRICT") {
            config.strict_mode = parse_bool(&strict);
        }

        if let Some(path) = lookup("LUMEN_THEME_CONFIG") {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(err) => log::warn!("Ignoring LUMEN_THEME_CONFIG: {}", err),
            }
        }

        config
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [ThemeError::ThemeFileNotFound] when the file does not exist and
    /// [ThemeError::ThemeParseError] when it is not valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> ThemeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::file_not_found(path));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|err| match err {
            ThemeError::Serialization(details) => ThemeError::parse_error(path, details),
            other => other,
        })
    }

    /// Load a configuration from TOML content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lumen_theme::config::ThemeServiceConfig;
    ///
    /// let config = ThemeServiceConfig::from_toml(r#"
    /// [theme]
    /// default_theme = "future-house"
    /// persist_theme = false
    /// "#).unwrap();
    ///
    /// assert_eq!(config.default_theme, "future-house");
    /// assert!(!config.persist_theme);
    /// assert!(config.validate_themes);
    /// ```
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        let mut config = Self::new();
        config.merge(ConfigLayer::from_toml(content)?);
        Ok(config)
    }

    /// Override every key that `layer` sets.
    pub fn merge(&mut self, layer: ConfigLayer) {
        if let Some(value) = layer.default_theme {
            self.default_theme = value;
        }
        if let Some(value) = layer.enable_system_mode {
            self.enable_system_mode = value;
        }
        if let Some(value) = layer.persist_theme {
            self.persist_theme = value;
        }
        if let Some(value) = layer.storage_key_theme {
            self.storage_key_theme = value;
        }
        if let Some(value) = layer.storage_key_mode {
            self.storage_key_mode = value;
        }
        if let Some(value) = layer.validate_themes {
            self.validate_themes = value;
        }
        if let Some(value) = layer.strict_mode {
            self.strict_mode = value;
        }
        if let Some(value) = layer.enable_fallbacks {
            self.enable_fallbacks = value;
        }
    }

    /// Set the default theme.
    pub fn with_default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = name.into();
        self
    }

    /// Enable or disable following the system preference.
    pub fn with_system_mode(mut self, enabled: bool) -> Self {
        self.enable_system_mode = enabled;
        self
    }

    /// Enable or disable persistence.
    pub fn with_persistence(mut self, enabled: bool) -> Self {
        self.persist_theme = enabled;
        self
    }

    /// Set both storage keys.
    pub fn with_storage_keys(mut self, theme: impl Into<String>, mode: impl Into<String>) -> Self {
        self.storage_key_theme = theme.into();
        self.storage_key_mode = mode.into();
        self
    }

    /// Enable or disable validation.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_themes = enabled;
        self
    }

    /// Enable or disable strict mode.
    pub fn with_strict_mode(mut self, enabled: bool) -> Self {
        self.strict_mode = enabled;
        self
    }

    /// Enable or disable fallbacks.
    pub fn with_fallbacks(mut self, enabled: bool) -> Self {
        self.enable_fallbacks = enabled;
        self
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ThemeServiceConfig::default();
        assert_eq!(config.default_theme, "coastal");
        assert!(config.enable_system_mode);
        assert!(config.persist_theme);
        assert_eq!(config.storage_key_theme, "bb-theme");
        assert_eq!(config.storage_key_mode, "bb-mode");
        assert!(config.validate_themes);
        assert!(!config.strict_mode);
        assert!(config.enable_fallbacks);
    }

    #[test]
    fn test_from_toml_keeps_unset_keys() {
        let config = ThemeServiceConfig::from_toml(
            r#"
[theme]
strict_mode = true
storage_key_mode = "app-mode"
"#,
        )
        .unwrap();
        assert!(config.strict_mode);
        assert_eq!(config.storage_key_mode, "app-mode");
        assert_eq!(config.storage_key_theme, "bb-theme");
        assert_eq!(config.default_theme, "coastal");

        assert_eq!(ThemeServiceConfig::from_toml("").unwrap(), ThemeServiceConfig::default());
        assert!(ThemeServiceConfig::from_toml("[theme]\nstrict_mode = \"maybe\"").is_err());
    }

    #[test]
    fn test_merge_layers() {
        let mut config = ThemeServiceConfig::default();
        config.merge(ConfigLayer::from_toml("[theme]\ndefault_theme = \"icarus\"\nstrict_mode = true").unwrap());
        config.merge(ConfigLayer::from_toml("[theme]\nstrict_mode = false").unwrap());
        assert_eq!(config.default_theme, "icarus");
        assert!(!config.strict_mode);
    }

    #[test]
    fn test_env_lookup() {
        let config = ThemeServiceConfig::from_lookup(lookup(&[
            ("LUMEN_THEME", "midnight-lightning"),
            ("LUMEN_THEME_STRICT", "yes"),
        ]));
        assert_eq!(config.default_theme, "midnight-lightning");
        assert!(config.strict_mode);

        let config = ThemeServiceConfig::from_lookup(lookup(&[("LUMEN_THEME", "  ")]));
        assert_eq!(config.default_theme, "coastal");
    }

    #[test]
    fn test_env_config_file_replaces_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "[theme]\npersist_theme = false\n").unwrap();

        let config = ThemeServiceConfig::from_lookup(lookup(&[
            ("LUMEN_THEME", "icarus"),
            ("LUMEN_THEME_CONFIG", path.to_str().unwrap()),
        ]));
        assert!(!config.persist_theme);
        assert_eq!(config.default_theme, "coastal");

        let config = ThemeServiceConfig::from_lookup(lookup(&[
            ("LUMEN_THEME", "icarus"),
            ("LUMEN_THEME_CONFIG", "/definitely/not/here.toml"),
        ]));
        assert_eq!(config.default_theme, "icarus");
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ThemeServiceConfig::from_file(dir.path().join("nope.toml")),
            Err(ThemeError::ThemeFileNotFound { .. })
        ));

        let path = dir.path().join("bad.toml");
        fs::write(&path, "[theme\n").unwrap();
        assert!(matches!(
            ThemeServiceConfig::from_file(&path),
            Err(ThemeError::ThemeParseError { .. })
        ));
    }
}
