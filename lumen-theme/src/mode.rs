use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The user's display-mode choice.
///
/// [DisplayMode::Auto] follows the system preference; the resolved
/// light/dark state is tracked separately as a plain `bool`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Always light.
    #[default]
    Light,
    /// Always dark.
    Dark,
    /// Follow the system preference.
    Auto,
}

impl DisplayMode {
    /// The persisted string form: `light`, `dark` or `auto`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
            DisplayMode::Auto => "auto",
        }
    }

    /// Resolve the dark flag, consulting `system_prefers_dark` only for
    /// [DisplayMode::Auto].
    pub fn resolve(&self, system_prefers_dark: bool) -> bool {
        match self {
            DisplayMode::Light => false,
            DisplayMode::Dark => true,
            DisplayMode::Auto => system_prefers_dark,
        }
    }

    /// The explicit mode matching a resolved dark flag.
    pub fn explicit(is_dark: bool) -> Self {
        if is_dark {
            DisplayMode::Dark
        } else {
            DisplayMode::Light
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown display mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown display mode '{0}'")]
pub struct ParseModeError(pub String);

impl FromStr for DisplayMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(DisplayMode::Light),
            "dark" => Ok(DisplayMode::Dark),
            "auto" => Ok(DisplayMode::Auto),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
