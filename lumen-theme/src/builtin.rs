//! The built-in theme catalog.
//!
//! Five curated themes ship with the registry. `coastal` is the default.
//! Every built-in theme defines all nineteen color slots.

use crate::colors::ThemeColors;
use crate::theme::ThemeConfig;

/// Registry key of the default theme.
pub const DEFAULT_THEME: &str = "coastal";

/// Registry keys of the built-in themes, in catalog order.
pub const BUILTIN_THEME_NAMES: [&str; 5] = [
    "coastal",
    "icarus",
    "midnight-lightning",
    "future-house",
    "wedding-adjacent",
];

// Semantic colors shared by every built-in theme.
const ERROR: &str = "#d32f2f";
const WARNING: &str = "#f57c00";
const SUCCESS: &str = "#388e3c";
const INFO: &str = "#1976d2";

struct Swatch {
    primary: [&'static str; 3],
    secondary: [&'static str; 3],
    surface: [&'static str; 3],
    neutral: &'static str,
    text: &'static str,
    outline: &'static str,
    text_secondary: &'static str,
    text_disabled: &'static str,
}

impl Swatch {
    fn into_colors(self) -> ThemeColors {
        let some = |value: &str| Some(value.to_string());
        ThemeColors {
            primary: self.primary[0].to_string(),
            primary_light: some(self.primary[1]),
            primary_dark: some(self.primary[2]),
            secondary: self.secondary[0].to_string(),
            secondary_light: some(self.secondary[1]),
            secondary_dark: some(self.secondary[2]),
            surface: self.surface[0].to_string(),
            surface_light: some(self.surface[1]),
            surface_dark: some(self.surface[2]),
            background: "#ffffff".to_string(),
            text: self.text.to_string(),
            success: some(SUCCESS),
            warning: some(WARNING),
            error: some(ERROR),
            info: some(INFO),
            neutral: some(self.neutral),
            outline: some(self.outline),
            text_secondary: some(self.text_secondary),
            text_disabled: some(self.text_disabled),
        }
    }
}

fn theme(
    name: &str,
    display_name: &str,
    icon: &str,
    description: &str,
    category: &str,
    swatch: Swatch,
) -> ThemeConfig {
    ThemeConfig::new(name, display_name, swatch.into_colors())
        .with_icon(icon)
        .with_description(description)
        .with_category(category)
}

/// Ocean blues with bone and old-lace surfaces. The default theme.
pub fn coastal() -> ThemeConfig {
    theme(
        "coastal",
        "🌊 Coastal",
        "🌊",
        "Ocean-inspired blues and natural tones for a calming interface",
        "nature",
        Swatch {
            primary: ["#1b9aaa", "#4db6c7", "#006d7a"],
            secondary: ["#dddbcb", "#f0eee0", "#c4c2b2"],
            surface: ["#f5f1e3", "#faf8f0", "#e8e4d6"],
            neutral: "#dddbcb",
            text: "#050505",
            outline: "#e0e0e0",
            text_secondary: "#757575",
            text_disabled: "#bdbdbd",
        },
    )
}

/// Golden yellow with redwood accents on celadon.
pub fn icarus() -> ThemeConfig {
    theme(
        "icarus",
        "☀️ Icarus",
        "☀️",
        "Warm golden yellows with earthy tones for an energetic feel",
        "warm",
        Swatch {
            primary: ["#f0a202", "#ffb74d", "#c17900"],
            secondary: ["#a15e49", "#c17a5f", "#7d4535"],
            surface: ["#aedcc0", "#c8e8d4", "#8fc4a3"],
            neutral: "#ac8887",
            text: "#373d20",
            outline: "#d0d0d0",
            text_secondary: "#5a5a5a",
            text_disabled: "#a0a0a0",
        },
    )
}

/// Ultra violet with bright yellow accents.
pub fn midnight_lightning() -> ThemeConfig {
    theme(
        "midnight-lightning",
        "⚡ Midnight Lightning",
        "⚡",
        "Electric purples with bright yellow accents for a dynamic interface",
        "electric",
        Swatch {
            primary: ["#52489c", "#7b6fb3", "#3a2f7a"],
            secondary: ["#ffc145", "#ffd54f", "#f57f17"],
            surface: ["#d5dfe5", "#e8f0f6", "#b8c8d1"],
            neutral: "#542e71",
            text: "#0c0f0a",
            outline: "#d5dfe5",
            text_secondary: "#666666",
            text_disabled: "#999999",
        },
    )
}

/// Prussian blue with jasper accents on lemon chiffon.
pub fn future_house() -> ThemeConfig {
    theme(
        "future-house",
        "🏡 Future House",
        "🏡",
        "Professional blues with warm accents for modern applications",
        "professional",
        Swatch {
            primary: ["#0b3954", "#1e5a7a", "#052a3a"],
            secondary: ["#bf4e30", "#d17a5f", "#a03a24"],
            surface: ["#f2efc7", "#f8f6d9", "#e6e3b5"],
            neutral: "#5c7457",
            text: "#2c5530",
            outline: "#e0e0e0",
            text_secondary: "#4a5c4a",
            text_disabled: "#a5a5a5",
        },
    )
}

/// Myrtle green and viridian on lavender.
pub fn wedding_adjacent() -> ThemeConfig {
    theme(
        "wedding-adjacent",
        "💒 Wedding Adjacent",
        "💒",
        "Elegant greens and lavenders for sophisticated interfaces",
        "elegant",
        Swatch {
            primary: ["#538083", "#7ba0a3", "#3a5a5d"],
            secondary: ["#2a7f62", "#4a9f82", "#1e5a42"],
            surface: ["#dfd9e2", "#f0ecf3", "#c8c0c9"],
            neutral: "#c3acce",
            text: "#89909f",
            outline: "#dfd9e2",
            text_secondary: "#a0a7b0",
            text_disabled: "#c0c7d0",
        },
    )
}

/// All built-in themes, in catalog order.
pub fn builtin_themes() -> Vec<ThemeConfig> {
    vec![
        coastal(),
        icarus(),
        midnight_lightning(),
        future_house(),
        wedding_adjacent(),
    ]
}

/// Look up a built-in theme by its registry key.
pub fn builtin_theme(name: &str) -> Option<ThemeConfig> {
    match name {
        "coastal" => Some(coastal()),
        "icarus" => Some(icarus()),
        "midnight-lightning" => Some(midnight_lightning()),
        "future-house" => Some(future_house()),
        "wedding-adjacent" => Some(wedding_adjacent()),
        _ => None,
    }
}

/// Whether `name` is the key of a built-in theme.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_THEME_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::ColorKey;

    #[test]
    fn test_catalog_is_consistent() {
        let themes = builtin_themes();
        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, BUILTIN_THEME_NAMES);

        for name in BUILTIN_THEME_NAMES {
            assert!(is_builtin(name));
            assert_eq!(builtin_theme(name).map(|t| t.name), Some(name.to_string()));
        }
        assert!(!is_builtin("solarized"));
        assert!(builtin_theme("solarized").is_none());
        assert!(is_builtin(DEFAULT_THEME));
    }

    #[test]
    fn test_builtins_define_every_slot() {
        for theme in builtin_themes() {
            let colors = theme.colors.as_ref().unwrap();
            assert_eq!(colors.iter().count(), ColorKey::ALL.len(), "{}", theme.name);
            assert!(!theme.display_name.is_empty());
            assert!(!theme.icon.is_empty());
        }
    }

    #[test]
    fn test_coastal_palette() {
        let colors = coastal().colors.unwrap();
        assert_eq!(colors.primary, "#1b9aaa");
        assert_eq!(colors.secondary, "#dddbcb");
        assert_eq!(colors.surface, "#f5f1e3");
        assert_eq!(colors.text, "#050505");
        assert_eq!(colors.surface_dark.as_deref(), Some("#e8e4d6"));
    }
}
