//! # Theme Validation
//!
//! [validate] checks one [ThemeConfig] in isolation. It never consults the
//! registry and never mutates its input.
//!
//! Errors make a theme unusable: a missing name, display name or color
//! block, a missing required color, or a color value that is not a
//! `#rrggbb` hex string. Warnings are advisory: low WCAG contrast between
//! primary and surface, or between text and background.
//!
//! ```rust
//! use lumen_theme::colors::ThemeColors;
//! use lumen_theme::theme::ThemeConfig;
//! use lumen_theme::validator::validate;
//!
//! let mut colors = ThemeColors::default();
//! colors.primary = "#111111".to_string();
//!
//! let result = validate(&ThemeConfig::new("x", "X", colors));
//! assert!(!result.is_valid);
//! assert_eq!(result.errors.len(), 4);
//! ```

use lumen_color::contrast::contrast_ratio;
use lumen_color::convert::hex_to_rgb;

use crate::colors::{ColorKey, ThemeColors};
use crate::error::{ThemeError, ThemeResult};
use crate::theme::ThemeConfig;

/// Contrast ratio below which a warning is emitted (WCAG AA, normal text).
pub const MIN_CONTRAST: f64 = 4.5;

/// The outcome of [validate].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// `true` when there are no errors. Warnings do not affect validity.
    pub is_valid: bool,
    /// Blocking problems, in the order they were found.
    pub errors: Vec<String>,
    /// Advisory problems, in the order they were found.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Convert into a result carrying the warnings on success.
    ///
    /// `name` is used for the [ThemeError::ValidationFailed] on failure.
    pub fn into_result(self, name: impl Into<String>) -> ThemeResult<Vec<String>> {
        if self.is_valid {
            Ok(self.warnings)
        } else {
            Err(ThemeError::validation(name, self.errors))
        }
    }
}

/// Validate a theme definition.
pub fn validate(theme: &ThemeConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if theme.name.is_empty() {
        errors.push("Theme name is required".to_string());
    }
    if theme.display_name.is_empty() {
        errors.push("Display name is required".to_string());
    }

    match &theme.colors {
        None => errors.push("Colors configuration is required".to_string()),
        Some(colors) => {
            check_colors(colors, &mut errors);
            check_contrast(colors, &mut warnings);
        },
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn check_colors(colors: &ThemeColors, errors: &mut Vec<String>) {
    for key in ColorKey::REQUIRED {
        if colors.get(key).is_none() {
            errors.push(format!("Required color '{}' is missing", key.as_str()));
        }
    }

    for (key, value) in colors.iter() {
        if hex_to_rgb(value).is_none() {
            errors.push(format!(
                "Invalid color format for '{}': {}",
                key.as_str(),
                value
            ));
        }
    }
}

fn check_contrast(colors: &ThemeColors, warnings: &mut Vec<String>) {
    let pairs = [
        (ColorKey::Primary, ColorKey::Surface, "primary and surface"),
        (ColorKey::Text, ColorKey::Background, "text and background"),
    ];

    for (fg, bg, label) in pairs {
        let (Some(fg), Some(bg)) = (colors.get(fg), colors.get(bg)) else {
            continue;
        };
        if hex_to_rgb(fg).is_none() || hex_to_rgb(bg).is_none() {
            continue;
        }

        let ratio = contrast_ratio(fg, bg);
        if ratio < MIN_CONTRAST {
            warnings.push(format!(
                "Low contrast ratio ({:.2}) between {} colors",
                ratio, label
            ));
        }
    }
}
