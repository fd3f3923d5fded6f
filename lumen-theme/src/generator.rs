use lumen_color::adjust::{analogous, darken, lighten};

use crate::colors::ThemeColors;
use crate::theme::ThemeConfig;

/// Hue offset of the generated secondary color.
pub const SECONDARY_HUE_OFFSET: u16 = 30;
/// Lightness delta of the generated light and dark variants.
pub const VARIANT_STEP: u8 = 20;

/// Derive a complete color block from a single primary color.
///
/// The secondary color sits [SECONDARY_HUE_OFFSET] degrees clockwise from
/// the primary. Both get light and dark variants [VARIANT_STEP] lightness
/// points away. Surfaces, text and semantic colors are fixed light-mode
/// values.
///
/// A malformed `primary` is carried through unchanged, so the result fails
/// validation instead of panicking.
pub fn generate_theme_colors(primary: &str) -> ThemeColors {
    let (_, secondary) = analogous(primary, SECONDARY_HUE_OFFSET);
    let some = |value: &str| Some(value.to_string());

    ThemeColors {
        primary: primary.to_string(),
        primary_light: Some(lighten(primary, VARIANT_STEP)),
        primary_dark: Some(darken(primary, VARIANT_STEP)),

        secondary_light: Some(lighten(&secondary, VARIANT_STEP)),
        secondary_dark: Some(darken(&secondary, VARIANT_STEP)),
        secondary,

        surface: "#ffffff".to_string(),
        surface_light: some("#f8fafc"),
        surface_dark: some("#f1f5f9"),

        background: "#ffffff".to_string(),
        text: "#1f2937".to_string(),

        success: some("#10b981"),
        warning: some("#f59e0b"),
        error: some("#ef4444"),
        info: some("#06b6d4"),

        neutral: some("#6b7280"),
        outline: some("#e5e7eb"),
        text_secondary: some("#6b7280"),
        text_disabled: some("#9ca3af"),
    }
}

impl ThemeConfig {
    /// Create a custom theme whose colors are generated from `primary`.
    ///
    /// ```rust
    /// use lumen_theme::theme::ThemeConfig;
    ///
    /// let theme = ThemeConfig::from_primary("teal", "Teal", "#1b9aaa");
    /// assert!(theme.is_custom);
    /// assert_eq!(theme.primary(), Some("#1b9aaa"));
    /// ```
    pub fn from_primary(
        name: impl Into<String>,
        display_name: impl Into<String>,
        primary: &str,
    ) -> Self {
        ThemeConfig::new(name, display_name, generate_theme_colors(primary)).custom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::ColorKey;
    use crate::validator::validate;

    #[test]
    fn test_generated_variants() {
        let colors = generate_theme_colors("#1b9aaa");
        assert_eq!(colors.primary, "#1b9aaa");
        assert_eq!(colors.primary_light.as_deref(), Some("#4ad1e3"));
        assert_eq!(colors.primary_dark.as_deref(), Some("#0d4c54"));
        assert_eq!(colors.secondary, "#1b53ac");
        assert_eq!(colors.secondary_light.as_deref(), Some("#4a85e3"));
        assert_eq!(colors.secondary_dark.as_deref(), Some("#0d2854"));
        assert_eq!(colors.iter().count(), ColorKey::ALL.len());
    }

    #[test]
    fn test_generated_theme_is_valid() {
        let theme = ThemeConfig::from_primary("gen", "Generated", "#52489c");
        assert!(validate(&theme).is_valid);
    }

    #[test]
    fn test_malformed_primary_fails_validation() {
        let theme = ThemeConfig::from_primary("gen", "Generated", "purple");
        let result = validate(&theme);
        assert!(!result.is_valid);
        assert!(result
            .errors
            .contains(&"Invalid color format for 'primary': purple".to_string()));
    }
}
