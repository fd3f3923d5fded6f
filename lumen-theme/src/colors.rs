use serde::{Deserialize, Serialize};

/// Type-safe keys for every color slot of [ThemeColors].
///
/// The string form is the camelCase key used in theme files and in the
/// projected style properties (`--bb-<key>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    // Primary colors
    /// `primary`
    Primary,
    /// `primaryLight`
    PrimaryLight,
    /// `primaryDark`
    PrimaryDark,

    // Secondary colors
    /// `secondary`
    Secondary,
    /// `secondaryLight`
    SecondaryLight,
    /// `secondaryDark`
    SecondaryDark,

    // Surface colors
    /// `surface`
    Surface,
    /// `surfaceLight`
    SurfaceLight,
    /// `surfaceDark`
    SurfaceDark,

    // Background and text
    /// `background`
    Background,
    /// `text`
    Text,

    // Semantic colors
    /// `success`
    Success,
    /// `warning`
    Warning,
    /// `error`
    Error,
    /// `info`
    Info,

    // Neutral colors
    /// `neutral`
    Neutral,
    /// `outline`
    Outline,

    // Text variants
    /// `textSecondary`
    TextSecondary,
    /// `textDisabled`
    TextDisabled,
}

impl ColorKey {
    /// Every key, in declaration order.
    pub const ALL: [ColorKey; 19] = [
        ColorKey::Primary,
        ColorKey::PrimaryLight,
        ColorKey::PrimaryDark,
        ColorKey::Secondary,
        ColorKey::SecondaryLight,
        ColorKey::SecondaryDark,
        ColorKey::Surface,
        ColorKey::SurfaceLight,
        ColorKey::SurfaceDark,
        ColorKey::Background,
        ColorKey::Text,
        ColorKey::Success,
        ColorKey::Warning,
        ColorKey::Error,
        ColorKey::Info,
        ColorKey::Neutral,
        ColorKey::Outline,
        ColorKey::TextSecondary,
        ColorKey::TextDisabled,
    ];

    /// Keys every theme must define.
    pub const REQUIRED: [ColorKey; 5] = [
        ColorKey::Primary,
        ColorKey::Secondary,
        ColorKey::Surface,
        ColorKey::Background,
        ColorKey::Text,
    ];

    /// Get the camelCase key for this slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorKey::Primary => "primary",
            ColorKey::PrimaryLight => "primaryLight",
            ColorKey::PrimaryDark => "primaryDark",
            ColorKey::Secondary => "secondary",
            ColorKey::SecondaryLight => "secondaryLight",
            ColorKey::SecondaryDark => "secondaryDark",
            ColorKey::Surface => "surface",
            ColorKey::SurfaceLight => "surfaceLight",
            ColorKey::SurfaceDark => "surfaceDark",
            ColorKey::Background => "background",
            ColorKey::Text => "text",
            ColorKey::Success => "success",
            ColorKey::Warning => "warning",
            ColorKey::Error => "error",
            ColorKey::Info => "info",
            ColorKey::Neutral => "neutral",
            ColorKey::Outline => "outline",
            ColorKey::TextSecondary => "textSecondary",
            ColorKey::TextDisabled => "textDisabled",
        }
    }

    /// Look a key up by its camelCase name.
    pub fn from_name(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == key)
    }

    /// Whether every theme must define this slot.
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

/// The color slots of a theme.
///
/// Required slots are plain strings; an empty string means the slot is
/// missing, which only happens for definitions that have not been validated
/// yet. Optional slots are `None` when unset, never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Main brand color.
    #[serde(default)]
    pub primary: String,
    /// Lighter primary variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_light: Option<String>,
    /// Darker primary variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_dark: Option<String>,

    /// Secondary accent color.
    #[serde(default)]
    pub secondary: String,
    /// Lighter secondary variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_light: Option<String>,
    /// Darker secondary variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_dark: Option<String>,

    /// Color of raised surfaces such as cards.
    #[serde(default)]
    pub surface: String,
    /// Lighter surface variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_light: Option<String>,
    /// Darker surface variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_dark: Option<String>,

    /// Page background.
    #[serde(default)]
    pub background: String,
    /// Main text color.
    #[serde(default)]
    pub text: String,

    /// Success state color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    /// Warning state color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Error state color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational state color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    /// Neutral accent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral: Option<String>,
    /// Border and divider color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,

    /// De-emphasized text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_secondary: Option<String>,
    /// Disabled text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_disabled: Option<String>,
}

impl ThemeColors {
    /// Create colors with the five required slots set.
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
        surface: impl Into<String>,
        background: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            surface: surface.into(),
            background: background.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Get the value of a slot, or `None` if it is unset.
    pub fn get(&self, key: ColorKey) -> Option<&str> {
        let value = match key {
            ColorKey::Primary => Some(&self.primary),
            ColorKey::PrimaryLight => self.primary_light.as_ref(),
            ColorKey::PrimaryDark => self.primary_dark.as_ref(),
            ColorKey::Secondary => Some(&self.secondary),
            ColorKey::SecondaryLight => self.secondary_light.as_ref(),
            ColorKey::SecondaryDark => self.secondary_dark.as_ref(),
            ColorKey::Surface => Some(&self.surface),
            ColorKey::SurfaceLight => self.surface_light.as_ref(),
            ColorKey::SurfaceDark => self.surface_dark.as_ref(),
            ColorKey::Background => Some(&self.background),
            ColorKey::Text => Some(&self.text),
            ColorKey::Success => self.success.as_ref(),
            ColorKey::Warning => self.warning.as_ref(),
            ColorKey::Error => self.error.as_ref(),
            ColorKey::Info => self.info.as_ref(),
            ColorKey::Neutral => self.neutral.as_ref(),
            ColorKey::Outline => self.outline.as_ref(),
            ColorKey::TextSecondary => self.text_secondary.as_ref(),
            ColorKey::TextDisabled => self.text_disabled.as_ref(),
        };
        value.map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Set a slot. An empty value clears optional slots.
    pub fn set(&mut self, key: ColorKey, value: impl Into<String>) {
        let value = value.into();
        let optional = if value.is_empty() { None } else { Some(value.clone()) };
        match key {
            ColorKey::Primary => self.primary = value,
            ColorKey::PrimaryLight => self.primary_light = optional,
            ColorKey::PrimaryDark => self.primary_dark = optional,
            ColorKey::Secondary => self.secondary = value,
            ColorKey::SecondaryLight => self.secondary_light = optional,
            ColorKey::SecondaryDark => self.secondary_dark = optional,
            ColorKey::Surface => self.surface = value,
            ColorKey::SurfaceLight => self.surface_light = optional,
            ColorKey::SurfaceDark => self.surface_dark = optional,
            ColorKey::Background => self.background = value,
            ColorKey::Text => self.text = value,
            ColorKey::Success => self.success = optional,
            ColorKey::Warning => self.warning = optional,
            ColorKey::Error => self.error = optional,
            ColorKey::Info => self.info = optional,
            ColorKey::Neutral => self.neutral = optional,
            ColorKey::Outline => self.outline = optional,
            ColorKey::TextSecondary => self.text_secondary = optional,
            ColorKey::TextDisabled => self.text_disabled = optional,
        }
    }

    /// Builder-style [ThemeColors::set].
    pub fn with(mut self, key: ColorKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Iterate over every present slot in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorKey, &str)> + '_ {
        ColorKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        for key in ColorKey::ALL {
            assert_eq!(ColorKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(ColorKey::from_name("tech"), None);
        assert!(ColorKey::Text.is_required());
        assert!(!ColorKey::TextSecondary.is_required());
    }

    #[test]
    fn test_iter_skips_unset_slots() {
        let colors = ThemeColors::new("#111111", "#222222", "#333333", "#444444", "#555555")
            .with(ColorKey::Outline, "#666666");
        let keys: Vec<&str> = colors.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["primary", "secondary", "surface", "background", "text", "outline"]);
    }

    #[test]
    fn test_empty_value_clears_optional_slot() {
        let mut colors = ThemeColors::default().with(ColorKey::Info, "#1976d2");
        assert_eq!(colors.get(ColorKey::Info), Some("#1976d2"));
        colors.set(ColorKey::Info, "");
        assert_eq!(colors.info, None);
        assert_eq!(colors.get(ColorKey::Primary), None);
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let colors = ThemeColors::new("#111111", "#222222", "#333333", "#444444", "#555555")
            .with(ColorKey::TextSecondary, "#757575");
        let json = serde_json::to_value(&colors).unwrap();
        assert_eq!(json["textSecondary"], "#757575");
        assert!(json.get("primaryLight").is_none());

        let parsed: ThemeColors = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, colors);
    }
}
