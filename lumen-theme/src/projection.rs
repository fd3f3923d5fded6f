//! # Style Projection
//!
//! Turns a theme and a resolved dark flag into a flat list of named style
//! properties and writes them onto a [StyleSurface].
//!
//! The property set has three layers, applied in order so that later
//! entries win on the surface:
//!
//! 1. **Base colors**: `--bb-<key>` for every color the theme defines.
//! 2. **Mode overrides**: fixed dark-mode colors, or the theme's own
//!    background, surfaces and text plus fixed neutrals in light mode.
//! 3. **Derived tokens**: primary glow, the shadow ladder, font weights and
//!    the card transition.
//!
//! Dark-mode overrides are constants. They are not derived from the
//! theme's `*Dark` color fields.

use crate::colors::ColorKey;
use crate::error::{ThemeError, ThemeResult};
use crate::surface::StyleSurface;
use crate::theme::ThemeConfig;

/// Prefix of every projected property.
pub const PROPERTY_PREFIX: &str = "--bb-";
/// Marker set while dark mode is active.
pub const DARK_MARKER: &str = "bb-dark";
/// Marker set while light mode is active.
pub const LIGHT_MARKER: &str = "bb-light";
/// Attribute carrying the active theme's registry key.
pub const THEME_ATTRIBUTE: &str = "data-bb-theme";
/// `--bb-tech` value for themes without a secondary color.
pub const DEFAULT_TECH: &str = "#06b6d4";

const DARK_OVERRIDES: [(&str, &str); 10] = [
    ("--bb-background", "#121212"),
    ("--bb-surface", "#1e1e1e"),
    ("--bb-surfaceLight", "#2d2d2d"),
    ("--bb-surfaceDark", "#0a0a0a"),
    ("--bb-text", "#ffffff"),
    ("--bb-textSecondary", "#b0b0b0"),
    ("--bb-textDisabled", "#666666"),
    ("--bb-outline", "#424242"),
    ("--bb-outline-variant", "#5a5a5a"),
    ("--bb-neutral-800", "#2d2d2d"),
];

const LIGHT_OVERRIDES: [(&str, &str); 5] = [
    ("--bb-textSecondary", "#757575"),
    ("--bb-textDisabled", "#bdbdbd"),
    ("--bb-outline", "#e0e0e0"),
    ("--bb-outline-variant", "#c4c4c4"),
    ("--bb-neutral-800", "#424242"),
];

const DESIGN_TOKENS: [(&str, &str); 13] = [
    ("--bb-shadow-sm", "0 1px 2px 0 rgba(0, 0, 0, 0.05)"),
    ("--bb-shadow-md", "0 4px 6px -1px rgba(0, 0, 0, 0.1)"),
    ("--bb-shadow-lg", "0 10px 15px -3px rgba(0, 0, 0, 0.1)"),
    ("--bb-shadow-xl", "0 20px 25px -5px rgba(0, 0, 0, 0.1)"),
    ("--bb-shadow-2xl", "0 25px 50px -12px rgba(0, 0, 0, 0.25)"),
    ("--bb-card-shadow", "0 1px 3px 0 rgba(0, 0, 0, 0.1)"),
    ("--bb-card-shadow-hover", "0 4px 6px -1px rgba(0, 0, 0, 0.1)"),
    ("--bb-dropdown-shadow", "0 10px 15px -3px rgba(0, 0, 0, 0.1)"),
    ("--bb-modal-shadow", "0 25px 50px -12px rgba(0, 0, 0, 0.25)"),
    ("--bb-tooltip-shadow", "0 4px 6px -1px rgba(0, 0, 0, 0.1)"),
    ("--bb-font-weight-medium", "500"),
    ("--bb-font-weight-semibold", "600"),
    ("--bb-card-transition", "all 0.2s ease-in-out"),
];

/// One named style property and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssPropertyUpdate {
    /// Property name, e.g. `--bb-primary`.
    pub property: String,
    /// Property value.
    pub value: String,
}

impl CssPropertyUpdate {
    /// Create an update.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// The style property name of a color slot, e.g. `--bb-primaryLight`.
pub fn property_name(key: ColorKey) -> String {
    format!("{}{}", PROPERTY_PREFIX, key.as_str())
}

/// The `--bb-<key>` map of every color the theme defines.
pub fn base_properties(theme: &ThemeConfig) -> Vec<CssPropertyUpdate> {
    theme
        .colors
        .iter()
        .flat_map(|colors| colors.iter())
        .map(|(key, value)| CssPropertyUpdate::new(property_name(key), value))
        .collect()
}

/// Compute the full property set for `theme` in the given mode.
///
/// Properties can repeat: a mode override follows the base color it
/// replaces, and the later entry is the effective one. Theme-sourced values
/// that are missing are skipped rather than written as empty strings.
///
/// ```rust
/// use lumen_theme::builtin;
/// use lumen_theme::projection::compute_properties;
///
/// let dark = compute_properties(&builtin::coastal(), true);
/// let background = dark
///     .iter()
///     .rev()
///     .find(|update| update.property == "--bb-background")
///     .unwrap();
/// assert_eq!(background.value, "#121212");
/// ```
pub fn compute_properties(theme: &ThemeConfig, is_dark: bool) -> Vec<CssPropertyUpdate> {
    let mut updates = base_properties(theme);
    let colors = theme.colors.as_ref();
    let color = |key: ColorKey| colors.and_then(|c| c.get(key));

    let tech = color(ColorKey::Secondary).unwrap_or(DEFAULT_TECH);

    if is_dark {
        updates.extend(
            DARK_OVERRIDES
                .iter()
                .map(|(property, value)| CssPropertyUpdate::new(*property, *value)),
        );
    } else {
        for key in [ColorKey::Background, ColorKey::Surface, ColorKey::Text] {
            if let Some(value) = color(key) {
                updates.push(CssPropertyUpdate::new(property_name(key), value));
            }
        }
        // Surface variants fall back to the surface so no dark constant survives.
        for key in [ColorKey::SurfaceLight, ColorKey::SurfaceDark] {
            if let Some(value) = color(key).or_else(|| color(ColorKey::Surface)) {
                updates.push(CssPropertyUpdate::new(property_name(key), value));
            }
        }
        updates.extend(
            LIGHT_OVERRIDES
                .iter()
                .map(|(property, value)| CssPropertyUpdate::new(*property, *value)),
        );
    }
    updates.push(CssPropertyUpdate::new("--bb-tech", tech));

    if let Some(primary) = color(ColorKey::Primary) {
        updates.push(CssPropertyUpdate::new(
            "--bb-glow-primary",
            format!("0 0 20px {}20", primary),
        ));
    }
    updates.extend(
        DESIGN_TOKENS
            .iter()
            .map(|(property, value)| CssPropertyUpdate::new(*property, *value)),
    );

    updates
}

/// Look up the effective value of `property`: the last update that sets it.
pub fn effective_value<'a>(updates: &'a [CssPropertyUpdate], property: &str) -> Option<&'a str> {
    updates
        .iter()
        .rev()
        .find(|update| update.property == property)
        .map(|update| update.value.as_str())
}

/// Render updates as a `:root` stylesheet.
///
/// Repeated properties are collapsed to their effective value, keeping the
/// position of the first occurrence.
pub fn render_css(updates: &[CssPropertyUpdate]) -> String {
    let mut effective: indexmap::IndexMap<&str, &str> = indexmap::IndexMap::new();
    for update in updates {
        effective.insert(update.property.as_str(), update.value.as_str());
    }

    let mut css = String::from(":root {\n");
    for (property, value) in effective {
        css.push_str("  ");
        css.push_str(property);
        css.push_str(": ");
        css.push_str(value);
        css.push_str(";\n");
    }
    css.push_str("}\n");
    css
}

/// Counts of one [Projector::apply] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Properties written successfully.
    pub applied: usize,
    /// Properties the surface rejected.
    pub failed: usize,
}

/// Writes computed properties to a [StyleSurface] and tracks whether a
/// projection is pending.
///
/// Mutations only [schedule](Projector::schedule) a projection. The owner
/// drains the pending flag once per frame, so a burst of changes within one
/// frame is written once with the final state.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    strict: bool,
    pending: bool,
    frames: usize,
}

impl Projector {
    /// Create a projector. In strict mode, any rejected property makes
    /// [Projector::apply] fail.
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            pending: false,
            frames: 0,
        }
    }

    /// Request a projection at the next frame.
    pub fn schedule(&mut self) {
        self.pending = true;
    }

    /// Whether a projection is pending.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clear the pending flag, returning whether it was set.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Number of projections applied so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Write `updates` to `surface` and mark the mode and theme on it.
    ///
    /// Rejected properties are logged and skipped.
    ///
    /// # Errors
    ///
    /// [ThemeError::ApplicationFailed] in strict mode when at least one
    /// property was rejected. Markers and the theme attribute are still
    /// updated.
    pub fn apply(
        &mut self,
        surface: &mut dyn StyleSurface,
        theme: &ThemeConfig,
        is_dark: bool,
        updates: &[CssPropertyUpdate],
    ) -> ThemeResult<ApplyReport> {
        let mut report = ApplyReport::default();

        for update in updates {
            match surface.set_property(&update.property, &update.value) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    log::warn!(
                        "Failed to set CSS property {}: {} ({})",
                        update.property,
                        update.value,
                        err
                    );
                    report.failed += 1;
                },
            }
        }

        surface.toggle_marker(DARK_MARKER, is_dark);
        surface.toggle_marker(LIGHT_MARKER, !is_dark);
        surface.set_attribute(THEME_ATTRIBUTE, &theme.name);
        self.frames += 1;

        log::debug!(
            "Applied {} CSS properties, {} failed",
            report.applied,
            report.failed
        );

        if self.strict && report.failed > 0 {
            return Err(ThemeError::ApplicationFailed {
                failed: report.failed,
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::surface::MemorySurface;

    #[test]
    fn test_base_properties_follow_declaration_order() {
        let updates = base_properties(&builtin::coastal());
        assert_eq!(updates.len(), 19);
        assert_eq!(updates[0], CssPropertyUpdate::new("--bb-primary", "#1b9aaa"));
        assert_eq!(updates[1], CssPropertyUpdate::new("--bb-primaryLight", "#4db6c7"));
        assert_eq!(updates[18], CssPropertyUpdate::new("--bb-textDisabled", "#bdbdbd"));
    }

    #[test]
    fn test_dark_overrides_are_constants() {
        let theme = builtin::coastal();
        let updates = compute_properties(&theme, true);

        assert_eq!(effective_value(&updates, "--bb-background"), Some("#121212"));
        assert_eq!(effective_value(&updates, "--bb-surface"), Some("#1e1e1e"));
        assert_eq!(effective_value(&updates, "--bb-text"), Some("#ffffff"));
        assert_eq!(effective_value(&updates, "--bb-outline-variant"), Some("#5a5a5a"));
        assert_eq!(effective_value(&updates, "--bb-tech"), Some("#dddbcb"));

        // The theme defines surfaceDark, but the constant still wins.
        assert_eq!(
            theme.colors.as_ref().and_then(|c| c.surface_dark.as_deref()),
            Some("#e8e4d6")
        );
        assert_eq!(effective_value(&updates, "--bb-surfaceDark"), Some("#0a0a0a"));
        assert_eq!(effective_value(&updates, "--bb-primary"), Some("#1b9aaa"));
    }

    #[test]
    fn test_light_overrides() {
        let updates = compute_properties(&builtin::icarus(), false);
        assert_eq!(effective_value(&updates, "--bb-background"), Some("#ffffff"));
        assert_eq!(effective_value(&updates, "--bb-surface"), Some("#aedcc0"));
        assert_eq!(effective_value(&updates, "--bb-text"), Some("#373d20"));
        assert_eq!(effective_value(&updates, "--bb-textSecondary"), Some("#757575"));
        assert_eq!(effective_value(&updates, "--bb-outline"), Some("#e0e0e0"));
        assert_eq!(effective_value(&updates, "--bb-neutral-800"), Some("#424242"));
        // Light mode keeps the theme's surfaceLight.
        assert_eq!(effective_value(&updates, "--bb-surfaceLight"), Some("#c8e8d4"));
    }

    #[test]
    fn test_light_surface_variants_fall_back_to_surface() {
        use crate::colors::ThemeColors;

        let theme = ThemeConfig::new(
            "plain",
            "Plain",
            ThemeColors::new("#1b9aaa", "#dddbcb", "#f5f1e3", "#fafafa", "#050505"),
        );
        let updates = compute_properties(&theme, false);
        assert_eq!(effective_value(&updates, "--bb-surfaceLight"), Some("#f5f1e3"));
        assert_eq!(effective_value(&updates, "--bb-surfaceDark"), Some("#f5f1e3"));
    }

    #[test]
    fn test_derived_tokens() {
        let updates = compute_properties(&builtin::coastal(), false);
        assert_eq!(
            effective_value(&updates, "--bb-glow-primary"),
            Some("0 0 20px #1b9aaa20")
        );
        assert_eq!(
            effective_value(&updates, "--bb-shadow-2xl"),
            Some("0 25px 50px -12px rgba(0, 0, 0, 0.25)")
        );
        assert_eq!(effective_value(&updates, "--bb-font-weight-semibold"), Some("600"));
        assert_eq!(
            effective_value(&updates, "--bb-card-transition"),
            Some("all 0.2s ease-in-out")
        );
        assert!(updates.iter().all(|u| !u.value.is_empty()));
    }

    #[test]
    fn test_missing_colors_project_tokens_only() {
        let theme = ThemeConfig {
            name: "bare".to_string(),
            ..Default::default()
        };
        let updates = compute_properties(&theme, false);
        assert_eq!(effective_value(&updates, "--bb-tech"), Some(DEFAULT_TECH));
        assert_eq!(effective_value(&updates, "--bb-primary"), None);
        assert_eq!(effective_value(&updates, "--bb-glow-primary"), None);
        assert!(updates.iter().all(|u| !u.value.is_empty()));
    }

    #[test]
    fn test_apply_marks_surface() {
        let handle = MemorySurface::new();
        let mut surface = handle.clone();
        let mut projector = Projector::new(false);
        let theme = builtin::midnight_lightning();

        let updates = compute_properties(&theme, true);
        let report = projector.apply(&mut surface, &theme, true, &updates).unwrap();
        assert_eq!(report, ApplyReport { applied: updates.len(), failed: 0 });
        assert!(handle.has_marker(DARK_MARKER));
        assert!(!handle.has_marker(LIGHT_MARKER));
        assert_eq!(handle.attribute(THEME_ATTRIBUTE).as_deref(), Some("midnight-lightning"));
        assert_eq!(handle.property("--bb-background").as_deref(), Some("#121212"));

        let updates = compute_properties(&theme, false);
        projector.apply(&mut surface, &theme, false, &updates).unwrap();
        assert!(!handle.has_marker(DARK_MARKER));
        assert!(handle.has_marker(LIGHT_MARKER));
        assert_eq!(projector.frames(), 2);
    }

    #[test]
    fn test_rejected_properties_are_skipped() {
        let handle = MemorySurface::new();
        handle.reject_property("--bb-tech");
        let theme = builtin::coastal();
        let updates = compute_properties(&theme, false);

        let mut lenient = Projector::new(false);
        let report = lenient.apply(&mut handle.clone(), &theme, false, &updates).unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.applied, updates.len() - 1);
        assert!(handle.property("--bb-primary").is_some());

        let mut strict = Projector::new(true);
        let err = strict.apply(&mut handle.clone(), &theme, false, &updates).unwrap_err();
        assert!(matches!(err, ThemeError::ApplicationFailed { failed: 1 }));
        assert_eq!(handle.attribute(THEME_ATTRIBUTE).as_deref(), Some("coastal"));
    }

    #[test]
    fn test_pending_flag() {
        let mut projector = Projector::default();
        assert!(!projector.take_pending());
        projector.schedule();
        projector.schedule();
        assert!(projector.is_pending());
        assert!(projector.take_pending());
        assert!(!projector.is_pending());
    }

    #[test]
    fn test_render_css_collapses_repeats() {
        let css = render_css(&[
            CssPropertyUpdate::new("--bb-background", "#ffffff"),
            CssPropertyUpdate::new("--bb-text", "#050505"),
            CssPropertyUpdate::new("--bb-background", "#121212"),
        ]);
        assert_eq!(css, ":root {\n  --bb-background: #121212;\n  --bb-text: #050505;\n}\n");
    }
}
