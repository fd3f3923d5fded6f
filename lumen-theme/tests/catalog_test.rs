use lumen_theme::builtin::{builtin_themes, BUILTIN_THEME_NAMES};
use lumen_theme::colors::ColorKey;
use lumen_theme::projection::{compute_properties, render_css};
use lumen_theme::theme::ThemeConfig;
use lumen_theme::validator::validate;

#[test]
fn test_every_builtin_theme_is_valid() {
    let themes = builtin_themes();
    assert_eq!(themes.len(), BUILTIN_THEME_NAMES.len());
    for theme in &themes {
        let result = validate(theme);
        assert!(result.is_valid, "{}: {:?}", theme.name, result.errors);
        assert_eq!(theme.colors.as_ref().map(|c| c.iter().count()), Some(19));
    }
}

#[test]
fn test_primary_only_theme_reports_missing_colors() {
    let theme = ThemeConfig::from_json(
        r##"{"name": "x", "displayName": "X", "colors": {"primary": "#1b9aaa"}}"##,
    )
    .unwrap();

    let result = validate(&theme);
    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec![
            "Required color 'secondary' is missing",
            "Required color 'surface' is missing",
            "Required color 'background' is missing",
            "Required color 'text' is missing",
        ]
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn test_generated_theme_projects_every_slot() {
    let theme = ThemeConfig::from_primary("gen", "Generated", "#bf4e30");
    assert!(validate(&theme).is_valid);

    let css = render_css(&compute_properties(&theme, false));
    for key in ColorKey::ALL {
        assert!(css.contains(&format!("--bb-{}:", key.as_str())), "{}", key.as_str());
    }
    assert!(css.contains("--bb-glow-primary: 0 0 20px #bf4e3020;"));
    assert!(css.starts_with(":root {\n"));
}
