use indexmap::IndexMap;

use crate::builtin;
use crate::theme::ThemeConfig;

/// An ordered map from registry key to [ThemeConfig].
///
/// Iteration follows registration order, so the built-in themes come first
/// in a registry created with [ThemeRegistry::with_builtins]. Re-registering
/// an existing key replaces the entry in place and keeps its position.
///
/// The registry does not validate. Validation is a policy of the
/// [ThemeService](crate::manager::ThemeService) that owns it.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: IndexMap<String, ThemeConfig>,
}

impl ThemeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in catalog.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for theme in builtin::builtin_themes() {
            registry.register(theme);
        }
        registry
    }

    /// Insert `theme` under its `name`, returning the entry it replaced.
    pub fn register(&mut self, theme: ThemeConfig) -> Option<ThemeConfig> {
        self.themes.insert(theme.name.clone(), theme)
    }

    /// Remove a theme, returning it if it was present.
    ///
    /// Later entries keep their relative order.
    pub fn unregister(&mut self, name: &str) -> Option<ThemeConfig> {
        self.themes.shift_remove(name)
    }

    /// Get a theme by key.
    pub fn get(&self, name: &str) -> Option<&ThemeConfig> {
        self.themes.get(name)
    }

    /// Whether a theme is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// All themes, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &ThemeConfig> {
        self.themes.values()
    }

    /// All registry keys, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Number of registered themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
