use std::time::SystemTime;

use crate::mode::DisplayMode;

/// Emitted once for every successful theme change.
///
/// Mode changes never produce this event; observe them through
/// [ThemeService::on_state_change](crate::manager::ThemeService::on_state_change).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChangeEvent {
    /// The theme that was active before the change.
    pub previous_theme: String,
    /// The theme that is active now.
    pub current_theme: String,
    /// The resolved dark flag at the time of the change.
    pub is_dark: bool,
    /// When the change happened.
    pub timestamp: SystemTime,
}

/// The observable state of a [ThemeService](crate::manager::ThemeService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSnapshot {
    /// Registry key of the active theme.
    pub active_theme: String,
    /// The chosen display mode.
    pub mode: DisplayMode,
    /// The resolved dark flag.
    pub is_dark: bool,
}

/// How a successful [change_theme](crate::manager::ThemeService::change_theme)
/// call was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeChange {
    /// The requested theme is now active.
    Applied,
    /// The requested theme was unusable and the default theme was activated
    /// instead.
    FellBack {
        /// The theme that was asked for.
        requested: String,
        /// The theme that is active now.
        active: String,
    },
}

impl ThemeChange {
    /// Whether the requested theme was activated as asked.
    pub fn is_applied(&self) -> bool {
        matches!(self, ThemeChange::Applied)
    }
}
