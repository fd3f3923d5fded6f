#![warn(missing_docs)]

//! Runtime theming with light, dark and system modes.

pub use lumen_color as color;
#[cfg(feature = "services")]
pub use lumen_services as services;
pub use lumen_theme as theme;

/// A "prelude" for users of lumen.
///
/// Importing this module brings into scope the most common types
/// needed to set up a theme service.
///
/// ```rust
/// use lumen::prelude::*;
///
/// let service = ThemeService::builder()
///     .with_config(ThemeServiceConfig::default().with_persistence(false))
///     .build();
/// service.set_mode(DisplayMode::Dark).unwrap();
/// assert!(service.is_dark());
/// ```
pub mod prelude {
    pub use crate::theme::colors::{ColorKey, ThemeColors};
    pub use crate::theme::config::ThemeServiceConfig;
    pub use crate::theme::events::{ThemeChange, ThemeChangeEvent, ThemeSnapshot};
    pub use crate::theme::manager::ThemeService;
    pub use crate::theme::mode::DisplayMode;
    pub use crate::theme::preference::{ManualPreference, StaticPreference, SystemPreference};
    pub use crate::theme::storage::{MemoryStorage, ThemeStorage};
    pub use crate::theme::surface::{MemorySurface, StyleSurface};
    pub use crate::theme::theme::ThemeConfig;
    pub use crate::theme::{ThemeError, ThemeResult};

    // Color
    pub use crate::color::contrast::{contrast_ratio, is_accessible, WcagLevel};

    // Services
    #[cfg(feature = "services")]
    pub use crate::services::{FileStorage, PortalPreference, SettingsRegistry, ThemeLoader};
}
