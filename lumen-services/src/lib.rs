// SPDX-License-Identifier: LGPL-3.0-only
//! Filesystem and desktop collaborators for the lumen theme service.
//!
//! - [SettingsRegistry]: the service configuration, layered from XDG `theme.toml` files
//! - [FileStorage]: persisted theme and mode in `$XDG_STATE_HOME/lumen/preferences.toml`
//! - [ThemeLoader]: user themes from `$XDG_DATA_HOME/lumen/themes`
//! - [PortalPreference]: the desktop light/dark preference (`xdg-portal` feature)
pub mod loader;
pub mod portal;
pub mod preferences;
pub mod settings;

pub use loader::ThemeLoader;
pub use portal::PortalPreference;
pub use preferences::FileStorage;
pub use settings::SettingsRegistry;
