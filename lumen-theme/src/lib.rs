#![warn(missing_docs)]

//! # Lumen Theming System
//!
//! Runtime theme switching for applications that style themselves through
//! named style properties (`--bb-primary`, `--bb-surface`, ...).
//!
//! ## Overview
//!
//! - **[ThemeConfig](theme::ThemeConfig)**: A named theme with its [colors](colors::ThemeColors)
//! - **[ThemeRegistry](registry::ThemeRegistry)**: Ordered theme storage, seeded with the [builtin] catalog
//! - **[validate](validator::validate)**: Structural, color-format and contrast checks
//! - **[ThemeService](manager::ThemeService)**: The state machine for theme, display mode and dark flag
//! - **[compute_properties](projection::compute_properties)**: The flat property set projected onto a [StyleSurface](surface::StyleSurface)
//! - **[ThemeServiceConfig](config::ThemeServiceConfig)**: Policy switches from code, TOML or the environment
//!
//! ## Quick Start
//!
//! ```rust
//! use lumen_theme::manager::ThemeService;
//! use lumen_theme::mode::DisplayMode;
//!
//! let service = ThemeService::builder().build();
//! assert_eq!(service.active_theme(), "coastal");
//!
//! service.change_theme("midnight-lightning").unwrap();
//! service.toggle_mode().unwrap();
//! assert_eq!(service.mode(), DisplayMode::Dark);
//!
//! let report = service.run_frame().unwrap().unwrap();
//! assert_eq!(report.failed, 0);
//! ```
//!
//! ## Collaborators
//!
//! The service talks to the outside world through three traits:
//!
//! - [ThemeStorage](storage::ThemeStorage) persists the theme and mode
//! - [SystemPreference](preference::SystemPreference) reports the OS light/dark preference
//! - [StyleSurface](surface::StyleSurface) receives the projected properties
//!
//! In-memory implementations of all three are included. File-backed storage
//! and a desktop-portal preference live in `lumen-services`.
//!
//! ## Logging
//!
//! The crate logs through the [log] facade and never installs a logger.

/// Contains the built-in theme catalog.
pub mod builtin;
/// Contains the [colors::ThemeColors] struct and [colors::ColorKey] enum.
pub mod colors;
/// Contains the [config::ThemeServiceConfig] struct.
pub mod config;
/// Contains the error types.
pub mod error;
/// Contains the events and snapshots emitted by the theme service.
pub mod events;
/// Contains palette-based theme generation.
pub mod generator;
/// Contains the [manager::ThemeService] state machine.
pub mod manager;
/// Contains the [mode::DisplayMode] enum.
pub mod mode;
/// Contains the system light/dark preference trait and simple sources.
pub mod preference;
/// Contains the style-property projection.
pub mod projection;
/// Contains the [registry::ThemeRegistry].
pub mod registry;
/// Contains the persistence trait and in-memory storage.
pub mod storage;
/// Contains the style surface trait and in-memory surface.
pub mod surface;
/// Contains the [theme::ThemeConfig] struct.
pub mod theme;
/// Contains theme validation.
pub mod validator;

pub use error::{StorageError, SurfaceError, ThemeError, ThemeResult};
