//! # Theme Error Types
//!
//! Error types for the theming system. Lookup and validation failures are
//! normally recovered by the fallback policy of
//! [ThemeService](crate::manager::ThemeService); they reach the caller when
//! fallbacks are disabled, when the default theme itself fails, or in strict
//! mode.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the theming system.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Theme with the specified name was not found.
    #[error("Theme '{name}' not found")]
    ThemeNotFound {
        /// The name of the theme that was not found.
        name: String,
    },

    /// Theme definition failed validation.
    #[error("Theme validation failed for '{name}': {}", .errors.join(", "))]
    ValidationFailed {
        /// The name of the rejected theme.
        name: String,
        /// Validation errors in the order they were found.
        errors: Vec<String>,
    },

    /// Some style properties could not be written to the style surface.
    #[error("Failed to apply {failed} CSS properties")]
    ApplicationFailed {
        /// Number of properties that were rejected.
        failed: usize,
    },

    /// The active theme cannot be removed from the registry.
    #[error("Cannot unregister currently active theme '{name}'")]
    ActiveThemeRemoval {
        /// The name of the active theme.
        name: String,
    },

    /// Reading or writing persisted preferences failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Theme configuration file was not found.
    #[error("Theme file not found: {path:?}")]
    ThemeFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Error parsing a theme or configuration file.
    #[error("Failed to parse theme file {path:?}: {details}")]
    ThemeParseError {
        /// The path of the file that failed to parse.
        path: PathBuf,
        /// Details about the parse error.
        details: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing or deserializing theme data.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create a theme not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ThemeNotFound { name: name.into() }
    }

    /// Create a validation error.
    pub fn validation(name: impl Into<String>, errors: Vec<String>) -> Self {
        Self::ValidationFailed {
            name: name.into(),
            errors,
        }
    }

    /// Create a theme file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ThemeFileNotFound { path: path.into() }
    }

    /// Create a theme parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ThemeParseError {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Whether the fallback policy may recover from this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ThemeNotFound { .. } | Self::ValidationFailed { .. }
        )
    }
}

/// Errors raised by a [ThemeStorage](crate::storage::ThemeStorage) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store could not be read.
    #[error("Failed to read '{key}': {details}")]
    Read {
        /// The key being read.
        key: String,
        /// Backend-specific details.
        details: String,
    },

    /// The backing store could not be written.
    #[error("Failed to write '{key}': {details}")]
    Write {
        /// The key being written.
        key: String,
        /// Backend-specific details.
        details: String,
    },

    /// The backing store is not available at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a [StyleSurface](crate::surface::StyleSurface).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface rejected a property name or value.
    #[error("Rejected property {property}: {value}")]
    Rejected {
        /// The property name.
        property: String,
        /// The value that was rejected.
        value: String,
    },

    /// The surface is not attached to anything that can be styled.
    #[error("Style surface is detached")]
    Detached,
}
