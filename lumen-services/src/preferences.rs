// SPDX-License-Identifier: LGPL-3.0-only
//! File-backed persistence for the theme service.
//!
//! Preferences live in a small TOML file:
//!
//! ```toml
//! [preferences]
//! bb-mode = "dark"
//! bb-theme = "icarus"
//! ```

use anyhow::Result;
use lumen_theme::storage::ThemeStorage;
use lumen_theme::StorageError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

use crate::settings::XDG_PREFIX;

/// Name of the preferences file under `$XDG_STATE_HOME/lumen`.
pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    preferences: BTreeMap<String, String>,
}

/// [ThemeStorage] backed by a TOML file.
///
/// The file is read on first access and cached. Every write rewrites the
/// whole file, creating parent directories as needed.
pub struct FileStorage {
    path: PathBuf,
    cache: RefCell<Option<BTreeMap<String, String>>>,
}

impl FileStorage {
    /// Storage at `$XDG_STATE_HOME/lumen/preferences.toml`.
    pub fn new() -> Result<Self> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
        Ok(Self::with_path(xdg_dirs.get_state_home().join(PREFERENCES_FILE)))
    }

    /// Storage at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RefCell::new(None),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn values(&self, key: &str) -> Result<BTreeMap<String, String>, StorageError> {
        if let Some(values) = self.cache.borrow().as_ref() {
            return Ok(values.clone());
        }

        let values = if self.path.exists() {
            log::info!("Loading preferences from: {:?}", self.path);
            let content = fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
                key: key.to_string(),
                details: e.to_string(),
            })?;
            toml::from_str::<PreferencesFile>(&content)
                .map_err(|e| StorageError::Read {
                    key: key.to_string(),
                    details: format!("{:?}: {}", self.path, e),
                })?
                .preferences
        } else {
            BTreeMap::new()
        };

        *self.cache.borrow_mut() = Some(values.clone());
        Ok(values)
    }
}

impl ThemeStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values(key)?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values(key)?;
        values.insert(key.to_string(), value.to_string());

        let write_error = |details: String| StorageError::Write {
            key: key.to_string(),
            details,
        };
        let file = PreferencesFile {
            preferences: values,
        };
        let content = toml::to_string(&file).map_err(|e| write_error(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        fs::write(&self.path, content).map_err(|e| write_error(e.to_string()))?;

        *self.cache.borrow_mut() = Some(file.preferences);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_path(dir.path().join("preferences.toml"));
        assert_eq!(storage.get("bb-theme").unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_set_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("lumen").join("preferences.toml");
        let mut storage = FileStorage::with_path(&path);

        storage.set("bb-theme", "icarus").unwrap();
        storage.set("bb-mode", "dark").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[preferences]"));
        assert!(content.contains("bb-theme = \"icarus\""));
        assert_eq!(storage.get("bb-mode").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "[preferences\n").unwrap();

        let mut storage = FileStorage::with_path(&path);
        assert!(matches!(storage.get("bb-theme"), Err(StorageError::Read { .. })));
        // A write must not clobber a file it could not parse.
        assert!(storage.set("bb-theme", "icarus").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[preferences\n");
    }
}
