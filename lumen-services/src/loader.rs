// SPDX-License-Identifier: LGPL-3.0-only
use anyhow::Result;
use lumen_theme::manager::ThemeService;
use lumen_theme::theme::ThemeConfig;
use std::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

use crate::settings::XDG_PREFIX;

/// Name of the theme directory under `$XDG_DATA_HOME/lumen`.
pub const THEMES_DIR: &str = "themes";

/// Loads user theme definitions from a directory of `.toml` and `.json`
/// files.
pub struct ThemeLoader {
    dir: PathBuf,
}

impl ThemeLoader {
    /// Loader for `$XDG_DATA_HOME/lumen/themes`.
    pub fn new() -> Result<Self> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
        Ok(Self::with_dir(xdg_dirs.get_data_home().join(THEMES_DIR)))
    }

    /// Loader for an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory scanned by [ThemeLoader::load].
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse every theme file in the directory, sorted by file name.
    ///
    /// A missing directory yields no themes. Files that fail to parse are
    /// logged and skipped; other extensions are ignored.
    pub fn load(&self) -> Result<Vec<ThemeConfig>> {
        if !self.dir.is_dir() {
            log::debug!("Theme directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)
            .map_err(|e| anyhow::anyhow!("Failed to read theme directory {:?}: {}", self.dir, e))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && is_theme_file(path))
            .collect();
        paths.sort();

        let themes = paths
            .iter()
            .filter_map(|path| {
                log::info!("Loading theme from: {:?}", path);
                match ThemeConfig::from_file(path) {
                    Ok(theme) => Some(theme),
                    Err(e) => {
                        log::warn!("Failed to load theme {:?}: {}", path, e);
                        None
                    },
                }
            })
            .collect();
        Ok(themes)
    }

    /// Load the directory and register every theme with `service`.
    ///
    /// Returns how many themes were registered. Themes rejected by the
    /// service's validation are logged and skipped.
    pub fn load_into(&self, service: &ThemeService) -> Result<usize> {
        let themes = self.load()?;
        let found = themes.len();
        let registered = service.register_themes(themes);
        if registered < found {
            log::warn!(
                "Registered {} of {} themes from {:?}",
                registered,
                found,
                self.dir
            );
        }
        Ok(registered)
    }
}

fn is_theme_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("toml") | Some("json")
    )
}
