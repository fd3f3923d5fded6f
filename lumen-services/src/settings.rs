// SPDX-License-Identifier: LGPL-3.0-only
use anyhow::Result;
use lumen_theme::config::{ConfigLayer, ThemeServiceConfig};
use std::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// XDG prefix shared by every lumen file location.
pub const XDG_PREFIX: &str = "lumen";

/// Name of the theme service configuration file.
pub const THEME_CONFIG_FILE: &str = "theme.toml";

/// Registry for the theme service configuration.
pub struct SettingsRegistry {
    config: ThemeServiceConfig,
}

impl SettingsRegistry {
    /// Create a new SettingsRegistry and load configuration from standard locations.
    pub fn new() -> Result<Self> {
        let mut registry = Self::with_config(ThemeServiceConfig::new());
        registry.load()?;
        Ok(registry)
    }

    /// Create a registry seeded with `config` without touching the filesystem.
    pub fn with_config(config: ThemeServiceConfig) -> Self {
        Self { config }
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/lumen/theme.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/lumen/theme.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/lumen/theme.toml (XDG_CONFIG_HOME)
    pub fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
        self.load_theme_config(&xdg_dirs);
        Ok(())
    }

    fn load_theme_config(&mut self, xdg_dirs: &BaseDirectories) {
        // 1. Load from system data directories
        for path in xdg_dirs.find_data_files(THEME_CONFIG_FILE).rev() {
            self.load_theme_file(&path);
        }

        // 2. Load from system config directories
        for path in xdg_dirs.find_config_files(THEME_CONFIG_FILE).rev() {
            self.load_theme_file(&path);
        }

        // 3. Load from user config directory
        if let Some(user_config_path) = xdg_dirs.find_config_file(THEME_CONFIG_FILE) {
            self.load_theme_file(&user_config_path);
        } else {
            let user_config_path = xdg_dirs.get_config_home().join(THEME_CONFIG_FILE);
            if user_config_path.exists() {
                self.load_theme_file(&user_config_path);
            }
        }
    }

    fn load_theme_file(&mut self, path: &Path) {
        log::info!("Loading theme config from: {:?}", path);
        match fs::read_to_string(path) {
            Ok(content) => match ConfigLayer::from_toml(&content) {
                Ok(layer) => {
                    self.config.merge(layer);
                },
                Err(e) => {
                    log::error!("Failed to parse theme config {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read theme config {:?}: {}", path, e);
            },
        }
    }

    /// Layer the given files over the current configuration, in order.
    ///
    /// Unlike [SettingsRegistry::load], every failure is returned to the
    /// caller instead of being logged.
    pub fn load_from_paths(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        paths
            .into_iter()
            .map(|path| -> Result<()> {
                let content = fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("Failed to read theme config {:?}: {}", path, e))?;
                let layer = ConfigLayer::from_toml(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse theme config {:?}: {}", path, e))?;
                self.config.merge(layer);
                Ok(())
            })
            .collect()
    }

    /// Reset to the defaults and re-run the full load process.
    pub fn reload(&mut self) -> Result<()> {
        self.config = ThemeServiceConfig::new();
        self.load()
    }

    /// Get the current configuration.
    pub fn get(&self) -> &ThemeServiceConfig {
        &self.config
    }

    /// Take the configuration, e.g. to build a theme service.
    pub fn into_config(self) -> ThemeServiceConfig {
        self.config
    }
}
