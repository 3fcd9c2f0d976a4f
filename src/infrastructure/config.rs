// src/infrastructure/config.rs
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_STORE_KEY,
    DEFAULT_USER_ID,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration for notesync
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StoreConfig {
    /// Empty means the platform data directory
    #[serde(default)]
    pub dir: String,
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_user_id() -> i64 { DEFAULT_USER_ID }
fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }
fn default_key() -> String { DEFAULT_STORE_KEY.to_string() }

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: default_user_id(),
            page_size: default_page_size(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            key: default_key(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. Without one, the file in the platform config
    /// directory is used if present, defaults otherwise.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from provided path");
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default location");
                Self::load(path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Directory holding the local note store
    pub fn store_dir(&self) -> Result<PathBuf> {
        if !self.store.dir.is_empty() {
            return Ok(PathBuf::from(&self.store.dir));
        }
        let data_dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(data_dir.join(APP_DIR_NAME))
    }
}

/// `<config dir>/notesync/notesync.toml` on this platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
