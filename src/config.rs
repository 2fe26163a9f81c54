//! Configuration loading and management
//!
//! Handles parsing of `.dodo.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = ".dodo.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backing file configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Startup load configuration
    #[serde(default)]
    pub load: LoadConfig,
}

/// Backing file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the task list file
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/tasks.txt")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Startup load configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    /// What to do with unreadable records during load
    #[serde(default)]
    pub on_corrupt: CorruptPolicy,
}

/// Policy for records that fail to parse during load.
///
/// `Fail` aborts the whole load; `Skip` drops the offending lines, which
/// also removes them from the file when the load rewrites it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    #[default]
    Fail,
    Skip,
}

impl Config {
    /// Load configuration from a `.dodo.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults when no
    /// config file is present
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.storage.path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "storage.path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
