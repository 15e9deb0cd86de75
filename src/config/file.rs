//! Configuration file loading
//!
//! Handles loading the tool configuration from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// File name of the tool configuration
pub const CONFIG_FILE_NAME: &str = "data-cat.toml";

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::from_read(path, e))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations under `root`
    ///
    /// A file that exists but fails to parse is an error; no file at all is not.
    pub fn load_default(root: &Path) -> Result<Option<Config>, ConfigError> {
        for path in Self::default_paths(root) {
            if path.exists() {
                return Self::load(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Get default configuration file paths, most specific first
    pub fn default_paths(root: &Path) -> Vec<PathBuf> {
        let mut paths = vec![root.join("config").join(CONFIG_FILE_NAME)];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("datacat").join(CONFIG_FILE_NAME));
        }

        paths
    }
}
