//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the root directory relative paths resolve against
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        if let Some(r) = root {
            self.config.runtime.root = r;
        }
        self
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist. Without one, the default locations under
    /// the root are searched and built-in defaults are kept if none exists.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(self.config.resolve(Path::new(path)))?),
            None => ConfigFile::load_default(&self.config.runtime.root)?,
        };

        if let Some(mut cfg) = file_config {
            cfg.runtime = self.config.runtime;
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI credentials path
    pub fn with_credentials_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.config.api.credentials_file = p;
        }
        self
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.config.runtime.verbose = verbose;
        self
    }

    /// Override with CLI dry-run flag
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.config.runtime.dry_run = dry_run;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
