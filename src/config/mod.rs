//! Configuration system
//!
//! Handles the TOML tool configuration, API credentials, and CLI argument merging.

pub mod builder;
pub mod credentials;
pub mod file;

pub use builder::ConfigBuilder;
pub use credentials::Credentials;
pub use file::ConfigFile;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Registry key that expands to every other monitor type
pub const ALL_MONITOR_TYPES: &str = "all";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings
    pub main: MainConfig,
    /// Locations of the infrastructure tree and templates
    pub paths: PathsConfig,
    /// Monitoring API settings
    pub api: ApiConfig,
    /// Monitor type name -> handler identifier
    #[serde(rename = "monitor-types")]
    pub monitor_types: BTreeMap<String, String>,
    /// Runtime settings, never read from or written to the file
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

impl Default for Config {
    fn default() -> Self {
        let monitor_types = [
            (ALL_MONITOR_TYPES, ALL_MONITOR_TYPES),
            ("system", "SystemMonitors"),
            ("aws-elb", "AwsElbMonitors"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            main: MainConfig::default(),
            paths: PathsConfig::default(),
            api: ApiConfig::default(),
            monitor_types,
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Config {
    /// Resolve a configured path against the root directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.runtime.root.join(path)
        }
    }

    /// Absolute location of the infrastructure tree
    pub fn infra_dir(&self) -> PathBuf {
        self.resolve(&self.paths.infra_dir)
    }

    /// Absolute location of the template tree
    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(&self.paths.templates_dir)
    }

    /// Absolute location of the log folder
    pub fn log_folder(&self) -> PathBuf {
        self.resolve(&self.main.log_folder)
    }

    /// Absolute location of the credentials file
    pub fn credentials_file(&self) -> PathBuf {
        self.resolve(&self.api.credentials_file)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MainConfig {
    /// Folder for log files, relative to the root directory
    pub log_folder: PathBuf,
    /// Log line pattern ({timestamp}, {level}, {target}, {message})
    pub log_pattern: String,
    /// strftime format for {timestamp}
    pub log_date_fmt: String,
}

impl MainConfig {
    pub const DEFAULT_PATTERN: &'static str = "{timestamp} {level} {message}";
    pub const DEFAULT_DATE_FMT: &'static str = "%Y-%m-%d %H:%M:%S";
}

impl Default for MainConfig {
    fn default() -> Self {
        Self {
            log_folder: PathBuf::from("logs"),
            log_pattern: Self::DEFAULT_PATTERN.to_string(),
            log_date_fmt: Self::DEFAULT_DATE_FMT.to_string(),
        }
    }
}

/// Filesystem layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the `<region>/<stage>/<application>` tree
    pub infra_dir: PathBuf,
    /// Root of the `<type>/<subtype>.yaml` template tree
    pub templates_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            infra_dir: PathBuf::from("infra"),
            templates_dir: PathBuf::from("templates"),
        }
    }
}

/// Monitoring API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the monitoring API
    pub url: String,
    /// Credentials file, relative to the root directory
    pub credentials_file: PathBuf,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "https://api.datadoghq.com".to_string(),
            credentials_file: PathBuf::from("config/credentials.toml"),
            timeout_secs: 30,
        }
    }
}

/// Settings that only come from the command line
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory relative paths are resolved against
    pub root: PathBuf,
    /// Render and log without calling the API or writing state
    pub dry_run: bool,
    /// Debug logging
    pub verbose: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            dry_run: false,
            verbose: false,
        }
    }
}
