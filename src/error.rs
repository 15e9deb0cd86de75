//! Unified error types for datacat
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration loading/resolution
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credentials missing or unreadable
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// Error from the monitoring API
    #[error("Monitoring API error: {0}")]
    Api(#[from] ApiError),

    /// Monitor type not present in the registry
    #[error("Monitor type '{0}' is not found in the config")]
    UnknownMonitorType(String),

    /// Nothing to deploy under the requested region/stage
    #[error("No applications found under {region}/{stage}")]
    NoApplicationsFound { region: String, stage: String },

    /// The run finished but some units failed
    #[error("Deployment finished with {0} failure(s)")]
    DeploymentFailed(usize),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from configuration parsing and resolution
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Config file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse config file
    #[error("Failed to parse configuration {path}: {message}")]
    ParseError { path: String, message: String },

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A config section is absent from the layer it was looked up in
    #[error("'{key}' not found in {layer} config")]
    NotFound { key: String, layer: String },

    /// A `*_configs_location` pointer names no known layer
    #[error("Invalid location '{value}' for '{key}' (expected one of: {expected})")]
    LocationInvalid {
        key: String,
        value: String,
        expected: String,
    },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors from loading API credentials
#[derive(Error, Debug)]
pub enum CredentialsError {
    /// Credentials file does not exist
    #[error("Credentials file not found: {0}")]
    Missing(PathBuf),

    /// Credentials file exists but could not be read or parsed
    #[error("Credentials file {path} is unreadable: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// A key is present but empty
    #[error("Credentials field '{0}' is empty")]
    EmptyKey(&'static str),
}

/// Errors from rendering a monitor template
#[derive(Error, Debug)]
pub enum RenderError {
    /// No template for this (type, subtype)
    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),

    /// Template could not be read
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Substituted text is not valid YAML
    #[error("Template {path} is not valid YAML after substitution: {message}")]
    Unparsable { path: PathBuf, message: String },

    /// Required payload field absent or of the wrong type
    #[error("Template {path} is missing required field '{field}'")]
    MissingField { path: PathBuf, field: &'static str },
}

/// Errors from the monitoring API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(String),

    /// API answered with a non-success status
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

/// Errors persisting deployment state
#[derive(Error, Debug)]
pub enum StateError {
    /// Application config could not be serialized
    #[error("Failed to serialize {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    /// Application config could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Map a failed read of `path`; only a missing file is `FileNotFound`
    pub fn from_read(path: &Path, source: std::io::Error) -> Self {
        let path = path.display().to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path),
            _ => ConfigError::Read { path, source },
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
