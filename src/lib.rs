//! datacat - monitoring alert provisioning library
//!
//! Walks a `<region>/<stage>/<application>` tree of layered YAML files,
//! renders monitor templates for each application and creates or updates
//! them through the monitoring API, recording what was deployed.
//!
//! # Modules
//!
//! - [`api`]: Monitoring API client abstraction (live and mock)
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Tool configuration and credentials
//! - [`domain`]: Alert payloads and monitor types
//! - [`error`]: Error types
//! - [`infra`]: Infrastructure tree and layer files
//! - [`logging`]: Logger setup
//! - [`services`]: Config resolution and the deployment loop
//! - [`template`]: Placeholder substitution and template rendering

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;
pub mod services;
pub mod template;

#[cfg(test)]
pub mod testing;

pub use error::{AppError, Result};
