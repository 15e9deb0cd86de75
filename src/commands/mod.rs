//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod deploy_dashboards;
pub mod deploy_monitors;

pub use deploy_dashboards::run_deploy_dashboards;
pub use deploy_monitors::run_deploy_monitors;
