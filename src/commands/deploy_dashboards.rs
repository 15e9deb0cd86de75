//! Deploy-dashboards command implementation
//!
//! Placeholder: accepted on the command line, does nothing yet.

use crate::cli::args::{DeployDashboardsArgs, OutputFormat};
use crate::cli::output::{print_output, Message};
use crate::error::Result;

/// Execute the deploy-dashboards command
pub fn run_deploy_dashboards(args: &DeployDashboardsArgs, format: OutputFormat) -> Result<()> {
    log::warn!(
        "deploy-dashboards is not implemented (region={} stage={} application={})",
        args.region,
        args.stage,
        args.application.as_deref().unwrap_or("*")
    );

    print_output(
        &Message {
            message: "Dashboard deployment is not implemented yet".to_string(),
            success: false,
        },
        format,
    )?;

    Ok(())
}
