//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Monitoring alert provisioning tool
///
/// Renders monitor templates for every application of a region/stage and
/// creates or updates them through the monitoring API.
#[derive(Parser, Debug)]
#[command(name = "data-cat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (with json, log records go to stderr)
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "DATACAT_CONFIG")]
    pub config: Option<String>,

    /// Directory relative paths in the configuration resolve against
    #[arg(long, global = true, env = "DATACAT_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to the API credentials file
    #[arg(long, global = true, env = "DATACAT_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Dry run mode - render monitors without calling the API or saving state
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update monitors
    DeployMonitors(DeployMonitorsArgs),

    /// Create or update dashboards (not implemented yet)
    DeployDashboards(DeployDashboardsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the deploy-monitors command
#[derive(Parser, Debug)]
pub struct DeployMonitorsArgs {
    /// Region to deploy to
    #[arg(short, long)]
    pub region: String,

    /// Stage within the region
    #[arg(short, long)]
    pub stage: String,

    /// Single application (default: every application of the stage)
    #[arg(short, long)]
    pub application: Option<String>,

    /// Monitor type from the config's monitor-types table, or "all"
    #[arg(short, long, default_value = "all")]
    pub monitor_type: String,
}

/// Arguments for the deploy-dashboards command
#[derive(Parser, Debug)]
pub struct DeployDashboardsArgs {
    /// Region to deploy to
    #[arg(short, long)]
    pub region: String,

    /// Stage within the region
    #[arg(short, long)]
    pub stage: String,

    /// Single application (default: every application of the stage)
    #[arg(short, long)]
    pub application: Option<String>,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
