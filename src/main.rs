//! data-cat - monitoring alert provisioning tool
//!
//! A command-line tool that renders monitor templates for every application
//! of a region/stage and creates or updates them through the monitoring API.

use clap::Parser;
use datacat::cli::args::{generate_completions, Cli, Commands};
use datacat::commands::{run_deploy_dashboards, run_deploy_monitors};
use datacat::config::{Config, ConfigBuilder};
use datacat::error::{AppError, ConfigError};
use datacat::logging::{self, Console};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return;
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&Config::default(), Console::for_format(cli.format));
            log::error!("{}", e);
            print_error(&e);
            std::process::exit(1);
        }
    };

    if let Some(path) = logging::init(&config, Console::for_format(cli.format)) {
        log::debug!("Logging to {}", path.display());
    }

    if let Err(e) = ctrlc::set_handler(|| {
        log::warn!("Ctrl+c was pressed, exiting...");
        std::process::exit(0);
    }) {
        log::warn!("Failed to set signal handler: {}", e);
    }

    // Run the appropriate command
    let result = run(&cli, &config);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        log::info!("Quitting...");
        std::process::exit(1);
    }

    log::info!("Quitting...");
}

fn build_config(cli: &Cli) -> Result<Config, AppError> {
    let config = ConfigBuilder::new()
        .with_root(cli.root.clone())
        .with_file(cli.config.as_deref())?
        .with_credentials_file(cli.credentials.clone())
        .with_verbose(cli.verbose)
        .with_dry_run(cli.dry_run)
        .build();
    Ok(config)
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    match &cli.command {
        Commands::DeployMonitors(args) => run_deploy_monitors(args, config, cli.format),

        Commands::DeployDashboards(args) => run_deploy_dashboards(args, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Credentials(_) => {
            eprintln!();
            eprintln!("Hint: Create the credentials file with api_key and app_key entries,");
            eprintln!("      point --credentials at it, or use --dry-run.");
        }
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or set DATACAT_CONFIG.");
        }
        AppError::UnknownMonitorType(_) => {
            eprintln!();
            eprintln!("Hint: Monitor types are listed in the [monitor-types] table of the config.");
        }
        _ => {}
    }
}
