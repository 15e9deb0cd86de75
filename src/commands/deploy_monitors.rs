//! Deploy-monitors command implementation
//!
//! Loads credentials, builds the client, runs the deployer and prints the report.

use crate::api::{MonitorApi, MonitorClient};
use crate::cli::args::{DeployMonitorsArgs, OutputFormat};
use crate::cli::output::print_output;
use crate::config::{Config, Credentials};
use crate::error::{AppError, Result};
use crate::services::{DeployRequest, MonitorDeployer};

/// Execute the deploy-monitors command
pub fn run_deploy_monitors(
    args: &DeployMonitorsArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let client = if config.runtime.dry_run {
        log::info!("Dry run: credentials are not loaded and no API calls are made");
        None
    } else {
        let path = config.credentials_file();
        log::debug!("Loading credentials from {}", path.display());
        let credentials = Credentials::load(&path)?;
        Some(MonitorClient::from_credentials(&credentials, &config.api)?)
    };

    let api = client.as_ref().map(|c| c as &dyn MonitorApi);
    let deployer = MonitorDeployer::from_config(config, api)?;

    let request = DeployRequest {
        region: args.region.clone(),
        stage: args.stage.clone(),
        application: args.application.clone(),
        monitor_type: args.monitor_type.clone(),
    };
    log::info!(
        "Deploying {} monitors to {}/{}{}",
        request.monitor_type,
        request.region,
        request.stage,
        request
            .application
            .as_ref()
            .map(|a| format!("/{}", a))
            .unwrap_or_default()
    );

    let report = deployer.deploy(&request)?;
    print_output(&report, format)?;

    match report.failure_count() {
        0 => Ok(()),
        n => Err(AppError::DeploymentFailed(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    fn args(application: Option<&str>) -> DeployMonitorsArgs {
        DeployMonitorsArgs {
            region: "eu-west-1".to_string(),
            stage: "prod".to_string(),
            application: application.map(str::to_string),
            monitor_type: "system".to_string(),
        }
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let fixture = Fixture::standard();
        let before = fixture.read_application("checkout");

        let result = run_deploy_monitors(&args(None), &fixture.config(), OutputFormat::Compact);

        assert!(matches!(result, Err(AppError::Credentials(_))));
        assert_eq!(fixture.read_application("checkout"), before);
    }

    #[test]
    fn test_mock_credentials_persist_state() {
        let fixture = Fixture::standard();
        let config = fixture.config();
        std::fs::create_dir_all(config.credentials_file().parent().unwrap()).unwrap();
        std::fs::write(config.credentials_file(), "api_key = \"mock\"\napp_key = \"mock\"\n")
            .unwrap();

        run_deploy_monitors(&args(Some("checkout")), &config, OutputFormat::Compact).unwrap();

        assert!(fixture
            .read_application("checkout")
            .contains("system_configs_deployed"));
    }

    #[test]
    fn test_dry_run_needs_no_credentials() {
        let fixture = Fixture::standard();
        let mut config = fixture.config();
        config.runtime.dry_run = true;

        run_deploy_monitors(&args(None), &config, OutputFormat::Compact).unwrap();
    }

    #[test]
    fn test_unit_failures_fail_the_command() {
        let fixture = Fixture::standard();
        let mut config = fixture.config();
        config.runtime.dry_run = true;
        std::fs::remove_file(fixture.templates_dir().join("system").join("cpu.yaml")).unwrap();

        let result = run_deploy_monitors(&args(None), &config, OutputFormat::Compact);
        assert!(matches!(result, Err(AppError::DeploymentFailed(2))));
    }
}
