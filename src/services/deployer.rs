//! Monitor deployment orchestrator
//!
//! Walks applications x monitor types x subtypes, rendering each unit and
//! creating or updating it. Each application is loaded, mutated and written
//! back on its own, so an aborted run leaves finished applications saved.

use crate::api::MonitorApi;
use crate::config::Config;
use crate::domain::{DeployAction, MonitorHandler, MonitorRegistry, MonitorType};
use crate::error::{AppError, ConfigError};
use crate::infra::{ApplicationConfig, DeployedState, InfraTree, LayerContext};
use crate::services::report::{ApplicationReport, DeploymentReport, MonitorOutcome};
use crate::services::resolver::{ConfigResolver, ResolvedDefaults};
use crate::template::{RenderRequest, TemplateRenderer};

use serde_yaml::Value;

/// What to deploy
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub region: String,
    pub stage: String,
    /// Single application; every application of the stage when `None`
    pub application: Option<String>,
    /// Registry name or `all`
    pub monitor_type: String,
}

/// Orchestrates a deploy-monitors run
pub struct MonitorDeployer<'a> {
    tree: InfraTree,
    renderer: TemplateRenderer,
    registry: MonitorRegistry,
    /// `None` in dry-run mode
    api: Option<&'a dyn MonitorApi>,
}

impl<'a> MonitorDeployer<'a> {
    /// Create a deployer from its parts
    pub fn new(
        tree: InfraTree,
        renderer: TemplateRenderer,
        registry: MonitorRegistry,
        api: Option<&'a dyn MonitorApi>,
    ) -> Self {
        Self {
            tree,
            renderer,
            registry,
            api,
        }
    }

    /// Create a deployer using the paths and registry of `config`
    pub fn from_config(config: &Config, api: Option<&'a dyn MonitorApi>) -> Result<Self, ConfigError> {
        Ok(Self::new(
            InfraTree::new(config.infra_dir()),
            TemplateRenderer::new(config.templates_dir()),
            MonitorRegistry::from_config(&config.monitor_types)?,
            api,
        ))
    }

    /// Whether API calls and state writes are suppressed
    pub fn is_dry_run(&self) -> bool {
        self.api.is_none()
    }

    /// Run a deployment
    ///
    /// Fails early on unknown monitor types, missing region/stage files, an
    /// empty stage, or unresolvable default configs. Per-unit failures are
    /// recorded in the report instead.
    pub fn deploy(&self, request: &DeployRequest) -> Result<DeploymentReport, AppError> {
        let context = self.tree.load_context(&request.region, &request.stage)?;

        let monitor_types = self.registry.resolve(&request.monitor_type)?;
        log::info!(
            "Monitor types to deploy: {}",
            monitor_types
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let applications = match &request.application {
            Some(app) => vec![app.clone()],
            None => self.tree.list_applications(&request.region, &request.stage)?,
        };
        if applications.is_empty() {
            return Err(AppError::NoApplicationsFound {
                region: request.region.clone(),
                stage: request.stage.clone(),
            });
        }
        log::info!("Applications to deploy: {}", applications.join(", "));

        let mut report = DeploymentReport {
            region: request.region.clone(),
            stage: request.stage.clone(),
            dry_run: self.is_dry_run(),
            applications: Vec::with_capacity(applications.len()),
        };

        for application in &applications {
            let app_report = self.deploy_application(&context, application, &monitor_types)?;
            report.applications.push(app_report);
        }

        Ok(report)
    }

    fn deploy_application(
        &self,
        context: &LayerContext,
        application: &str,
        monitor_types: &[MonitorType],
    ) -> Result<ApplicationReport, AppError> {
        let mut report = ApplicationReport::new(application);
        let scope = format!(
            "region={} stage={} application={}",
            context.region_name(),
            context.stage_name(),
            application
        );

        let mut app = match self.tree.load_application(
            context.region_name(),
            context.stage_name(),
            application,
        ) {
            Ok(app) => app,
            Err(e) => {
                log::error!("[{}] Failed to load application config: {}", scope, e);
                report.error = Some(e.to_string());
                return Ok(report);
            }
        };

        let resolver = ConfigResolver::new(context);
        let defaults = resolver.resolve_defaults(&app).map_err(|e| {
            log::error!("[{}] Failed to resolve default configs: {}", scope, e);
            e
        })?;

        for monitor_type in monitor_types {
            let resolved = match resolver.resolve_monitor_type(&app, monitor_type) {
                Ok(resolved) => resolved,
                Err(e) => {
                    log::error!(
                        "[{} type={}] Skipping monitor type: {}",
                        scope,
                        monitor_type,
                        e
                    );
                    report
                        .monitors
                        .push(MonitorOutcome::type_skipped(&monitor_type.name, e));
                    continue;
                }
            };

            log::info!(
                "[{} type={}] {} subtype(s) from {} layer",
                scope,
                monitor_type,
                resolved.subtypes.len(),
                resolved.location
            );

            for (subtype, settings) in &resolved.subtypes {
                let outcome =
                    self.deploy_unit(context, &mut app, &defaults, monitor_type, subtype, settings);
                report.monitors.push(outcome);
            }
        }

        if app.is_dirty() && !self.is_dry_run() {
            match app.save() {
                Ok(()) => {
                    log::info!("[{}] Saved {}", scope, app.path().display());
                    report.persisted = true;
                }
                Err(e) => {
                    log::error!("[{}] Failed to persist deployment state: {}", scope, e);
                    report.error = Some(e.to_string());
                }
            }
        }

        Ok(report)
    }

    fn deploy_unit(
        &self,
        context: &LayerContext,
        app: &mut ApplicationConfig,
        defaults: &ResolvedDefaults,
        monitor_type: &MonitorType,
        subtype: &str,
        settings: &Value,
    ) -> MonitorOutcome {
        let scope = format!(
            "region={} stage={} application={} type={} subtype={}",
            context.region_name(),
            context.stage_name(),
            app.name(),
            monitor_type,
            subtype
        );

        let monitor_id = match app.deployed_state(monitor_type, subtype) {
            DeployedState::Absent => None,
            DeployedState::Deployed(id) => Some(id),
            DeployedState::Invalid(reason) => {
                log::error!("[{}] Corrupt deployment state: {}", scope, reason);
                return MonitorOutcome::failed(&monitor_type.name, subtype, reason);
            }
        };

        let request = RenderRequest {
            region: context.region_name(),
            stage: context.stage_name(),
            application: app.name(),
            monitor_type: &monitor_type.name,
            monitor_subtype: subtype,
            defaults: &defaults.configs,
            settings,
            monitor_id,
        };

        let payload = match self.renderer.render(&request) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("[{}] Failed to render template: {}", scope, e);
                return MonitorOutcome::failed(&monitor_type.name, subtype, e);
            }
        };

        let Some(api) = self.api else {
            let action = if monitor_id.is_some() {
                DeployAction::WouldUpdate
            } else {
                DeployAction::WouldCreate
            };
            log::info!("[{}] [DRY RUN] Would {} {}", scope, verb(action), payload);
            return MonitorOutcome {
                monitor_type: monitor_type.name.clone(),
                subtype: Some(subtype.to_string()),
                action,
                monitor_id,
                payload: Some(payload),
                error: None,
            };
        };

        let (result, action) = match monitor_id {
            Some(id) => (
                monitor_type.kind.update(api, &payload, id),
                DeployAction::Updated,
            ),
            None => (monitor_type.kind.create(api, &payload), DeployAction::Created),
        };

        match result {
            Ok(alert) => {
                log::info!("[{}] Monitor {} {}", scope, alert.id, action);
                app.record_deployed(monitor_type, subtype, &alert);
                MonitorOutcome {
                    monitor_type: monitor_type.name.clone(),
                    subtype: Some(subtype.to_string()),
                    action,
                    monitor_id: Some(alert.id),
                    payload: Some(payload),
                    error: None,
                }
            }
            Err(e) => {
                log::error!("[{}] API call failed: {}", scope, e);
                MonitorOutcome {
                    payload: Some(payload),
                    ..MonitorOutcome::failed(&monitor_type.name, subtype, e)
                }
            }
        }
    }
}

fn verb(action: DeployAction) -> &'static str {
    match action {
        DeployAction::WouldUpdate => "update",
        _ => "create",
    }
}
