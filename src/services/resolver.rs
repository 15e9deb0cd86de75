//! Configuration resolver
//!
//! Follows the application's `*_configs_location` pointers to the layer that
//! owns each config section.

use crate::domain::MonitorType;
use crate::error::ConfigError;
use crate::infra::{ApplicationConfig, Layer, LayerContext, LayerLocation};

use serde_yaml::Value;

pub const DEFAULT_CONFIGS: &str = "default_configs";
pub const DEFAULT_CONFIGS_LOCATION: &str = "default_configs_location";

const DEFAULT_LOCATIONS: &[LayerLocation] = &[LayerLocation::Region, LayerLocation::Stage];
const TYPE_LOCATIONS: &[LayerLocation] = &[
    LayerLocation::Region,
    LayerLocation::Stage,
    LayerLocation::Application,
];

/// Resolved `default_configs`
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDefaults {
    pub location: LayerLocation,
    pub configs: Value,
}

/// Resolved `<type>_configs`, one entry per subtype in file order
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMonitorType {
    pub location: LayerLocation,
    pub subtypes: Vec<(String, Value)>,
}

/// Resolves config sections against the region/stage/application layers
pub struct ConfigResolver<'a> {
    context: &'a LayerContext,
}

impl<'a> ConfigResolver<'a> {
    /// Create a resolver over the run's region and stage layers
    pub fn new(context: &'a LayerContext) -> Self {
        Self { context }
    }

    fn layer<'s>(&'s self, app: &'s ApplicationConfig, location: LayerLocation) -> &'s Layer {
        match location {
            LayerLocation::Region => &self.context.region,
            LayerLocation::Stage => &self.context.stage,
            LayerLocation::Application => app.layer(),
        }
    }

    fn location(
        &self,
        app: &ApplicationConfig,
        key: &str,
        allowed: &[LayerLocation],
    ) -> Result<LayerLocation, ConfigError> {
        let value = app
            .layer()
            .get_str(key)
            .ok_or_else(|| ConfigError::MissingField(key.to_string()))?;
        LayerLocation::parse(key, value, allowed)
    }

    /// Resolve `default_configs` via `default_configs_location` (region or stage)
    pub fn resolve_defaults(&self, app: &ApplicationConfig) -> Result<ResolvedDefaults, ConfigError> {
        let location = self.location(app, DEFAULT_CONFIGS_LOCATION, DEFAULT_LOCATIONS)?;
        let configs = self.layer(app, location).require_mapping(DEFAULT_CONFIGS)?;

        log::debug!(
            "Default configs for {} come from {} layer",
            app.name(),
            location
        );

        Ok(ResolvedDefaults {
            location,
            configs: Value::Mapping(configs.clone()),
        })
    }

    /// Resolve `<type>_configs` via `<type>_configs_location`
    pub fn resolve_monitor_type(
        &self,
        app: &ApplicationConfig,
        monitor_type: &MonitorType,
    ) -> Result<ResolvedMonitorType, ConfigError> {
        let location = self.location(app, &monitor_type.location_key(), TYPE_LOCATIONS)?;
        let configs = self
            .layer(app, location)
            .require_mapping(&monitor_type.configs_key())?;

        let mut subtypes = Vec::with_capacity(configs.len());
        for (key, value) in configs {
            match key.as_str() {
                Some(subtype) => subtypes.push((subtype.to_string(), value.clone())),
                None => log::warn!(
                    "Ignoring non-string subtype key {:?} in {}",
                    key,
                    monitor_type.configs_key()
                ),
            }
        }

        Ok(ResolvedMonitorType { location, subtypes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonitorKind;
    use crate::testing::{application, context};

    const REGION: &str = r#"
default_configs:
  notification_channel: "@region-ops"
system_configs:
  cpu:
    warning_threshold: 80
    critical_threshold: 95
"#;

    const STAGE: &str = r#"
default_configs:
  notification_channel: "@stage-ops"
system_configs:
  cpu:
    warning_threshold: 70
    critical_threshold: 90
  memory:
    warning_threshold: 75
    critical_threshold: 85
"#;

    fn system() -> MonitorType {
        MonitorType {
            name: "system".to_string(),
            kind: MonitorKind::System,
        }
    }

    #[test]
    fn test_defaults_from_region() {
        let ctx = context(REGION, STAGE);
        let app = application("default_configs_location: region\n");
        let defaults = ConfigResolver::new(&ctx).resolve_defaults(&app).unwrap();

        assert_eq!(defaults.location, LayerLocation::Region);
        assert_eq!(
            defaults.configs,
            ctx.region.get(DEFAULT_CONFIGS).unwrap().clone()
        );
        assert_eq!(defaults.configs["notification_channel"], "@region-ops");
    }

    #[test]
    fn test_defaults_from_stage() {
        let ctx = context(REGION, STAGE);
        let app = application("default_configs_location: stage\n");
        let defaults = ConfigResolver::new(&ctx).resolve_defaults(&app).unwrap();
        assert_eq!(defaults.configs["notification_channel"], "@stage-ops");
    }

    #[test]
    fn test_defaults_location_missing() {
        let ctx = context(REGION, STAGE);
        let app = application("system_configs_location: stage\n");
        let result = ConfigResolver::new(&ctx).resolve_defaults(&app);
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_defaults_cannot_come_from_application() {
        let ctx = context(REGION, STAGE);
        let app = application(
            "default_configs_location: application\ndefault_configs:\n  notification_channel: x\n",
        );
        let result = ConfigResolver::new(&ctx).resolve_defaults(&app);
        assert!(matches!(result, Err(ConfigError::LocationInvalid { .. })));
    }

    #[test]
    fn test_defaults_section_absent() {
        let ctx = context("system_configs: {}\n", STAGE);
        let app = application("default_configs_location: region\n");
        let result = ConfigResolver::new(&ctx).resolve_defaults(&app);
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_monitor_type_from_stage_keeps_order() {
        let ctx = context(REGION, STAGE);
        let app = application("system_configs_location: stage\n");
        let resolved = ConfigResolver::new(&ctx)
            .resolve_monitor_type(&app, &system())
            .unwrap();

        assert_eq!(resolved.location, LayerLocation::Stage);
        let names: Vec<_> = resolved.subtypes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["cpu", "memory"]);
        assert_eq!(resolved.subtypes[0].1["critical_threshold"], 90);
    }

    #[test]
    fn test_monitor_type_from_application() {
        let ctx = context(REGION, STAGE);
        let app = application(
            "system_configs_location: application\nsystem_configs:\n  cpu:\n    critical_threshold: 60\n",
        );
        let resolved = ConfigResolver::new(&ctx)
            .resolve_monitor_type(&app, &system())
            .unwrap();
        assert_eq!(resolved.location, LayerLocation::Application);
        assert_eq!(resolved.subtypes[0].1["critical_threshold"], 60);
    }

    #[test]
    fn test_monitor_type_unrecognized_location() {
        let ctx = context(REGION, STAGE);
        let app = application("system_configs_location: galaxy\n");
        let result = ConfigResolver::new(&ctx).resolve_monitor_type(&app, &system());
        assert!(matches!(result, Err(ConfigError::LocationInvalid { .. })));
    }

    #[test]
    fn test_monitor_type_section_missing_in_layer() {
        let ctx = context(REGION, STAGE);
        let app = application("system_configs_location: application\n");
        let result = ConfigResolver::new(&ctx).resolve_monitor_type(&app, &system());
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }
}
