//! Monitor types and their handlers
//!
//! The tool config maps each monitor type name (`system`, `aws-elb`, ...) to a
//! handler identifier. Handler identifiers are parsed into [`MonitorKind`]
//! once, at registry construction.

use crate::api::MonitorApi;
use crate::config::ALL_MONITOR_TYPES;
use crate::domain::{AlertPayload, AlertRef};
use crate::error::{ApiError, AppError, ConfigError};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Shared capability of every monitor handler
pub trait MonitorHandler {
    /// Human-readable family label used in logs
    fn label(&self) -> &'static str;

    /// Create a new alert
    fn create(&self, api: &dyn MonitorApi, payload: &AlertPayload) -> Result<AlertRef, ApiError> {
        log::info!("Creating {} monitor {}", self.label(), payload.name);
        api.create(payload)
    }

    /// Update an alert created by a previous run
    fn update(
        &self,
        api: &dyn MonitorApi,
        payload: &AlertPayload,
        alert_id: i64,
    ) -> Result<AlertRef, ApiError> {
        log::info!(
            "Updating {} monitor {} (id {})",
            self.label(),
            payload.name,
            alert_id
        );
        api.update(payload, alert_id)
    }
}

/// Known monitor handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorKind {
    /// Host-level metrics (cpu, memory, disk)
    System,
    /// AWS Elastic Load Balancer metrics
    AwsElb,
}

impl MonitorKind {
    /// Handler identifier as written in the tool config
    pub fn handler_id(&self) -> &'static str {
        match self {
            MonitorKind::System => "SystemMonitors",
            MonitorKind::AwsElb => "AwsElbMonitors",
        }
    }
}

impl MonitorHandler for MonitorKind {
    fn label(&self) -> &'static str {
        match self {
            MonitorKind::System => "system",
            MonitorKind::AwsElb => "AWS ELB",
        }
    }
}

impl FromStr for MonitorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SystemMonitors" => Ok(MonitorKind::System),
            "AwsElbMonitors" => Ok(MonitorKind::AwsElb),
            other => Err(ConfigError::InvalidValue {
                key: "monitor-types".to_string(),
                message: format!("unknown handler '{}'", other),
            }),
        }
    }
}

impl fmt::Display for MonitorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.handler_id())
    }
}

/// A monitor type to deploy: its config/template name and its handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorType {
    pub name: String,
    pub kind: MonitorKind,
}

impl MonitorType {
    /// Application/layer key holding this type's settings
    pub fn configs_key(&self) -> String {
        format!("{}_configs", self.name)
    }

    /// Application key pointing at the layer that owns the settings
    pub fn location_key(&self) -> String {
        format!("{}_configs_location", self.name)
    }

    /// Application key holding persisted deployment state
    pub fn deployed_key(&self) -> String {
        format!("{}_configs_deployed", self.name)
    }
}

impl fmt::Display for MonitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Monitor type registry built from the tool config
#[derive(Debug, Clone)]
pub struct MonitorRegistry {
    types: BTreeMap<String, MonitorKind>,
}

impl MonitorRegistry {
    /// Build the registry, rejecting unknown handler identifiers
    pub fn from_config(entries: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut types = BTreeMap::new();
        for (name, handler) in entries {
            if name == ALL_MONITOR_TYPES {
                continue;
            }
            types.insert(name.clone(), handler.parse()?);
        }
        Ok(Self { types })
    }

    /// Resolve a requested type name; `all` expands to every registered type
    pub fn resolve(&self, requested: &str) -> Result<Vec<MonitorType>, AppError> {
        if requested == ALL_MONITOR_TYPES {
            return Ok(self
                .types
                .iter()
                .map(|(name, kind)| MonitorType {
                    name: name.clone(),
                    kind: *kind,
                })
                .collect());
        }

        self.types
            .get(requested)
            .map(|kind| {
                vec![MonitorType {
                    name: requested.to_string(),
                    kind: *kind,
                }]
            })
            .ok_or_else(|| AppError::UnknownMonitorType(requested.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingApi;

    fn registry() -> MonitorRegistry {
        MonitorRegistry::from_config(&crate::config::Config::default().monitor_types).unwrap()
    }

    #[test]
    fn test_parse_handler_ids() {
        assert_eq!("SystemMonitors".parse::<MonitorKind>().unwrap(), MonitorKind::System);
        assert_eq!("AwsElbMonitors".parse::<MonitorKind>().unwrap(), MonitorKind::AwsElb);
        assert!("DiskMonitors".parse::<MonitorKind>().is_err());
    }

    #[test]
    fn test_registry_excludes_all() {
        let types = registry().resolve("all").unwrap();
        assert_eq!(types.len(), 2);
        assert!(types.iter().all(|t| t.name != ALL_MONITOR_TYPES));
    }

    #[test]
    fn test_resolve_all_is_sorted() {
        let types = registry().resolve("all").unwrap();
        let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["aws-elb", "system"]);
    }

    #[test]
    fn test_resolve_single() {
        let types = registry().resolve("system").unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].kind, MonitorKind::System);
        assert_eq!(types[0].location_key(), "system_configs_location");
        assert_eq!(types[0].deployed_key(), "system_configs_deployed");
    }

    #[test]
    fn test_resolve_unknown() {
        let result = registry().resolve("network");
        assert!(matches!(result, Err(AppError::UnknownMonitorType(name)) if name == "network"));
    }

    #[test]
    fn test_registry_rejects_unknown_handler() {
        let mut entries = BTreeMap::new();
        entries.insert("disk".to_string(), "DiskMonitors".to_string());
        assert!(MonitorRegistry::from_config(&entries).is_err());
    }

    #[test]
    fn test_handler_delegates_to_api() {
        let api = RecordingApi::new();
        let payload = crate::testing::payload("cpu");

        MonitorKind::System.create(&api, &payload).unwrap();
        MonitorKind::AwsElb.update(&api, &payload, 42).unwrap();

        assert_eq!(api.creates(), vec!["cpu".to_string()]);
        assert_eq!(api.updates(), vec![("cpu".to_string(), 42)]);
    }
}
