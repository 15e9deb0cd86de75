//! Application configuration and deployment state
//!
//! The application file is the only layer this tool writes. Deployment state
//! lives under `<type>_configs_deployed.<subtype>`; an entry there means the
//! alert exists remotely and later runs update it.

use crate::domain::{AlertRef, MonitorType};
use crate::error::{ConfigError, StateError};
use crate::infra::{Layer, LayerLocation};

use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Persisted fields of a deployed alert
pub const MONITOR_ID: &str = "monitor_id";
pub const ORG_ID: &str = "org_id";
pub const CREATOR: &str = "creator";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

/// Deployment state of one (type, subtype) unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployedState {
    /// Never deployed: create
    Absent,
    /// Deployed with this identifier: update
    Deployed(i64),
    /// An entry exists but has no usable `monitor_id`
    Invalid(String),
}

/// A loaded `application.yaml`
#[derive(Debug, Clone)]
pub struct ApplicationConfig {
    path: PathBuf,
    layer: Layer,
    dirty: bool,
}

impl ApplicationConfig {
    /// Create an application config from an already loaded layer
    pub fn new(path: PathBuf, layer: Layer) -> Self {
        Self {
            path,
            layer,
            dirty: false,
        }
    }

    /// Load an application config
    pub fn load<P: AsRef<Path>>(path: P, name: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        Ok(Self {
            path: path.to_path_buf(),
            layer: Layer::load(path, LayerLocation::Application, name)?,
            dirty: false,
        })
    }

    /// Application name
    pub fn name(&self) -> &str {
        self.layer.name()
    }

    /// File this config was loaded from and is saved to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The application's own layer
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Whether state was recorded since loading
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Deployment state of `subtype` for `monitor_type`
    pub fn deployed_state(&self, monitor_type: &MonitorType, subtype: &str) -> DeployedState {
        let entry = self
            .layer
            .get(&monitor_type.deployed_key())
            .and_then(|deployed| deployed.get(subtype));

        let Some(entry) = entry else {
            return DeployedState::Absent;
        };

        match entry.get(MONITOR_ID) {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(id) => DeployedState::Deployed(id),
                None => DeployedState::Invalid(format!("monitor_id {} is not an integer", n)),
            },
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map(DeployedState::Deployed)
                .unwrap_or_else(|_| {
                    DeployedState::Invalid(format!("monitor_id '{}' is not an integer", s))
                }),
            Some(_) => DeployedState::Invalid("monitor_id has an unexpected type".to_string()),
            None => DeployedState::Invalid("entry has no monitor_id".to_string()),
        }
    }

    /// Merge an API result into `<type>_configs_deployed.<subtype>`
    ///
    /// Keys already in the entry are kept; `creator`, `org_id` and
    /// `created_at` keep their previous value when `alert` omits them.
    pub fn record_deployed(&mut self, monitor_type: &MonitorType, subtype: &str, alert: &AlertRef) {
        let deployed = mapping_entry(self.layer.data_mut(), &monitor_type.deployed_key());
        let entry = mapping_entry(deployed, subtype);

        entry.insert(MONITOR_ID.into(), alert.id.into());
        if let Some(org_id) = alert.org_id {
            entry.insert(ORG_ID.into(), org_id.into());
        }
        if let Some(creator) = &alert.creator {
            entry.insert(CREATOR.into(), creator.as_str().into());
        }
        if let Some(created_at) = &alert.created_at {
            entry.insert(CREATED_AT.into(), created_at.as_str().into());
        }
        let updated_at = alert
            .updated_at
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
        entry.insert(UPDATED_AT.into(), updated_at.into());

        self.dirty = true;
    }

    /// Write the whole config back to its file
    ///
    /// Writes to a sibling temp file and renames it over the original so an
    /// interrupted write never leaves a truncated config.
    pub fn save(&mut self) -> Result<(), StateError> {
        let content = serde_yaml::to_string(self.layer.data()).map_err(|e| {
            StateError::Serialize {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;

        let tmp = self.path.with_extension("yaml.tmp");
        let write_error = |source: std::io::Error| StateError::Write {
            path: self.path.clone(),
            source,
        };

        std::fs::write(&tmp, content).map_err(write_error)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_error(e));
        }

        self.dirty = false;
        Ok(())
    }
}

/// Get `key` as a mutable mapping, replacing any non-mapping value
fn mapping_entry<'a>(parent: &'a mut Mapping, key: &str) -> &'a mut Mapping {
    let slot = parent
        .entry(Value::from(key))
        .or_insert(Value::Mapping(Mapping::new()));
    if !slot.is_mapping() {
        *slot = Value::Mapping(Mapping::new());
    }
    match slot {
        Value::Mapping(m) => m,
        _ => unreachable!("slot was just set to a mapping"),
    }
}
