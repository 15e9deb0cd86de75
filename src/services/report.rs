//! Deployment report
//!
//! What happened to every application and (type, subtype) unit in a run.

use crate::domain::{AlertPayload, DeployAction};

use serde::Serialize;

/// Outcome of one (type, subtype) unit
#[derive(Debug, Clone, Serialize)]
pub struct MonitorOutcome {
    pub monitor_type: String,
    /// `None` when the whole monitor type was skipped
    pub subtype: Option<String>,
    pub action: DeployAction,
    pub monitor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<AlertPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MonitorOutcome {
    /// A whole monitor type skipped for an application
    pub fn type_skipped(monitor_type: &str, error: impl ToString) -> Self {
        Self {
            monitor_type: monitor_type.to_string(),
            subtype: None,
            action: DeployAction::Skipped,
            monitor_id: None,
            payload: None,
            error: Some(error.to_string()),
        }
    }

    /// A single unit that failed
    pub fn failed(monitor_type: &str, subtype: &str, error: impl ToString) -> Self {
        Self {
            monitor_type: monitor_type.to_string(),
            subtype: Some(subtype.to_string()),
            action: DeployAction::Failed,
            monitor_id: None,
            payload: None,
            error: Some(error.to_string()),
        }
    }
}

/// Everything done for one application
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationReport {
    pub application: String,
    pub monitors: Vec<MonitorOutcome>,
    /// Whether the application file was written back
    pub persisted: bool,
    /// Load or persist failure for the application as a whole
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApplicationReport {
    /// Create an empty report for `application`
    pub fn new(application: &str) -> Self {
        Self {
            application: application.to_string(),
            monitors: Vec::new(),
            persisted: false,
            error: None,
        }
    }

    /// Failed units plus an application-level failure, if any
    pub fn failure_count(&self) -> usize {
        let units = self
            .monitors
            .iter()
            .filter(|m| m.action.is_failure())
            .count();
        units + usize::from(self.error.is_some())
    }

    /// Look up the outcome of a unit
    pub fn outcome(&self, monitor_type: &str, subtype: &str) -> Option<&MonitorOutcome> {
        self.monitors
            .iter()
            .find(|m| m.monitor_type == monitor_type && m.subtype.as_deref() == Some(subtype))
    }
}

/// Report for a whole run
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    pub region: String,
    pub stage: String,
    pub dry_run: bool,
    pub applications: Vec<ApplicationReport>,
}

impl DeploymentReport {
    /// Total failures across every application
    pub fn failure_count(&self) -> usize {
        self.applications.iter().map(|a| a.failure_count()).sum()
    }

    /// Number of units with the given action
    pub fn count(&self, action: DeployAction) -> usize {
        self.applications
            .iter()
            .flat_map(|a| &a.monitors)
            .filter(|m| m.action == action)
            .count()
    }

    /// Look up an application's report
    pub fn application(&self, name: &str) -> Option<&ApplicationReport> {
        self.applications.iter().find(|a| a.application == name)
    }
}
