//! Alert payload and deployment records
//!
//! Provides the rendered alert definition sent to the monitoring API and the
//! references it hands back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete alert definition produced by rendering a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub name: String,
    pub message: String,
    pub options: serde_json::Value,
    pub query: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub alert_type: String,
}

impl fmt::Display for AlertPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({}): {}", self.name, self.alert_type, self.query)
    }
}

/// Reference to an alert as returned by the monitoring API
///
/// Fields other than `id` are optional; an API that omits them leaves any
/// previously recorded value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRef {
    pub id: i64,
    pub org_id: Option<i64>,
    pub creator: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl AlertRef {
    /// Create a reference carrying only an identifier
    pub fn new(id: i64) -> Self {
        Self {
            id,
            org_id: None,
            creator: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// What the orchestrator did with a (type, subtype) unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployAction {
    Created,
    Updated,
    WouldCreate,
    WouldUpdate,
    Failed,
    Skipped,
}

impl DeployAction {
    /// Whether this outcome counts against the exit status
    pub fn is_failure(&self) -> bool {
        matches!(self, DeployAction::Failed | DeployAction::Skipped)
    }
}

impl fmt::Display for DeployAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeployAction::Created => "created",
            DeployAction::Updated => "updated",
            DeployAction::WouldCreate => "would-create",
            DeployAction::WouldUpdate => "would-update",
            DeployAction::Failed => "failed",
            DeployAction::Skipped => "skipped",
        };
        write!(f, "{}", label)
    }
}
