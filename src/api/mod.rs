//! Monitoring API abstraction layer
//!
//! Provides a trait over the monitor create/update calls so the live client,
//! the offline mock, and test doubles are interchangeable.

pub mod datadog;
pub mod mock;

pub use datadog::DatadogClient;
pub use mock::MockClient;

use crate::config::{ApiConfig, Credentials};
use crate::domain::{AlertPayload, AlertRef};
use crate::error::ApiError;

/// Trait for monitoring API operations
///
/// Implementations never panic on remote failures; every failure comes back
/// as an [`ApiError`].
pub trait MonitorApi {
    /// Create a new alert
    fn create(&self, payload: &AlertPayload) -> Result<AlertRef, ApiError>;

    /// Replace the definition of an existing alert
    fn update(&self, payload: &AlertPayload, alert_id: i64) -> Result<AlertRef, ApiError>;
}

/// Client selected from the loaded credentials
pub enum MonitorClient {
    Live(DatadogClient),
    Mock(MockClient),
}

impl MonitorClient {
    /// Pick mock mode when both keys are the mock sentinel, live otherwise
    pub fn from_credentials(credentials: &Credentials, config: &ApiConfig) -> Result<Self, ApiError> {
        if credentials.is_mock() {
            log::info!("Mock credentials detected, no API calls will be made");
            return Ok(MonitorClient::Mock(MockClient::new()));
        }
        Ok(MonitorClient::Live(DatadogClient::new(config, credentials)?))
    }

    /// Whether this client is in offline mock mode
    pub fn is_mock(&self) -> bool {
        matches!(self, MonitorClient::Mock(_))
    }
}

impl MonitorApi for MonitorClient {
    fn create(&self, payload: &AlertPayload) -> Result<AlertRef, ApiError> {
        match self {
            MonitorClient::Live(c) => c.create(payload),
            MonitorClient::Mock(c) => c.create(payload),
        }
    }

    fn update(&self, payload: &AlertPayload, alert_id: i64) -> Result<AlertRef, ApiError> {
        match self {
            MonitorClient::Live(c) => c.update(payload, alert_id),
            MonitorClient::Mock(c) => c.update(payload, alert_id),
        }
    }
}
