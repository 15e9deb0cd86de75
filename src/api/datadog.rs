//! Live Datadog monitor client
//!
//! Blocking HTTPS calls against the v1 monitor endpoints. No retries.

use crate::api::MonitorApi;
use crate::config::{ApiConfig, Credentials};
use crate::domain::{AlertPayload, AlertRef};
use crate::error::ApiError;

use reqwest::blocking::{Client as BlockingClient, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

const API_KEY_HEADER: &str = "DD-API-KEY";
const APP_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// Datadog monitor API client
pub struct DatadogClient {
    client: BlockingClient,
    base_url: String,
    credentials: Credentials,
}

impl DatadogClient {
    /// Create a new client
    pub fn new(config: &ApiConfig, credentials: &Credentials) -> Result<Self, ApiError> {
        let client = BlockingClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            credentials: credentials.clone(),
        })
    }

    fn monitors_url(&self) -> String {
        format!("{}/api/v1/monitor", self.base_url)
    }

    fn send(&self, request: RequestBuilder) -> Result<AlertRef, ApiError> {
        let response = request
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(APP_KEY_HEADER, &self.credentials.app_key)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let monitor: MonitorResponse = response.json()?;
        Ok(monitor.into())
    }
}

impl MonitorApi for DatadogClient {
    fn create(&self, payload: &AlertPayload) -> Result<AlertRef, ApiError> {
        log::debug!("POST {} {}", self.monitors_url(), payload);
        self.send(self.client.post(self.monitors_url()).json(payload))
    }

    fn update(&self, payload: &AlertPayload, alert_id: i64) -> Result<AlertRef, ApiError> {
        let url = format!("{}/{}", self.monitors_url(), alert_id);
        log::debug!("PUT {} {}", url, payload);
        self.send(self.client.put(url).json(payload))
    }
}

/// Subset of the monitor object returned by create/update
#[derive(Debug, Deserialize)]
struct MonitorResponse {
    id: i64,
    org_id: Option<i64>,
    creator: Option<MonitorCreator>,
    created: Option<String>,
    modified: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MonitorCreator {
    email: Option<String>,
    handle: Option<String>,
    name: Option<String>,
}

impl From<MonitorResponse> for AlertRef {
    fn from(resp: MonitorResponse) -> Self {
        let creator = resp
            .creator
            .and_then(|c| c.email.or(c.handle).or(c.name));

        Self {
            id: resp.id,
            org_id: resp.org_id,
            creator,
            created_at: resp.created,
            updated_at: resp.modified,
        }
    }
}
