//! Offline mock client
//!
//! Active when the credentials are the `mock`/`mock` pair. Makes no network
//! calls and hands back identifiers derived from the rendered alert, so
//! repeated runs and separate processes agree on them.

use crate::api::MonitorApi;
use crate::domain::{AlertPayload, AlertRef};
use crate::error::ApiError;

use std::cell::RefCell;
use std::collections::HashSet;
use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

/// Creator recorded for alerts created in mock mode
pub const MOCK_CREATOR: &str = "mock@datacat";

/// Org id recorded for alerts created in mock mode
pub const MOCK_ORG_ID: i64 = 0;

/// Mock monitor API
///
/// Remembers the identifiers it handed out so two creates in one run never
/// share an alert, even for identical payloads.
#[derive(Debug, Default)]
pub struct MockClient {
    issued: RefCell<HashSet<i64>>,
}

impl MockClient {
    /// Create a new mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier a fresh client returns when creating `payload`
    ///
    /// xxh3 of the name, query, tags and type, folded into nine decimal digits.
    pub fn alert_id_for(payload: &AlertPayload) -> i64 {
        fold(xxh3_64(&identity(payload)))
    }

    fn issue(&self, payload: &AlertPayload) -> i64 {
        let mut issued = self.issued.borrow_mut();
        let mut id = Self::alert_id_for(payload);
        let mut seed = 0;
        while issued.contains(&id) {
            seed += 1;
            id = fold(xxh3_64_with_seed(&identity(payload), seed));
        }
        issued.insert(id);
        id
    }
}

fn identity(payload: &AlertPayload) -> Vec<u8> {
    let tags = payload.tags.join("\x1f");
    [
        payload.name.as_str(),
        payload.query.as_str(),
        tags.as_str(),
        payload.alert_type.as_str(),
    ]
    .join("\0")
    .into_bytes()
}

fn fold(hash: u64) -> i64 {
    (hash % 900_000_000 + 100_000_000) as i64
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl MonitorApi for MockClient {
    fn create(&self, payload: &AlertPayload) -> Result<AlertRef, ApiError> {
        let id = self.issue(payload);
        log::info!("[MOCK] Created monitor '{}' with id {}", payload.name, id);

        let timestamp = now();
        Ok(AlertRef {
            id,
            org_id: Some(MOCK_ORG_ID),
            creator: Some(MOCK_CREATOR.to_string()),
            created_at: Some(timestamp.clone()),
            updated_at: Some(timestamp),
        })
    }

    fn update(&self, payload: &AlertPayload, alert_id: i64) -> Result<AlertRef, ApiError> {
        self.issued.borrow_mut().insert(alert_id);
        log::info!("[MOCK] Updated monitor '{}' (id {})", payload.name, alert_id);

        Ok(AlertRef {
            id: alert_id,
            org_id: Some(MOCK_ORG_ID),
            creator: None,
            created_at: None,
            updated_at: Some(now()),
        })
    }
}
