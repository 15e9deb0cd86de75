//! API credentials
//!
//! Loaded once at startup from a TOML file holding `api_key` and `app_key`.

use crate::error::CredentialsError;

use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Sentinel value that switches the client to offline mock mode
pub const MOCK_SENTINEL: &str = "mock";

/// Monitoring API key pair
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub app_key: String,
}

impl Credentials {
    /// Load credentials from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CredentialsError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CredentialsError::Missing(path.to_path_buf()));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| CredentialsError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let credentials: Credentials =
            toml::from_str(&content).map_err(|e| CredentialsError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        credentials.validate()?;
        Ok(credentials)
    }

    /// Credentials that select mock mode
    pub fn mock() -> Self {
        Self {
            api_key: MOCK_SENTINEL.to_string(),
            app_key: MOCK_SENTINEL.to_string(),
        }
    }

    /// True when both keys are the mock sentinel
    pub fn is_mock(&self) -> bool {
        self.api_key == MOCK_SENTINEL && self.app_key == MOCK_SENTINEL
    }

    fn validate(&self) -> Result<(), CredentialsError> {
        if self.api_key.trim().is_empty() {
            return Err(CredentialsError::EmptyKey("api_key"));
        }
        if self.app_key.trim().is_empty() {
            return Err(CredentialsError::EmptyKey("app_key"));
        }
        Ok(())
    }
}

// Keys never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("mock", &self.is_mock())
            .finish_non_exhaustive()
    }
}
