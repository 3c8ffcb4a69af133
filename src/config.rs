//! # Configuration
//!
//! Settings are read from the environment at startup. A `.env` file in
//! the working directory is honoured for local development.
//!
//! | Variable | Default |
//! |---|---|
//! | `MEDCONSULT_API_URL` | `http://localhost:5000/api` |
//! | `MEDCONSULT_SESSION_FILE` | `<config dir>/medconsult/session.json` |
//! | `MEDCONSULT_TIMEOUT_SECS` | no timeout |

use reqwest::Url;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiClient, ApiError, ReqwestTransport, DEFAULT_BASE_URL};
use crate::session::FileStore;

pub const API_URL_VAR: &str = "MEDCONSULT_API_URL";
pub const SESSION_FILE_VAR: &str = "MEDCONSULT_SESSION_FILE";
pub const TIMEOUT_VAR: &str = "MEDCONSULT_TIMEOUT_SECS";

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
    #[error("Could not determine a configuration directory; set {0}")]
    NoConfigDir(String),
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub session_file: PathBuf,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `.env` is skipped under test so tests stay hermetic.
    pub fn load() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidValue(API_URL_VAR.to_string(), e.to_string()))?;

        let session_file = match lookup(SESSION_FILE_VAR).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => dirs::config_dir()
                .ok_or_else(|| ConfigError::NoConfigDir(SESSION_FILE_VAR.to_string()))?
                .join("medconsult")
                .join("session.json"),
        };

        let timeout = match lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                    ConfigError::InvalidValue(
                        TIMEOUT_VAR.to_string(),
                        format!("'{}' is not a positive number of seconds", raw),
                    )
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url,
            session_file,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_store(&self) -> FileStore {
        FileStore::new(&self.session_file)
    }

    /// Build an API client persisting its session to [`Config::session_file`].
    pub fn api_client(&self) -> Result<ApiClient, ApiError> {
        let transport = match self.timeout {
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::new(),
        };
        Ok(ApiClient::with_transport(
            self.base_url.clone(),
            Arc::new(self.session_store()),
            Arc::new(transport),
        ))
    }
}
