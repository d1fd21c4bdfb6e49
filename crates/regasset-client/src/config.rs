//! Client configuration.
//!
//! Approval and action endpoints come from the assets and outcomes
//! themselves; the only fixed endpoint is the ledger API used for issuer
//! flag lookups. Defaults point at the public network. Override via
//! environment variables or explicit construction for testnet or tests.

use url::Url;

/// Default ledger API used for account flag lookups.
pub const DEFAULT_HORIZON_URL: &str = "https://horizon.stellar.org";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::RegulatedAssetsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the ledger API serving `GET /accounts/{id}`.
    pub horizon_url: Url,
    /// Request timeout in seconds, applied to every call.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REGASSET_HORIZON_URL` (default: `https://horizon.stellar.org`)
    /// - `REGASSET_TIMEOUT_SECS` (default: 30)
    /// - `REGASSET_USER_AGENT` (default: `regasset/<crate version>`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match std::env::var("REGASSET_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            horizon_url: env_url("REGASSET_HORIZON_URL", DEFAULT_HORIZON_URL)?,
            timeout_secs,
            user_agent: std::env::var("REGASSET_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
        })
    }

    /// Configuration pointing the flags lookup at a local mock server.
    pub fn local_mock(horizon_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            horizon_url: Url::parse(horizon_url)
                .map_err(|e| ConfigError::InvalidUrl(horizon_url.to_string(), e.to_string()))?,
            timeout_secs: 5,
            user_agent: default_user_agent(),
        })
    }
}

fn default_user_agent() -> String {
    format!("regasset/{}", env!("CARGO_PKG_VERSION"))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("REGASSET_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}
