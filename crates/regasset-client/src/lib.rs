//! # regasset-client — HTTP client for the regulated-asset approval protocol
//!
//! Drives the network side of transferring a regulated asset:
//! - **Policy** via the issuer's account flags (`GET /accounts/{id}` on the
//!   ledger API): is approval required for this transfer at all?
//! - **Approval** via the asset's approval server (`POST tx=...`): one of
//!   success, revised, pending, action_required, rejected.
//! - **Action** via the URL named by `action_required`: one of
//!   no_further_action_required, follow_next_url.
//!
//! Each call performs exactly one request and returns one outcome. Polling,
//! re-signing and resubmission are the caller's decisions; nothing here
//! retries, sleeps or spawns tasks.
//!
//! ## Flow
//!
//! ```text
//! requires_approval = false ──► submit to the ledger directly (not here)
//! requires_approval = true  ──► ApprovalClient::submit
//!     success / rejected / revised ─► done (revised: re-sign, resubmit)
//!     pending                        ─► caller waits, resubmits
//!     action_required ──► ActionClient::submit
//!         no_further_action_required ─► resubmit original tx
//!         follow_next_url             ─► user continues at next_url
//! ```

pub mod action;
pub mod approval;
pub mod config;
pub mod error;
pub mod flags;
pub(crate) mod http;
pub mod policy;

pub use action::{ActionClient, ActionMethod};
pub use approval::ApprovalClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use flags::{AccountFlagsSource, FlagsLookupError, HorizonFlagsSource};
pub use policy::{AuthorizationPolicyChecker, PolicyCheckFailed};

use std::time::Duration;

/// Top-level client. Holds the sub-clients, all sharing one connection pool.
#[derive(Debug, Clone)]
pub struct RegulatedAssetsClient {
    approval: ApprovalClient,
    action: ActionClient,
    policy: AuthorizationPolicyChecker<HorizonFlagsSource>,
}

impl RegulatedAssetsClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self::with_http(http, config))
    }

    /// Create a client from the `REGASSET_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client around an existing `reqwest::Client`.
    ///
    /// `config.timeout_secs` and `config.user_agent` are not applied; the
    /// supplied client's settings win.
    pub fn with_http(http: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            approval: ApprovalClient::new(http.clone()),
            action: ActionClient::new(http.clone()),
            policy: AuthorizationPolicyChecker::new(HorizonFlagsSource::new(
                http,
                config.horizon_url,
            )),
        }
    }

    /// Access the approval server client.
    pub fn approval(&self) -> &ApprovalClient {
        &self.approval
    }

    /// Access the action endpoint client.
    pub fn action(&self) -> &ActionClient {
        &self.action
    }

    /// Access the authorization policy checker.
    pub fn policy(&self) -> &AuthorizationPolicyChecker<HorizonFlagsSource> {
        &self.policy
    }
}
