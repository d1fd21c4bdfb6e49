//! # Issuer Flag Lookups
//!
//! [`AccountFlagsSource`] is the seam through which the policy checker reads
//! issuer authorization flags. [`HorizonFlagsSource`] implements it over the
//! ledger's HTTP API:
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | GET | `/accounts/{account_id}` | `flags` object of the account record |
//!
//! A 404 is reported as [`FlagsLookupError::NotFound`]; every other failure
//! as [`FlagsLookupError::Transport`].

use async_trait::async_trait;
use regasset_core::{AccountFlags, AccountId};
use serde::Deserialize;

/// Failure to read an account's flags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagsLookupError {
    /// The account does not exist on the ledger.
    #[error("account {account} not found")]
    NotFound { account: String },

    /// The lookup could not be completed.
    #[error("account lookup for {account} failed: {reason}")]
    Transport { account: String, reason: String },
}

/// Source of issuer account flags.
#[async_trait]
pub trait AccountFlagsSource: Send + Sync {
    async fn account_flags(&self, account: &AccountId) -> Result<AccountFlags, FlagsLookupError>;
}

#[async_trait]
impl<T: AccountFlagsSource + ?Sized> AccountFlagsSource for std::sync::Arc<T> {
    async fn account_flags(&self, account: &AccountId) -> Result<AccountFlags, FlagsLookupError> {
        (**self).account_flags(account).await
    }
}

/// The part of an account record this crate reads.
#[derive(Debug, Deserialize)]
struct AccountRecord {
    flags: AccountFlags,
}

/// Flag lookups against the ledger HTTP API.
#[derive(Debug, Clone)]
pub struct HorizonFlagsSource {
    http: reqwest::Client,
    base_url: url::Url,
}

impl HorizonFlagsSource {
    pub fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    fn account_url(&self, account: &AccountId) -> String {
        format!(
            "{}/accounts/{}",
            self.base_url.as_str().trim_end_matches('/'),
            account
        )
    }
}

#[async_trait]
impl AccountFlagsSource for HorizonFlagsSource {
    async fn account_flags(&self, account: &AccountId) -> Result<AccountFlags, FlagsLookupError> {
        let url = self.account_url(account);
        let transport = |reason: String| FlagsLookupError::Transport {
            account: account.to_string(),
            reason,
        };

        tracing::debug!(%account, %url, "fetching issuer account flags");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FlagsLookupError::NotFound {
                account: account.to_string(),
            });
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(transport(format!("HTTP {status}: {body}")));
        }

        let record: AccountRecord = resp
            .json()
            .await
            .map_err(|e| transport(format!("undecodable account record: {e}")))?;
        Ok(record.flags)
    }
}
