//! # Regulated Assets
//!
//! A `RegulatedAsset` is an asset whose issuer requires every transfer to be
//! approved by a compliance service before it is submitted to the ledger.
//! Records are only constructed through [`RegulatedAsset::new`], which
//! enforces the code-length and endpoint invariants; the registry is the
//! usual entry point.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::AccountId;

/// Longest permitted asset code.
pub const MAX_CODE_LEN: usize = 12;

/// Ledger representation class of an asset code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Codes of 1 to 4 characters.
    Alphanum4,
    /// Codes of 5 to 12 characters.
    Alphanum12,
}

impl AssetKind {
    /// Classify an asset code, or `None` when its length is outside 1..=12.
    pub fn for_code(code: &str) -> Option<Self> {
        match code.chars().count() {
            1..=4 => Some(Self::Alphanum4),
            5..=MAX_CODE_LEN => Some(Self::Alphanum12),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alphanum4 => write!(f, "credit_alphanum4"),
            Self::Alphanum12 => write!(f, "credit_alphanum12"),
        }
    }
}

/// Rejected construction of a [`RegulatedAsset`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Code length outside 1..=12.
    #[error("asset code {0:?} must be 1 to {MAX_CODE_LEN} characters")]
    InvalidCode(String),

    /// The approval endpoint is empty.
    #[error("asset {0} has no approval server")]
    MissingApprovalServer(String),
}

/// An asset whose transfers must be approved by its issuer's approval server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegulatedAsset {
    code: String,
    issuer: AccountId,
    approval_server: String,
    approval_criteria: Option<String>,
    kind: AssetKind,
}

impl RegulatedAsset {
    /// Build a regulated asset record, enforcing the code and endpoint invariants.
    pub fn new(
        code: impl Into<String>,
        issuer: AccountId,
        approval_server: impl Into<String>,
        approval_criteria: Option<String>,
    ) -> Result<Self, AssetError> {
        let code = code.into();
        let kind = AssetKind::for_code(&code).ok_or_else(|| AssetError::InvalidCode(code.clone()))?;
        let approval_server = approval_server.into();
        if approval_server.trim().is_empty() {
            return Err(AssetError::MissingApprovalServer(code));
        }
        Ok(Self {
            code,
            issuer,
            approval_server,
            approval_criteria,
            kind,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn issuer(&self) -> &AccountId {
        &self.issuer
    }

    /// URL of the approval server that receives candidate transactions.
    pub fn approval_server(&self) -> &str {
        &self.approval_server
    }

    /// Human-readable description of what the issuer checks, if published.
    pub fn approval_criteria(&self) -> Option<&str> {
        self.approval_criteria.as_deref()
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// `CODE:ISSUER` form used in logs and asset lookups.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for RegulatedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.code, self.issuer)
    }
}
