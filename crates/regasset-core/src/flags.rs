//! Issuer account authorization flags, as reported by the ledger.

use serde::{Deserialize, Serialize};

/// Authorization flags set on an issuer account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountFlags {
    #[serde(default)]
    pub auth_required: bool,
    #[serde(default)]
    pub auth_revocable: bool,
    #[serde(default)]
    pub auth_immutable: bool,
    #[serde(default)]
    pub auth_clawback_enabled: bool,
}

impl AccountFlags {
    /// Whether transfers of the issuer's assets must go through the approval server.
    ///
    /// True only when both `auth_required` and `auth_revocable` are set.
    /// `auth_required` alone does not qualify.
    pub fn requires_approval(&self) -> bool {
        self.auth_required && self.auth_revocable
    }
}
