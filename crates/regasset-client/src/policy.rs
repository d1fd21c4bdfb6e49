//! Authorization policy: does a transfer of this asset need approval?

use regasset_core::{AccountId, RegulatedAsset};

use crate::flags::{AccountFlagsSource, FlagsLookupError};

/// The issuer's flags could not be read, so the policy is undecided.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("authorization policy check for issuer {issuer} failed: {cause}")]
pub struct PolicyCheckFailed {
    pub issuer: AccountId,
    #[source]
    pub cause: FlagsLookupError,
}

/// Decides per transfer whether the approval protocol must be engaged.
#[derive(Debug, Clone)]
pub struct AuthorizationPolicyChecker<S> {
    source: S,
}

impl<S: AccountFlagsSource> AuthorizationPolicyChecker<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// True when the issuer has both `auth_required` and `auth_revocable` set.
    ///
    /// A failed lookup is returned as [`PolicyCheckFailed`], never read as
    /// "no approval needed".
    pub async fn requires_approval(&self, asset: &RegulatedAsset) -> Result<bool, PolicyCheckFailed> {
        let issuer = asset.issuer();
        match self.source.account_flags(issuer).await {
            Ok(flags) => {
                let required = flags.requires_approval();
                tracing::debug!(
                    asset = %asset,
                    auth_required = flags.auth_required,
                    auth_revocable = flags.auth_revocable,
                    required,
                    "authorization policy decided"
                );
                Ok(required)
            }
            Err(cause) => {
                tracing::warn!(asset = %asset, error = %cause, "issuer flag lookup failed");
                Err(PolicyCheckFailed {
                    issuer: issuer.clone(),
                    cause,
                })
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
