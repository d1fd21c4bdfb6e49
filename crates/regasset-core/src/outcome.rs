//! # Approval and Action Outcomes
//!
//! The approval server answers a submitted transaction with exactly one of
//! five outcomes, selected by the `status` field. The follow-up action
//! endpoint answers with one of two, selected by `result`. Both are modelled
//! as closed, internally tagged enums: an unknown or missing discriminant, or
//! a variant missing one of its required fields, does not decode and surfaces
//! as a [`ProtocolViolation`] carrying the raw payload.
//!
//! ## Wire shapes
//!
//! | `status` | Required | Optional (default) |
//! |----------|----------|--------------------|
//! | `success` | `tx` | `message` |
//! | `revised` | `tx` | `message` |
//! | `pending` | | `timeout` (0), `message` |
//! | `action_required` | `message`, `action_url` | `action_method` (`GET`), `action_fields` |
//! | `rejected` | `error` | |
//!
//! | `result` | Required | Optional |
//! |----------|----------|----------|
//! | `no_further_action_required` | | |
//! | `follow_next_url` | `next_url` | `message` |

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Method used for an action when the server does not name one.
pub const DEFAULT_ACTION_METHOD: &str = "GET";

fn default_action_method() -> String {
    DEFAULT_ACTION_METHOD.to_string()
}

// Optional fields with a non-`Option` type: an explicit `null` takes the
// default just like an absent key.

fn timeout_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    Ok(Option::<u64>::deserialize(de)?.unwrap_or(0))
}

fn method_or_default<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_else(default_action_method))
}

/// A well-formed JSON response that breaks the protocol contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("protocol violation: {reason}; payload: {raw_payload}")]
pub struct ProtocolViolation {
    /// The offending response body, re-serialized.
    pub raw_payload: String,
    /// Decoder message naming the missing field or unknown discriminant.
    pub reason: String,
}

impl ProtocolViolation {
    fn new(payload: &serde_json::Value, reason: impl Into<String>) -> Self {
        Self {
            raw_payload: payload.to_string(),
            reason: reason.into(),
        }
    }
}

/// Decode a tagged reply. Only JSON objects are accepted; serde would
/// otherwise read the tag from the first element of an array.
fn decode<T: serde::de::DeserializeOwned>(payload: &serde_json::Value) -> Result<T, ProtocolViolation> {
    if !payload.is_object() {
        return Err(ProtocolViolation::new(payload, "expected a JSON object"));
    }
    serde_json::from_value(payload.clone()).map_err(|e| ProtocolViolation::new(payload, e.to_string()))
}

/// Reply of the approval server to a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ApprovalOutcome {
    /// The transaction was approved and signed by the issuer.
    #[serde(rename = "success")]
    Approved {
        #[serde(rename = "tx")]
        signed_tx: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// The server rewrote the transaction to make it compliant and signed it.
    /// The caller must review and re-sign it before submitting.
    #[serde(rename = "revised")]
    Revised {
        #[serde(rename = "tx")]
        revised_tx: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// No decision yet. `timeout` is the server's hint for how long to wait
    /// before resubmitting, 0 when unspecified.
    #[serde(rename = "pending")]
    Pending {
        #[serde(default, deserialize_with = "timeout_or_zero")]
        timeout: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// The server needs more information from the user first.
    #[serde(rename = "action_required")]
    ActionRequired {
        message: String,
        action_url: String,
        #[serde(default = "default_action_method", deserialize_with = "method_or_default")]
        action_method: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action_fields: Option<Vec<String>>,
    },

    /// The transaction will never be approved.
    #[serde(rename = "rejected")]
    Rejected {
        #[serde(rename = "error")]
        reason: String,
    },
}

impl ApprovalOutcome {
    /// Decode an approval server reply.
    pub fn from_json(payload: &serde_json::Value) -> Result<Self, ProtocolViolation> {
        decode(payload)
    }

    /// The `status` discriminant as sent on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Approved { .. } => "success",
            Self::Revised { .. } => "revised",
            Self::Pending { .. } => "pending",
            Self::ActionRequired { .. } => "action_required",
            Self::Rejected { .. } => "rejected",
        }
    }

    /// Whether the approval exchange for this transaction is over.
    ///
    /// `Revised` counts as terminal: a revised transaction must be re-signed
    /// and is a new submission.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Approved { .. } | Self::Revised { .. } | Self::Rejected { .. } => true,
            Self::Pending { .. } | Self::ActionRequired { .. } => false,
        }
    }

    /// The server's message, if this outcome carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Approved { message, .. }
            | Self::Revised { message, .. }
            | Self::Pending { message, .. } => message.as_deref(),
            Self::ActionRequired { message, .. } => Some(message),
            Self::Rejected { reason } => Some(reason),
        }
    }
}

/// Reply of the action endpoint to submitted compliance data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum ActionOutcome {
    /// Nothing more is needed; the original transaction can be resubmitted.
    #[serde(rename = "no_further_action_required")]
    Done,

    /// The user must continue at another URL.
    #[serde(rename = "follow_next_url")]
    NextUrl {
        #[serde(rename = "next_url")]
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ActionOutcome {
    /// Decode an action endpoint reply.
    pub fn from_json(payload: &serde_json::Value) -> Result<Self, ProtocolViolation> {
        decode(payload)
    }

    /// The `result` discriminant as sent on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Done => "no_further_action_required",
            Self::NextUrl { .. } => "follow_next_url",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}
