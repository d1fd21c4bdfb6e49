//! Client error types.

use regasset_core::ProtocolViolation;

/// Errors from approval and action calls.
///
/// `Http`, `UnexpectedStatus`, `MalformedBody` and `InvalidUrl` are transport
/// failures: no protocol reply was obtained. `ProtocolViolation` means a JSON
/// reply arrived but does not match any known outcome.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection failure, timeout, or unreadable body.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The server answered with a status outside 2xx and 400.
    #[error("{endpoint} returned {status}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The reply body is not JSON.
    #[error("{endpoint} returned a non-JSON body: {source}")]
    MalformedBody {
        endpoint: String,
        body: String,
        source: serde_json::Error,
    },

    /// The endpoint URL could not be parsed.
    #[error("invalid endpoint URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// The reply is JSON but breaks the protocol contract.
    #[error("{endpoint}: {source}")]
    ProtocolViolation {
        endpoint: String,
        source: ProtocolViolation,
    },

    /// The server asked for an action method this client cannot perform.
    #[error("unsupported action method {0:?}; expected GET or POST")]
    UnsupportedActionMethod(String),

    /// An action request was submitted without all declared fields.
    #[error("action request is missing fields: {}", .0.join(", "))]
    MissingActionFields(Vec<String>),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ClientError {
    /// Whether the failure happened before a JSON reply was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. }
                | Self::UnexpectedStatus { .. }
                | Self::MalformedBody { .. }
                | Self::InvalidUrl { .. }
        )
    }

    /// The violation, if the server replied outside the protocol.
    pub fn protocol_violation(&self) -> Option<&ProtocolViolation> {
        match self {
            Self::ProtocolViolation { source, .. } => Some(source),
            _ => None,
        }
    }
}
