//! # Follow-up Actions
//!
//! When the approval server answers `action_required`, the user's data is
//! sent to the named action endpoint:
//!
//! | `action_method` | Request |
//! |-----------------|---------|
//! | `GET` | fields as URL query parameters |
//! | `POST` | fields as a form-encoded body |
//!
//! The reply is decoded into an [`ActionOutcome`]. The transport rules match
//! the approval call: 2xx and 400 carry replies, anything else is a transport
//! failure.

use regasset_core::{ActionOutcome, ActionRequest};
use reqwest::header::{HeaderValue, ACCEPT};

use crate::error::ClientError;
use crate::http;

/// HTTP method named by `action_method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMethod {
    Get,
    Post,
}

impl ActionMethod {
    /// Parse a method name, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        if raw.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if raw.eq_ignore_ascii_case("POST") {
            Ok(Self::Post)
        } else {
            Err(ClientError::UnsupportedActionMethod(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Client for action endpoints.
#[derive(Debug, Clone)]
pub struct ActionClient {
    http: reqwest::Client,
}

impl ActionClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Send `fields` to `action_url` using `action_method`.
    pub async fn submit(
        &self,
        action_url: &str,
        action_method: &str,
        fields: &[(&str, &str)],
    ) -> Result<ActionOutcome, ClientError> {
        let method = ActionMethod::parse(action_method)?;
        let endpoint = format!("{} {action_url}", method.as_str());

        let mut url = http::parse_url(action_url)?;

        let request = match method {
            ActionMethod::Get => {
                if !fields.is_empty() {
                    url.query_pairs_mut().extend_pairs(fields.iter());
                }
                self.http.get(url)
            }
            ActionMethod::Post => http::with_form(self.http.post(url), fields.iter().copied()),
        }
        .header(ACCEPT, HeaderValue::from_static("application/json"));

        tracing::debug!(endpoint = %endpoint, fields = fields.len(), "submitting action");
        let resp = http::send(request, &endpoint).await?;
        let status = resp.status().as_u16();
        let payload = http::read_reply(resp, &endpoint).await?;

        match ActionOutcome::from_json(&payload) {
            Ok(outcome) => {
                tracing::info!(
                    endpoint = %endpoint,
                    status,
                    outcome = outcome.kind(),
                    "action endpoint replied"
                );
                Ok(outcome)
            }
            Err(violation) => {
                tracing::warn!(
                    endpoint = %endpoint,
                    status,
                    reason = %violation.reason,
                    "action endpoint reply violates protocol"
                );
                Err(ClientError::ProtocolViolation {
                    endpoint,
                    source: violation,
                })
            }
        }
    }

    /// Submit a completed [`ActionRequest`].
    ///
    /// Refuses, without sending anything, when a declared field has no value.
    pub async fn submit_request(&self, request: &ActionRequest) -> Result<ActionOutcome, ClientError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::MissingActionFields(
                missing.into_iter().map(str::to_string).collect(),
            ));
        }
        self.submit(request.action_url(), request.action_method(), &request.fields())
            .await
    }
}
