//! # Transaction Approval
//!
//! Submits a candidate transaction to a regulated asset's approval server:
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | POST | `{approval_server}` | form field `tx` = base64 transaction envelope |
//!
//! The reply is decoded into an [`ApprovalOutcome`]. One request per call; no
//! retry. `Pending` timeouts are returned to the caller, never slept on.

use regasset_core::{ApprovalOutcome, RegulatedAsset};
use reqwest::header::{HeaderValue, ACCEPT};

use crate::error::ClientError;
use crate::http;

/// Client for approval servers.
#[derive(Debug, Clone)]
pub struct ApprovalClient {
    http: reqwest::Client,
}

impl ApprovalClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Submit a transaction envelope to the asset's approval server.
    pub async fn submit(
        &self,
        asset: &RegulatedAsset,
        tx_envelope_b64: &str,
    ) -> Result<ApprovalOutcome, ClientError> {
        tracing::debug!(asset = %asset, "submitting transaction for approval");
        self.submit_to(asset.approval_server(), tx_envelope_b64).await
    }

    /// Submit a transaction envelope to an explicit approval endpoint.
    pub async fn submit_to(
        &self,
        approval_server: &str,
        tx_envelope_b64: &str,
    ) -> Result<ApprovalOutcome, ClientError> {
        let url = http::parse_url(approval_server)?;
        let endpoint = format!("POST {approval_server}");
        let request = http::with_form(
            self.http
                .post(url)
                .header(ACCEPT, HeaderValue::from_static("application/json")),
            [("tx", tx_envelope_b64)],
        );

        let resp = http::send(request, &endpoint).await?;
        let status = resp.status().as_u16();
        let payload = http::read_reply(resp, &endpoint).await?;

        match ApprovalOutcome::from_json(&payload) {
            Ok(outcome) => {
                tracing::info!(
                    endpoint = %endpoint,
                    status,
                    outcome = outcome.kind(),
                    "approval server replied"
                );
                Ok(outcome)
            }
            Err(violation) => {
                tracing::warn!(
                    endpoint = %endpoint,
                    status,
                    reason = %violation.reason,
                    "approval server reply violates protocol"
                );
                Err(ClientError::ProtocolViolation {
                    endpoint,
                    source: violation,
                })
            }
        }
    }
}
