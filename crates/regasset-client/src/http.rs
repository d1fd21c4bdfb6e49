//! Request and reply plumbing shared by the approval and action clients.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::error::ClientError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Parse an endpoint URL taken from an asset record or a server reply.
pub(crate) fn parse_url(raw: &str) -> Result<url::Url, ClientError> {
    url::Url::parse(raw).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        source: e,
    })
}

/// Attach a form-encoded body to a request.
pub(crate) fn with_form<'a>(
    request: reqwest::RequestBuilder,
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> reqwest::RequestBuilder {
    let mut form = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        form.append_pair(name, value);
    }
    request
        .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
        .body(form.finish())
}

/// Send a request, mapping connection failures to [`ClientError::Http`].
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    endpoint: &str,
) -> Result<reqwest::Response, ClientError> {
    request.send().await.map_err(|e| ClientError::Http {
        endpoint: endpoint.into(),
        source: e,
    })
}

/// Read a protocol reply as JSON.
///
/// 2xx and 400 both carry protocol replies (servers answer `rejected` and
/// `action_required` with 400). Any other status is a transport failure.
pub(crate) async fn read_reply(
    resp: reqwest::Response,
    endpoint: &str,
) -> Result<serde_json::Value, ClientError> {
    let status = resp.status();
    if !(status.is_success() || status == StatusCode::BAD_REQUEST) {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
        return Err(ClientError::UnexpectedStatus {
            endpoint: endpoint.into(),
            status: status.as_u16(),
            body,
        });
    }

    let body = resp.text().await.map_err(|e| ClientError::Http {
        endpoint: endpoint.into(),
        source: e,
    })?;
    serde_json::from_str(&body).map_err(|e| ClientError::MalformedBody {
        endpoint: endpoint.into(),
        body,
        source: e,
    })
}
