//! Contract tests for ActionClient against a mock action endpoint.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/action` | `get_*` |
//! | POST   | `/action` | `post_*` |

use regasset_client::{ActionClient, ClientError};
use regasset_core::{ActionOutcome, ActionRequest, ApprovalOutcome};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> ActionClient {
    ActionClient::new(reqwest::Client::new())
}

fn action_url(server: &MockServer) -> String {
    format!("{}/action", server.uri())
}

// ── POST ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn post_sends_form_fields_and_returns_done() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/action"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("email_address=jane%40example.com&mobile_number=%2B15551234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "no_further_action_required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client()
        .submit(
            &action_url(&server),
            "POST",
            &[("email_address", "jane@example.com"), ("mobile_number", "+15551234")],
        )
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Done);
}

#[tokio::test]
async fn post_follow_next_url_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "follow_next_url",
            "next_url": "https://x/step2",
            "message": "Please upload your documents"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client()
        .submit(&action_url(&server), "post", &[("email_address", "a@b.c")])
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::NextUrl {
            url: "https://x/step2".into(),
            message: Some("Please upload your documents".into())
        }
    );
}

// ── GET ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_sends_fields_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/action"))
        .and(query_param("email_address", "jane@example.com"))
        .and(query_param("first_name", "Jane"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "follow_next_url",
            "next_url": "https://x/step2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client()
        .submit(
            &action_url(&server),
            "GET",
            &[("email_address", "jane@example.com"), ("first_name", "Jane")],
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::NextUrl {
            url: "https://x/step2".into(),
            message: None
        }
    );
}

#[tokio::test]
async fn get_reply_under_400_is_an_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/action"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "result": "follow_next_url",
            "next_url": "https://x/retry"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client().submit(&action_url(&server), "GET", &[]).await.unwrap();
    assert!(matches!(outcome, ActionOutcome::NextUrl { url, .. } if url == "https://x/retry"));
}

// ── Violations and failures ──────────────────────────────────────────

#[tokio::test]
async fn unknown_result_is_violation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "all_good"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client()
        .submit(&action_url(&server), "POST", &[])
        .await
        .unwrap_err();
    let violation = err.protocol_violation().expect("protocol violation");
    assert!(violation.raw_payload.contains("all_good"));
}

#[tokio::test]
async fn follow_next_url_without_url_is_violation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "follow_next_url"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client()
        .submit(&action_url(&server), "POST", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ProtocolViolation { .. }));
}

#[tokio::test]
async fn server_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/action"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client()
        .submit(&action_url(&server), "POST", &[])
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn unsupported_method_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client()
        .submit(&action_url(&server), "PUT", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::UnsupportedActionMethod(m) if m == "PUT"));
}

#[tokio::test]
async fn invalid_url_is_transport_for_both_methods() {
    for method in ["GET", "POST"] {
        let err = client()
            .submit("not a url", method, &[("email_address", "a@b.c")])
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }), "{method}: {err:?}");
        assert!(err.is_transport());
    }
}

// ── ActionRequest ────────────────────────────────────────────────────

#[tokio::test]
async fn incomplete_request_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = ApprovalOutcome::ActionRequired {
        message: "KYC".into(),
        action_url: action_url(&server),
        action_method: "POST".into(),
        action_fields: Some(vec!["email_address".into(), "mobile_number".into()]),
    };
    let request = ActionRequest::from_outcome(&outcome)
        .unwrap()
        .with_field("email_address", "a@b.c")
        .unwrap();

    let err = client().submit_request(&request).await.unwrap_err();
    match err {
        ClientError::MissingActionFields(fields) => assert_eq!(fields, vec!["mobile_number"]),
        other => panic!("expected MissingActionFields, got: {other:?}"),
    }
}

#[tokio::test]
async fn complete_request_is_submitted_in_declared_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/action"))
        .and(body_string("email_address=a%40b.c&mobile_number=555"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "no_further_action_required"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = ApprovalOutcome::ActionRequired {
        message: "KYC".into(),
        action_url: action_url(&server),
        action_method: "POST".into(),
        action_fields: Some(vec!["email_address".into(), "mobile_number".into()]),
    };
    let request = ActionRequest::from_outcome(&outcome)
        .unwrap()
        .with_field("mobile_number", "555")
        .unwrap()
        .with_field("email_address", "a@b.c")
        .unwrap();

    assert_eq!(
        client().submit_request(&request).await.unwrap(),
        ActionOutcome::Done
    );
}
