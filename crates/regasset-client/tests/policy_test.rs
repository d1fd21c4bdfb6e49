//! Tests for AuthorizationPolicyChecker with an in-memory flags source and
//! with HorizonFlagsSource against a mock ledger API.

use async_trait::async_trait;
use regasset_client::{
    AccountFlagsSource, AuthorizationPolicyChecker, FlagsLookupError, HorizonFlagsSource,
};
use regasset_core::{AccountFlags, AccountId, RegulatedAsset};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUER: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

fn asset() -> RegulatedAsset {
    RegulatedAsset::new(
        "REG",
        AccountId::parse(ISSUER).unwrap(),
        "https://x/tx-approve",
        None,
    )
    .unwrap()
}

struct FixedFlags(Result<AccountFlags, FlagsLookupError>);

#[async_trait]
impl AccountFlagsSource for FixedFlags {
    async fn account_flags(&self, _account: &AccountId) -> Result<AccountFlags, FlagsLookupError> {
        self.0.clone()
    }
}

fn flags(required: bool, revocable: bool) -> AccountFlags {
    AccountFlags {
        auth_required: required,
        auth_revocable: revocable,
        auth_immutable: false,
        auth_clawback_enabled: false,
    }
}

// ── Decision table ───────────────────────────────────────────────────

#[tokio::test]
async fn approval_required_only_when_both_flags_set() {
    let table = [
        (false, false, false),
        (true, false, false),
        (false, true, false),
        (true, true, true),
    ];
    for (required, revocable, expected) in table {
        let checker = AuthorizationPolicyChecker::new(FixedFlags(Ok(flags(required, revocable))));
        assert_eq!(
            checker.requires_approval(&asset()).await.unwrap(),
            expected,
            "auth_required={required} auth_revocable={revocable}"
        );
    }
}

#[tokio::test]
async fn lookup_failures_are_not_coerced_to_false() {
    let not_found = FlagsLookupError::NotFound {
        account: ISSUER.into(),
    };
    let checker = AuthorizationPolicyChecker::new(FixedFlags(Err(not_found.clone())));
    let err = checker.requires_approval(&asset()).await.unwrap_err();
    assert_eq!(err.issuer.as_str(), ISSUER);
    assert_eq!(err.cause, not_found);

    let transport = FlagsLookupError::Transport {
        account: ISSUER.into(),
        reason: "connection reset".into(),
    };
    let checker = AuthorizationPolicyChecker::new(FixedFlags(Err(transport.clone())));
    assert_eq!(
        checker.requires_approval(&asset()).await.unwrap_err().cause,
        transport
    );
}

#[tokio::test]
async fn shared_source_behind_arc() {
    let source: std::sync::Arc<dyn AccountFlagsSource> =
        std::sync::Arc::new(FixedFlags(Ok(flags(true, true))));
    let checker = AuthorizationPolicyChecker::new(source);
    assert!(checker.requires_approval(&asset()).await.unwrap());
}

// ── HorizonFlagsSource ───────────────────────────────────────────────

fn horizon(server: &MockServer) -> AuthorizationPolicyChecker<HorizonFlagsSource> {
    AuthorizationPolicyChecker::new(HorizonFlagsSource::new(
        reqwest::Client::new(),
        server.uri().parse().unwrap(),
    ))
}

#[tokio::test]
async fn horizon_reads_account_flags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ISSUER}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": ISSUER,
            "account_id": ISSUER,
            "sequence": "1",
            "flags": {
                "auth_required": true,
                "auth_revocable": true,
                "auth_immutable": false,
                "auth_clawback_enabled": false
            },
            "balances": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(horizon(&server).requires_approval(&asset()).await.unwrap());
}

#[tokio::test]
async fn horizon_auth_required_alone_is_not_enough() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ISSUER}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "flags": {
                "auth_required": true,
                "auth_revocable": false,
                "auth_immutable": true,
                "auth_clawback_enabled": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!horizon(&server).requires_approval(&asset()).await.unwrap());
}

#[tokio::test]
async fn horizon_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ISSUER}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "status": 404,
            "title": "Resource Missing"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = horizon(&server).requires_approval(&asset()).await.unwrap_err();
    assert!(matches!(err.cause, FlagsLookupError::NotFound { .. }));
}

#[tokio::test]
async fn horizon_server_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ISSUER}")))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = horizon(&server).requires_approval(&asset()).await.unwrap_err();
    match err.cause {
        FlagsLookupError::Transport { reason, .. } => assert!(reason.contains("503")),
        other => panic!("expected Transport, got: {other:?}"),
    }
}

#[tokio::test]
async fn horizon_record_without_flags_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{ISSUER}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": ISSUER
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = horizon(&server).requires_approval(&asset()).await.unwrap_err();
    assert!(matches!(err.cause, FlagsLookupError::Transport { .. }));
}
