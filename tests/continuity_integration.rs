//! Integration tests for session continuity
//!
//! The one invariant that matters: tokens the gateway returns reach the
//! response as cookies, tokens the request carries reach the gateway, and a
//! failed call touches neither.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;

use lockstep::core::{create_router, AppState, Decisioning, GatewayError};
use lockstep::types::{DecisionResult, SessionTokens, SlotRequest, TokenCookie};

const ORG: &str = "5D60123F5245B13E0A490D45@AdobeOrg";

struct ScriptedGateway {
    result: Option<DecisionResult>,
    calls: AtomicUsize,
    seen_tokens: Mutex<Option<SessionTokens>>,
}

impl ScriptedGateway {
    fn returning(result: DecisionResult) -> Arc<Self> {
        Arc::new(Self {
            result: Some(result),
            calls: AtomicUsize::new(0),
            seen_tokens: Mutex::new(None),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: None,
            calls: AtomicUsize::new(0),
            seen_tokens: Mutex::new(None),
        })
    }
}

#[async_trait]
impl Decisioning for ScriptedGateway {
    async fn get_offers(
        &self,
        _request: &SlotRequest,
        tokens: &SessionTokens,
    ) -> Result<DecisionResult, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_tokens.lock().unwrap() = Some(tokens.clone());
        match &self.result {
            Some(result) => Ok(result.clone()),
            None => Err(GatewayError::Timeout),
        }
    }
}

fn test_router(gateway: Arc<ScriptedGateway>) -> Router {
    let state = AppState::new(gateway, ORG, "./public", false).expect("state builds");
    create_router(Arc::new(state))
}

fn refreshed_result() -> DecisionResult {
    let mut result = DecisionResult::default();
    result.tokens.session = Some(TokenCookie::new("sess-token-1", 1860));
    result.tokens.location_hint = Some(TokenCookie::new("35", 1860));
    result.raw = json!({ "status": 200 });
    result
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_refreshed_tokens_are_written_back() {
    let gateway = ScriptedGateway::returning(refreshed_result());
    let app = test_router(gateway);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/magictest")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("mbox=sess-token-1") && c.contains("Max-Age=1860")));
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("mboxEdgeCluster=35") && c.contains("Max-Age=1860")));
}

#[tokio::test]
async fn test_incoming_tokens_reach_the_gateway() {
    let gateway = ScriptedGateway::returning(refreshed_result());
    let app = test_router(gateway.clone());

    let cookie_header = format!(
        "mbox=prior-session; mboxEdgeCluster=28; AMCV_{}=visitor-blob",
        ORG.replace('@', "%40")
    );
    app.oneshot(
        Request::builder()
            .uri("/singlequestionreplacement")
            .header(header::COOKIE, cookie_header)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let seen = gateway
        .seen_tokens
        .lock()
        .unwrap()
        .clone()
        .expect("gateway saw tokens");
    assert_eq!(seen.session.as_deref(), Some("prior-session"));
    assert_eq!(seen.location_hint.as_deref(), Some("28"));
    assert_eq!(seen.visitor.as_deref(), Some("visitor-blob"));
}

#[tokio::test]
async fn test_gateway_failure_is_a_deterministic_502() {
    let gateway = ScriptedGateway::failing();
    let app = test_router(gateway.clone());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/singlequestionreplacement")
                .header(header::COOKIE, "mbox=prior-session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);

    // No cookie writes: the request's tokens are left exactly as they were
    assert!(set_cookies(&response).is_empty());

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("unavailable"));
    assert!(!body.contains("question"));
}

#[tokio::test]
async fn test_every_gateway_route_guards_failures_uniformly() {
    for path in [
        "/?referrer=x",
        "/singlequestionreplacement",
        "/removequestion",
        "/addquestion",
        "/magictest",
    ] {
        let app = test_router(ScriptedGateway::failing());
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_GATEWAY,
            "route {path} must map gateway failure to 502"
        );
        assert!(set_cookies(&response).is_empty(), "route {path} wrote cookies");
    }
}

#[tokio::test]
async fn test_absent_tokens_write_no_cookies() {
    let gateway = ScriptedGateway::returning(DecisionResult::default());
    let app = test_router(gateway);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/removequestion")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
}
