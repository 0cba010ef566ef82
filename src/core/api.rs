//! HTTP routes for the demo pages
//!
//! Endpoints:
//! - GET /                          - Lander (decided logo when a referrer is present)
//! - GET /singlequestionreplacement - Fourth question replaced per experience
//! - GET /removequestion            - Decided question removed from the set
//! - GET /addquestion               - Decided questions appended to the set
//! - GET /magictest                 - Two slots decided in one call
//! - GET /health                    - Health check
//! - /public/*                      - Static assets
//!
//! Every gateway-backed route runs the same per-request flow: read tokens,
//! build the slot request, await the single decisioning call, write the
//! refreshed tokens, render. A gateway failure is terminal: 502, no cookie
//! writes, no partial HTML.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderName, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::core::gateway::{Decisioning, GatewayError};
use crate::core::render;
use crate::core::request::{build_slot_request, caller_address};
use crate::core::session;
use crate::core::view;
use crate::types::DecisionResult;
use crate::{
    ADDITION_SLOT, LANDER_SLOT, MAGIC_CTA_SLOT, MAGIC_HERO_SLOT, REMOVAL_SLOT, REPLACEMENT_SLOT,
    VERSION,
};

/// Served on any terminal route failure instead of partial page output
const ERROR_PAGE: &str = include_str!("../../templates/error.html");

/// App state shared by every route
pub struct AppState {
    pub gateway: Arc<dyn Decisioning>,
    pub organization_id: String,
    pub templates: Environment<'static>,
    pub public_dir: String,
    /// Show the raw-response panel on the questions pages
    pub debug: bool,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn Decisioning>,
        organization_id: impl Into<String>,
        public_dir: impl Into<String>,
        debug: bool,
    ) -> Result<Self, minijinja::Error> {
        Ok(Self {
            gateway,
            organization_id: organization_id.into(),
            templates: render::template_env()?,
            public_dir: public_dir.into(),
            debug,
        })
    }
}

/// Route failures map to deterministic error responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("decisioning gateway failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("render failed: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("{self}");
        (status, Html(ERROR_PAGE)).into_response()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Lander query parameters
#[derive(Debug, Deserialize)]
pub struct LanderParams {
    pub referrer: Option<String>,
}

/// Create the demo router
pub fn create_router(state: Arc<AppState>) -> Router {
    let public_dir = state.public_dir.clone();

    Router::new()
        .route("/", get(lander))
        .route("/singlequestionreplacement", get(replacement))
        .route("/removequestion", get(removal))
        .route("/addquestion", get(addition))
        .route("/magictest", get(magic))
        .route("/health", get(health))
        .nest_service("/public", ServeDir::new(public_dir))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}

/// Lander: without a referrer there is nothing to personalize, so no
/// decisioning call is made and no cookies are touched
async fn lander(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LanderParams>,
    headers: HeaderMap,
    uri: Uri,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if params.referrer.is_none() {
        let html = render::render(&state.templates, "lander", &view::lander_view(None, LANDER_SLOT))?;
        return Ok((expires_now(), Html(html)).into_response());
    }

    let result = decide(&state, &jar, "lander", &headers, &uri, &[LANDER_SLOT]).await?;
    let jar = session::write_tokens(jar, &result.tokens, &state.organization_id);

    let html = render::render(
        &state.templates,
        "lander",
        &view::lander_view(Some(&result), LANDER_SLOT),
    )?;
    Ok((jar, expires_now(), Html(html)).into_response())
}

/// Fourth question replaced for visitors in a variant experience
async fn replacement(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let result = decide(
        &state,
        &jar,
        "singlequestionreplacement",
        &headers,
        &uri,
        &[REPLACEMENT_SLOT],
    )
    .await?;
    let jar = session::write_tokens(jar, &result.tokens, &state.organization_id);

    let mut questions = view::replacement_view(&result, REPLACEMENT_SLOT);
    questions.debug = state.debug;
    let html = render::render(&state.templates, "questions", &questions)?;
    Ok((jar, expires_now(), Html(html)).into_response())
}

/// The decided question is dropped from the set
async fn removal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let result = decide(&state, &jar, "removequestion", &headers, &uri, &[REMOVAL_SLOT]).await?;
    let jar = session::write_tokens(jar, &result.tokens, &state.organization_id);

    let mut questions = view::removal_view(&result, REMOVAL_SLOT);
    questions.debug = state.debug;
    let html = render::render(&state.templates, "questions", &questions)?;
    Ok((jar, expires_now(), Html(html)).into_response())
}

/// Decided questions are appended to the set
async fn addition(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let result = decide(&state, &jar, "addquestion", &headers, &uri, &[ADDITION_SLOT]).await?;
    let jar = session::write_tokens(jar, &result.tokens, &state.organization_id);

    let mut questions = view::addition_view(&result, ADDITION_SLOT);
    questions.debug = state.debug;
    let html = render::render(&state.templates, "questions", &questions)?;
    Ok((jar, expires_now(), Html(html)).into_response())
}

/// Two slots decided in a single call
async fn magic(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let result = decide(
        &state,
        &jar,
        "magictest",
        &headers,
        &uri,
        &[MAGIC_HERO_SLOT, MAGIC_CTA_SLOT],
    )
    .await?;
    let jar = session::write_tokens(jar, &result.tokens, &state.organization_id);

    let html = render::render(
        &state.templates,
        "magic",
        &view::magic_view(&result, MAGIC_HERO_SLOT, MAGIC_CTA_SLOT),
    )?;
    Ok((jar, expires_now(), Html(html)).into_response())
}

/// The one decisioning call a route makes: read tokens, build the slot
/// request, await the gateway
async fn decide(
    state: &AppState,
    jar: &CookieJar,
    route: &str,
    headers: &HeaderMap,
    uri: &Uri,
    slots: &[&str],
) -> Result<DecisionResult, GatewayError> {
    let tokens = session::read_tokens(jar, &state.organization_id);

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let request = build_slot_request(route, &caller_address(host, path_and_query), slots);

    state.gateway.get_offers(&request, &tokens).await
}

/// Expires: now - these pages must never be cached
fn expires_now() -> [(HeaderName, String); 1] {
    [(
        header::EXPIRES,
        Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
    )]
}

/// Run the demo server
pub async fn run_server(
    addr: &str,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("lockstep serving on {addr}");
    println!("  GET /                          - lander");
    println!("  GET /singlequestionreplacement - question replacement");
    println!("  GET /removequestion            - question removal");
    println!("  GET /addquestion               - question addition");
    println!("  GET /magictest                 - multi-slot magic test");
    println!("  GET /health                    - health check");
    axum::serve(listener, router).await?;
    Ok(())
}
