//! Decisioning gateway: the opaque external service behind one async call
//!
//! The assignment algorithm (traffic splitting, audience targeting) lives
//! entirely on the service side. This client ships the continuity tokens,
//! names the slots, and validates the response shape exactly once so the
//! rest of the crate works with present-or-absent fields instead of raw
//! JSON chains.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::types::{
    DecisionResult, RefreshedTokens, SessionTokens, SlotDecision, SlotRequest, TokenCookie,
};
use crate::{LOCATION_HINT_MAX_AGE_SECS, SESSION_MAX_AGE_SECS};

/// Gateway failures are terminal for the request; nothing retries
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("decisioning call timed out")]
    Timeout,

    #[error("decisioning call failed: {0}")]
    Http(String),

    #[error("malformed decisioning response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Http(err.to_string())
        }
    }
}

/// One asynchronous operation: decide content for the named slots
#[async_trait]
pub trait Decisioning: Send + Sync {
    async fn get_offers(
        &self,
        request: &SlotRequest,
        tokens: &SessionTokens,
    ) -> Result<DecisionResult, GatewayError>;
}

/// REST client for the hosted delivery endpoint
pub struct DeliveryClient {
    client: Client,
    client_code: String,
}

impl DeliveryClient {
    /// Build a client with the configured per-call timeout
    pub fn new(client_code: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            client_code: client_code.into(),
        })
    }

    /// Delivery endpoint; routed to the visitor's edge cluster when the
    /// location-hint token names one
    fn endpoint(&self, location_hint: Option<&str>) -> String {
        match location_hint {
            Some(hint) => format!("https://mboxedge{hint}.tt.omtrdc.net/rest/v1/delivery"),
            None => format!("https://{}.tt.omtrdc.net/rest/v1/delivery", self.client_code),
        }
    }

    fn build_payload(request: &SlotRequest, tokens: &SessionTokens) -> Value {
        let mboxes: Vec<Value> = request
            .slots
            .iter()
            .map(|slot| {
                json!({
                    "index": slot.index,
                    "name": slot.name,
                    "address": { "url": slot.address },
                    "profileParameters": slot.profile,
                })
            })
            .collect();

        let mut id = Map::new();
        if let Some(visitor) = &tokens.visitor {
            id.insert(
                "marketingCloudVisitorId".to_string(),
                Value::String(visitor.clone()),
            );
        }

        json!({
            "context": {
                "channel": "web",
                "address": { "url": request.slots.first().map(|s| s.address.as_str()).unwrap_or("") },
            },
            "id": id,
            "execute": { "mboxes": mboxes },
        })
    }
}

#[async_trait]
impl Decisioning for DeliveryClient {
    async fn get_offers(
        &self,
        request: &SlotRequest,
        tokens: &SessionTokens,
    ) -> Result<DecisionResult, GatewayError> {
        // Reuse the visitor's session id verbatim; mint one on first contact
        // so continuity bootstraps when the echoed token is written back.
        let session_id = tokens
            .session
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let url = self.endpoint(tokens.location_hint.as_deref());
        debug!(route = %request.route, slots = ?request.slot_names(), %url, "decisioning call");

        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", self.client_code.as_str()),
                ("sessionId", session_id.as_str()),
            ])
            .json(&Self::build_payload(request, tokens))
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        Ok(parse_delivery_response(request, &session_id, body))
    }
}

/// Map a raw delivery response onto the validated result type
///
/// Lenient by contract: a slot the response does not answer, or answers
/// without content or labels, surfaces as absent rather than as an error.
pub fn parse_delivery_response(
    request: &SlotRequest,
    session_id: &str,
    body: Value,
) -> DecisionResult {
    let mut result = DecisionResult {
        tokens: RefreshedTokens {
            visitor: None,
            session: Some(TokenCookie::new(session_id, SESSION_MAX_AGE_SECS)),
            location_hint: edge_cluster(&body)
                .map(|hint| TokenCookie::new(hint, LOCATION_HINT_MAX_AGE_SECS)),
        },
        ..Default::default()
    };

    let answered = body
        .pointer("/execute/mboxes")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    for slot in &request.slots {
        let Some(mbox) = answered
            .iter()
            .find(|m| m.get("name").and_then(Value::as_str) == Some(slot.name.as_str()))
        else {
            continue;
        };

        let option = mbox.pointer("/options/0");
        result.slots.insert(
            slot.name.clone(),
            SlotDecision {
                content: option.and_then(|o| o.get("content")).cloned(),
                experience: response_token(option, "experience.name"),
                activity: response_token(option, "activity.name"),
            },
        );
    }

    result.raw = body;
    result
}

/// Edge-cluster hint from the response's `edgeHost`, e.g.
/// `mboxedge35.tt.omtrdc.net` names cluster `35`
fn edge_cluster(body: &Value) -> Option<String> {
    let host = body.get("edgeHost").and_then(Value::as_str)?;
    let cluster = host.strip_prefix("mboxedge")?.strip_suffix(".tt.omtrdc.net")?;
    (!cluster.is_empty()).then(|| cluster.to_string())
}

fn response_token(option: Option<&Value>, key: &str) -> Option<String> {
    option?
        .pointer(&format!("/responseTokens/{key}"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
