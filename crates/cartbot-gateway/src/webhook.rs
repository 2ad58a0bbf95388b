use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
};
use cartbot_conversation::EventProcessor;
use cartbot_messenger::Callback;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, info, warn};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying `sha256=<hex HMAC of the body>`.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Shared state for the webhook handlers.
pub struct WebhookState {
    /// Token the platform must echo during verification.
    pub verify_token: String,
    /// When set, every POST must carry a valid body signature.
    pub app_secret: Option<String>,
    /// Handles each accepted event on its own task.
    pub processor: Arc<EventProcessor>,
}

/// Query parameters of the verification handshake.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyParams {
    /// `hub.mode`, `"subscribe"` on a real handshake.
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// `hub.verify_token`, compared with the configured token.
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// `hub.challenge`, echoed back on success.
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Validate that a request secret matches the configured secret using constant-time comparison.
pub fn validate_secret(config_secret: &str, request_secret: &str) -> bool {
    let a = config_secret.as_bytes();
    let b = request_secret.as_bytes();

    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Check an `X-Hub-Signature-256` header value against the body.
pub fn verify_signature(app_secret: &str, body: &[u8], header: Option<&str>) -> bool {
    let Some(signature) = header.and_then(|h| h.strip_prefix("sha256=")) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(app_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());
    validate_secret(&expected, &signature.to_ascii_lowercase())
}

/// Axum handler for the verification handshake.
///
/// Route: `GET /webhook`
pub async fn verify_handler(
    State(state): State<Arc<WebhookState>>,
    Query(params): Query<VerifyParams>,
) -> (StatusCode, String) {
    let token = params.verify_token.as_deref().unwrap_or_default();
    if !state.verify_token.is_empty() && validate_secret(&state.verify_token, token) {
        info!(mode = ?params.mode, "Webhook verified");
        return (StatusCode::OK, params.challenge.unwrap_or_default());
    }
    warn!("Webhook verification failed");
    (
        StatusCode::NOT_FOUND,
        "Error, wrong validation token".to_string(),
    )
}

/// Axum handler for event batches.
///
/// Route: `POST /webhook`
///
/// Checks the signature if an app secret is configured, then spawns one task
/// per event and answers immediately. Replies are delivered from those tasks.
pub async fn receive_handler(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    if let Some(ref secret) = state.app_secret {
        let header = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
        if !verify_signature(secret, &body, header) {
            warn!("Webhook signature validation failed");
            return (StatusCode::UNAUTHORIZED, "Invalid signature".to_string());
        }
    }

    let callback: Callback = match serde_json::from_slice(&body) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Malformed webhook body");
            return (StatusCode::BAD_REQUEST, "Malformed request body".to_string());
        }
    };

    if !callback.is_page() {
        debug!(object = %callback.object, "Ignoring non-page callback");
        return (StatusCode::NOT_FOUND, "Message not supported".to_string());
    }

    let events = callback.into_events();
    debug!(count = events.len(), "Webhook batch accepted");
    for event in events {
        let processor = state.processor.clone();
        tokio::spawn(async move {
            processor.process(event).await;
        });
    }

    (StatusCode::OK, "EVENT_RECEIVED".to_string())
}
