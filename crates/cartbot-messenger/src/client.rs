use crate::config::MessengerConfig;
use crate::dispatcher::Dispatcher;
use crate::outbound::{OutboundMessage, Recipient, SendRequest, SenderAction};
use async_trait::async_trait;
use cartbot_core::{CartbotError, CartbotResult};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Messenger Send API client.
pub struct MessengerClient {
    config: MessengerConfig,
    http: reqwest::Client,
}

// ── Send API response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    code: i64,
    #[serde(default)]
    error_subcode: Option<i64>,
    #[serde(default)]
    fbtrace_id: Option<String>,
}

// ── Implementation ──────────────────────────────────────────────────────────

impl MessengerClient {
    /// Build a client with a 30 second request timeout.
    pub fn new(config: MessengerConfig) -> CartbotResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CartbotError::Http(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Settings this client was built with.
    pub fn config(&self) -> &MessengerConfig {
        &self.config
    }

    async fn post(&self, request: &SendRequest<'_>) -> CartbotResult<()> {
        let response = self
            .http
            .post(self.config.messages_url())
            .query(&[("access_token", &self.config.page_access_token)])
            .json(request)
            .send()
            .await
            .map_err(|e| CartbotError::Messenger(format!("Send API request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CartbotError::Messenger(format!("Send API response unreadable: {e}")))?;

        // The platform reports failures in an `error` object, sometimes with a 200.
        if let Ok(SendResponse { error: Some(err) }) = serde_json::from_str(&body) {
            debug!(
                kind = %err.kind,
                code = err.code,
                subcode = ?err.error_subcode,
                trace = ?err.fbtrace_id,
                "Send API returned an error object"
            );
            return Err(CartbotError::Messenger(format!(
                "Facebook error: {}",
                err.message
            )));
        }

        if !status.is_success() {
            return Err(CartbotError::Messenger(format!(
                "Send API returned {status}: {body}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Dispatcher for MessengerClient {
    async fn send_action(&self, recipient_id: &str, action: SenderAction) -> CartbotResult<()> {
        self.post(&SendRequest {
            recipient: Recipient { id: recipient_id },
            message: None,
            sender_action: Some(action),
        })
        .await
    }

    async fn send_message(&self, recipient_id: &str, message: &OutboundMessage) -> CartbotResult<()> {
        self.post(&SendRequest {
            recipient: Recipient { id: recipient_id },
            message: Some(message),
            sender_action: None,
        })
        .await
    }
}
