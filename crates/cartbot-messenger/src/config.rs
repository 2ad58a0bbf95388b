use serde::{Deserialize, Serialize};

/// Messenger page credentials and delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessengerConfig {
    /// Page access token used on every Send API call.
    #[serde(default)]
    pub page_access_token: String,
    /// Token the platform echoes back when verifying the webhook.
    #[serde(default)]
    pub verify_token: String,
    /// App secret for `X-Hub-Signature-256` validation. Unset disables the check.
    #[serde(default)]
    pub app_secret: Option<String>,
    /// Graph API root, e.g. `https://graph.facebook.com/v2.6`.
    #[serde(default = "default_graph_api_url")]
    pub graph_api_url: String,
    /// Minimum gap between the typing indicator and the reply.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
}

fn default_graph_api_url() -> String {
    "https://graph.facebook.com/v2.6".to_string()
}

fn default_typing_delay_ms() -> u64 {
    2000
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            page_access_token: String::new(),
            verify_token: String::new(),
            app_secret: None,
            graph_api_url: default_graph_api_url(),
            typing_delay_ms: default_typing_delay_ms(),
        }
    }
}

impl MessengerConfig {
    /// Send API endpoint for this page.
    pub fn messages_url(&self) -> String {
        format!("{}/me/messages", self.graph_api_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: MessengerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.typing_delay_ms, 2000);
        assert!(config.app_secret.is_none());
        assert_eq!(
            config.messages_url(),
            "https://graph.facebook.com/v2.6/me/messages"
        );
    }

    #[test]
    fn test_messages_url_trailing_slash() {
        let config = MessengerConfig {
            graph_api_url: "http://localhost:9000/".into(),
            ..MessengerConfig::default()
        };
        assert_eq!(config.messages_url(), "http://localhost:9000/me/messages");
    }
}
