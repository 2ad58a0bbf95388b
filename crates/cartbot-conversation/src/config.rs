use serde::{Deserialize, Serialize};

/// Settings for reply composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Page opened by the account-link button.
    #[serde(default = "default_login_url")]
    pub login_url: String,
    /// Prefix joined with a product's image basename.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

fn default_login_url() -> String {
    "https://tranquil-anglerfish.glitch.me/login".to_string()
}

fn default_image_base_url() -> String {
    "https://assets.honestbee.com/products/images/480/".to_string()
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: ConversationConfig = serde_json::from_str("{}").unwrap();
        assert!(config.login_url.ends_with("/login"));
        assert!(config.image_base_url.ends_with('/'));
    }
}
