use crate::store::KeyValueStore;
use cartbot_core::{CartbotResult, Location};
use std::sync::Arc;
use tracing::warn;

/// Snapshot of one sender's conversation state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Store the sender is currently searching in, set by a `search` postback.
    pub viewing_store_id: Option<String>,
    /// Last location the sender shared.
    pub location: Option<Location>,
    /// Authorization code from the last account-link callback.
    pub auth_token: Option<String>,
}

/// Key holding the sender's last location as JSON.
pub fn location_key(sender_id: &str) -> String {
    format!("location_{sender_id}")
}

/// Key holding the raw id of the store the sender is browsing.
pub fn viewing_store_key(sender_id: &str) -> String {
    format!("viewing_store_{sender_id}")
}

/// Key holding the raw account-link authorization code.
pub fn login_key(sender_id: &str) -> String {
    format!("login_{sender_id}")
}

/// Typed per-sender access over a [`KeyValueStore`].
///
/// Reads never fail: a backend error is logged and reported as "no state",
/// and so is an empty value. Writes return the backend error so the caller
/// can tell the user.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Typed access over `kv`.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Read every field of the sender's session.
    pub async fn load(&self, sender_id: &str) -> Session {
        Session {
            viewing_store_id: self.viewing_store(sender_id).await,
            location: self.location(sender_id).await,
            auth_token: self.auth_token(sender_id).await,
        }
    }

    /// Last shared location. Malformed stored JSON reads as `None`.
    pub async fn location(&self, sender_id: &str) -> Option<Location> {
        let raw = self.read(&location_key(sender_id)).await?;
        match serde_json::from_str(&raw) {
            Ok(location) => Some(location),
            Err(e) => {
                warn!(sender = %sender_id, error = %e, "Ignoring malformed stored location");
                None
            }
        }
    }

    /// Store `location` as JSON.
    pub async fn save_location(&self, sender_id: &str, location: &Location) -> CartbotResult<()> {
        let json = serde_json::to_string(location)?;
        self.kv.set(&location_key(sender_id), &json).await
    }

    /// Store the user picked to search in.
    pub async fn viewing_store(&self, sender_id: &str) -> Option<String> {
        self.read(&viewing_store_key(sender_id)).await
    }

    /// Remember the store to search in.
    pub async fn save_viewing_store(&self, sender_id: &str, store_id: &str) -> CartbotResult<()> {
        self.kv.set(&viewing_store_key(sender_id), store_id).await
    }

    /// Authorization code from account linking.
    pub async fn auth_token(&self, sender_id: &str) -> Option<String> {
        self.read(&login_key(sender_id)).await
    }

    /// Remember the account-link authorization code.
    pub async fn save_auth_token(&self, sender_id: &str, code: &str) -> CartbotResult<()> {
        self.kv.set(&login_key(sender_id), code).await
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.kv.get(key).await {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "Session read failed, treating as unset");
                None
            }
        }
    }
}
