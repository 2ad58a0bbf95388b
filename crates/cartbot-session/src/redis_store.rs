use crate::store::KeyValueStore;
use async_trait::async_trait;
use cartbot_core::{CartbotError, CartbotResult};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Bound on connecting and on each command round trip.
const REDIS_TIMEOUT: Duration = Duration::from_secs(10);

/// Redis-backed store. Keys are plain strings with no expiry, so state
/// survives restarts and is shared by every process using the same server.
///
/// The connection manager reconnects on its own after a dropped link;
/// clones share one multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to `url`, e.g. `redis://:password@host:6379/0`.
    pub async fn connect(url: &str) -> CartbotResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CartbotError::Session(format!("Invalid Redis URL: {e}")))?;
        let addr = client.get_connection_info().addr.to_string();
        let conn = bounded(client.get_connection_manager(), "connect").await?;
        info!(addr = %addr, "Connected to Redis");
        Ok(Self { conn })
    }
}

async fn bounded<T, F>(op: F, what: &str) -> CartbotResult<T>
where
    F: Future<Output = redis::RedisResult<T>>,
{
    match tokio::time::timeout(REDIS_TIMEOUT, op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CartbotError::Session(format!("Redis {what} failed: {e}"))),
        Err(_) => Err(CartbotError::Session(format!(
            "Redis {what} timed out after {}s",
            REDIS_TIMEOUT.as_secs()
        ))),
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> CartbotResult<Option<String>> {
        let mut conn = self.conn.clone();
        bounded(conn.get::<_, Option<String>>(key), "GET").await
    }

    async fn set(&self, key: &str, value: &str) -> CartbotResult<()> {
        let mut conn = self.conn.clone();
        bounded(conn.set::<_, _, ()>(key, value), "SET").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_session_error() {
        let err = RedisStore::connect("not-a-redis-url").await.err().unwrap();
        assert!(matches!(err, CartbotError::Session(_)));
        assert!(err.to_string().contains("Invalid Redis URL"));
    }

    #[tokio::test]
    async fn test_wrong_scheme_rejected() {
        let err = RedisStore::connect("http://127.0.0.1:6379").await.err().unwrap();
        assert!(matches!(err, CartbotError::Session(_)));
    }
}
