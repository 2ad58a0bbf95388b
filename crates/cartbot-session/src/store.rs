use async_trait::async_trait;
use cartbot_core::{CartbotError, CartbotResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// String key-value storage with no expiry.
///
/// `get` returns `None` for a key that was never set.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> CartbotResult<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> CartbotResult<()>;
}

/// In-memory store. State is lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// No keys stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> CartbotResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CartbotResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-based store: one file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for session files, creating it if needed.
    pub async fn new(dir: PathBuf) -> CartbotResult<Self> {
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for(key))
    }
}

/// Map a key to a file name. Characters outside `[A-Za-z0-9_-]` are
/// percent-encoded byte by byte, so distinct keys never share a file.
fn file_name_for(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            name.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                name.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    name
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> CartbotResult<Option<String>> {
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CartbotError::Session(format!(
                "Failed to read '{key}': {e}"
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> CartbotResult<()> {
        let path = self.key_path(key);
        // Write-then-rename so a concurrent reader never sees a partial value.
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", file_name_for(key), Uuid::new_v4()));
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| CartbotError::Session(format!("Failed to write '{key}': {e}")))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| CartbotError::Session(format!("Failed to write '{key}': {e}")))?;
        Ok(())
    }
}
