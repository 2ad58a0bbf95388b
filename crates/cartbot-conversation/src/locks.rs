use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

/// One async lock per sender, created on demand.
///
/// An entry lives only while some task holds or waits for it.
#[derive(Default)]
pub struct SenderLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

/// Holds a sender's lock until dropped.
pub struct SenderGuard<'a> {
    owner: &'a SenderLocks,
    sender_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SenderLocks {
    /// An empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other task holds `sender_id`'s lock, then take it.
    pub async fn lock(&self, sender_id: &str) -> SenderGuard<'_> {
        let entry = self
            .locks
            .lock()
            .entry(sender_id.to_string())
            .or_default()
            .clone();
        let guard = entry.lock_owned().await;
        SenderGuard {
            owner: self,
            sender_id: sender_id.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of senders with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// No sender holds or waits on a lock.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for SenderGuard<'_> {
    fn drop(&mut self) {
        let mut locks = self.owner.locks.lock();
        drop(self.guard.take());
        // Only the map's own handle left: nobody holds or waits for it.
        if locks
            .get(&self.sender_id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(&self.sender_id);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_entry_removed_after_release() {
        let locks = SenderLocks::new();
        {
            let _guard = locks.lock("u1").await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_senders_do_not_block() {
        let locks = SenderLocks::new();
        let _a = locks.lock("a").await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.lock("b")).await;
        assert!(b.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_sender_is_serialized() {
        let locks = Arc::new(SenderLocks::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let locks = locks.clone();
            let order = order.clone();
            tokio::spawn(async move {
                let _guard = locks.lock("u1").await;
                order.lock().push("first:start");
                tokio::time::sleep(Duration::from_secs(1)).await;
                order.lock().push("first:end");
            })
        };
        tokio::task::yield_now().await;

        let second = {
            let locks = locks.clone();
            let order = order.clone();
            tokio::spawn(async move {
                let _guard = locks.lock("u1").await;
                order.lock().push("second");
            })
        };

        first.await.unwrap();
        second.await.unwrap();
        assert_eq!(*order.lock(), vec!["first:start", "first:end", "second"]);
        assert!(locks.is_empty());
    }
}
