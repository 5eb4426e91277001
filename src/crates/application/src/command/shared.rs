use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Result of a toggle: the new state and the favorites list read after the write.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome<T> {
    pub favorited: bool,
    pub favorites: Vec<T>,
}

/// One async mutex per key. Work on the same key runs one at a time, different keys
/// do not wait on each other. Idle entries are dropped when their last guard goes away.
#[derive(Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: i64) -> KeyGuard {
        let lock = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        KeyGuard {
            key,
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

pub struct KeyGuard {
    key: i64,
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // only the map itself still holds the mutex: nobody is waiting on it
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
