//! Shared Response Cache
//!
//! Thread-safe handle around [`CacheStore`] that owns the expiry sweeper.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{CacheStats, CacheStore, CachedContent};
use crate::tasks::spawn_sweep_task;

/// Lower bound on the sweep period so a zero ttl cannot spin.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

// == Response Cache ==
/// Process-local response cache keyed by request URL.
///
/// Construct one per process and share it (`Arc<ResponseCache>`) with every
/// component that needs it. All operations lock the same mutex, so `put`,
/// `get`, `invalidate` and the background sweep never interleave.
///
/// The sweeper starts in [`ResponseCache::new`] and runs every ttl until
/// [`ResponseCache::shutdown`] is called or the cache is dropped.
#[derive(Debug)]
pub struct ResponseCache {
    store: Arc<Mutex<CacheStore>>,
    sweeper: JoinHandle<()>,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache and starts its sweep task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let sweeper = spawn_sweep_task(store.clone(), ttl.max(MIN_SWEEP_INTERVAL));

        Self { store, sweeper }
    }

    /// Stores `content` and its validation tag under `key`, replacing any
    /// previous entry.
    pub async fn put(
        &self,
        key: impl Into<String>,
        content: Value,
        validation_tag: impl Into<String>,
    ) {
        self.store.lock().await.put(key, content, validation_tag);
    }

    /// Returns a copy of the fresh entry for `key` and slides its expiry.
    pub async fn get(&self, key: &str) -> Option<CachedContent> {
        self.store.lock().await.get(key)
    }

    /// Removes the entry for `key`, if any.
    pub async fn invalidate(&self, key: &str) {
        self.store.lock().await.invalidate(key);
    }

    /// Runs a sweep pass immediately, outside the periodic schedule.
    pub async fn sweep(&self) -> usize {
        self.store.lock().await.sweep()
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.store.lock().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    pub async fn ttl(&self) -> Duration {
        self.store.lock().await.ttl()
    }

    /// Stops the periodic sweep. Entries stay readable until the cache is
    /// dropped.
    pub fn shutdown(&self) {
        if !self.sweeper.is_finished() {
            self.sweeper.abort();
            info!("Periodic cache sweep stopped");
        }
    }
}

impl Drop for ResponseCache {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}
