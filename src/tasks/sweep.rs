//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The task runs until aborted through the returned handle. Each pass holds
/// the store lock for the whole sweep, so it is serialized with `put`, `get`
/// and `invalidate`.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(Duration::from_secs(20))));
/// let sweeper = spawn_sweep_task(store.clone(), Duration::from_secs(20));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweep_task(store: Arc<Mutex<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Periodic cache sweep started with interval of {}ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.lock().await.sweep();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
