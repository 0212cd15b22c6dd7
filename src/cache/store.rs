//! Cache Store Module
//!
//! Main cache engine: URL-keyed storage with sliding TTL expiration.
//!
//! Storage is a `HashMap`, so `put`, `get` and `invalidate` are average O(1)
//! while `sweep` walks every entry and is O(n).

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats};

// == Cached Content ==
/// Copy of a cached payload handed back to callers on a hit.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedContent {
    pub content: Value,
    pub validation_tag: String,
}

// == Cache Store ==
/// Response storage with sliding TTL expiration.
///
/// The store itself is not synchronized; share it behind a mutex
/// (see [`ResponseCache`](crate::cache::ResponseCache)).
#[derive(Debug)]
pub struct CacheStore {
    /// URL -> entry
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
    /// Freshness window in milliseconds
    ttl_ms: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl` after their last
    /// write or read.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Freshness window used for every entry.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    // == Put ==
    /// Stores `content` under `key`, replacing any previous entry for it.
    ///
    /// The new entry expires one ttl from now. Always succeeds.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        content: Value,
        validation_tag: impl Into<String>,
    ) {
        self.put_at(key, content, validation_tag, current_timestamp_ms());
    }

    pub(crate) fn put_at(
        &mut self,
        key: impl Into<String>,
        content: Value,
        validation_tag: impl Into<String>,
        now: u64,
    ) {
        let key = key.into();
        let entry = CacheEntry::new(key.clone(), content, validation_tag.into(), self.ttl_ms, now);

        // insert replaces the previous entry, keeping one entry per key
        self.entries.insert(key.clone(), entry);
        self.stats.record_insertion();
        self.stats.set_total_entries(self.entries.len());

        debug!(url = %key, "Added to cache");
    }

    // == Get ==
    /// Looks up a fresh entry for `key`.
    ///
    /// A hit slides the entry's expiry to one ttl from now. An expired entry
    /// is reported as a miss but left in place for the sweep.
    pub fn get(&mut self, key: &str) -> Option<CachedContent> {
        self.get_at(key, current_timestamp_ms())
    }

    pub(crate) fn get_at(&mut self, key: &str, now: u64) -> Option<CachedContent> {
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                entry.refresh(self.ttl_ms, now);
                let hit = CachedContent {
                    content: entry.content.clone(),
                    validation_tag: entry.validation_tag.clone(),
                };
                self.stats.record_hit();
                debug!(url = %key, "Cache hit");
                Some(hit)
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Invalidate ==
    /// Removes the entry for `key`, if any.
    pub fn invalidate(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.stats.record_invalidation();
            self.stats.set_total_entries(self.entries.len());
            debug!(url = %key, "Cache cleared");
        }
    }

    // == Sweep ==
    /// Physically removes every expired entry.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        self.sweep_at(current_timestamp_ms())
    }

    pub(crate) fn sweep_at(&mut self, now: u64) -> usize {
        let before = self.entries.len();

        self.entries.retain(|key, entry| {
            if entry.is_expired_at(now) {
                debug!(url = %key, "Expired cache entry removed");
                false
            } else {
                true
            }
        });

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Inspection ==
    /// Whether an entry for `key` is physically stored, expired or not.
    ///
    /// Does not affect the entry's expiry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }
}
