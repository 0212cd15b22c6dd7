//! Cache Statistics Module
//!
//! Counts lookups, writes and removals performed on the response cache.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a fresh entry
    pub hits: u64,
    /// Lookups with no entry, or only an expired one
    pub misses: u64,
    /// Entries stored by `put` (overwrites included)
    pub insertions: u64,
    /// Entries removed by an explicit invalidation
    pub invalidations: u64,
    /// Entries removed by the expiry sweep
    pub expirations: u64,
    /// Current number of entries physically stored
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    /// Adds `count` sweep removals.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
