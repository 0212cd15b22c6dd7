//! Cache Entry Module
//!
//! Defines a single cached response together with its sliding expiry.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A cached response payload for one request URL.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Request key (URL path) the entry was stored under
    pub key: String,
    /// Opaque response payload
    pub content: Value,
    /// Opaque validation tag (ETag), empty when none was supplied
    pub validation_tag: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_ms` after `now`.
    pub fn new(
        key: String,
        content: Value,
        validation_tag: String,
        ttl_ms: u64,
        now: u64,
    ) -> Self {
        Self {
            key,
            content,
            validation_tag,
            expires_at: now.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now`.
    ///
    /// An entry is stale once `expires_at <= now`, so an entry that expires
    /// exactly at the current instant is already absent.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at <= now
    }

    // == Refresh ==
    /// Slides the expiry forward to `now + ttl_ms`.
    pub fn refresh(&mut self, ttl_ms: u64, now: u64) {
        self.expires_at = now.saturating_add(ttl_ms);
    }

    /// Remaining lifetime in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as `0`.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
