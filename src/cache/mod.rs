//! Cache Module
//!
//! Process-local HTTP response caching keyed by request URL, with sliding
//! TTL expiration and a periodic expiry sweep.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::ResponseCache;
pub use stats::CacheStats;
pub use store::{CacheStore, CachedContent};
