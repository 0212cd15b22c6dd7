//! Expiring Cache - A process-local HTTP response cache
//!
//! Caches response payloads by request URL with sliding TTL expiration,
//! opaque validation tags, and a periodic background expiry sweep.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use cache::ResponseCache;
pub use config::Config;
