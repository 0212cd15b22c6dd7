//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! served through the response cache.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for DELETE /api/items/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: u64,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(id: u64) -> Self {
        Self {
            message: format!("Item {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that had to compute a fresh response
    pub misses: u64,
    /// Responses stored in the cache
    pub insertions: u64,
    /// Entries dropped because their resource changed
    pub invalidations: u64,
    /// Entries removed by the expiry sweep
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Configured freshness window in seconds
    pub ttl_seconds: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, ttl_seconds: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            insertions: stats.insertions,
            invalidations: stats.invalidations,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            ttl_seconds,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
