//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default freshness window in seconds
const DEFAULT_CACHE_EXPIRATION_TIME: u64 = 20;
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// Read once at startup; changing them requires a restart.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache freshness window in seconds, also the sweep interval
    pub cache_expiration_time: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_EXPIRATION_TIME` - Cache TTL in seconds (default: 20, must be > 0)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            cache_expiration_time: env::var("CACHE_EXPIRATION_TIME")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .filter(|&ttl: &u64| ttl > 0)
                .unwrap_or(DEFAULT_CACHE_EXPIRATION_TIME),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Cache ttl as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_expiration_time)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_expiration_time: DEFAULT_CACHE_EXPIRATION_TIME,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
