//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::attempts::DEFAULT_MAX_ATTEMPTS;
use crate::pool::EvictionPolicy;
use crate::service::DedupPolicy;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of pools the store can hold
    pub max_pools: usize,
    /// Pool TTL in seconds
    pub pool_ttl: u64,
    /// Retake quota per (user, exam) pair
    pub max_attempts: u32,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Strategy for choosing the eviction victim at capacity
    pub eviction_policy: EvictionPolicy,
    /// How a cache hit on an already-consumed pool version is handled
    pub dedup_policy: DedupPolicy,
    /// Optional path to a JSON question bank for the bundled source
    pub question_bank_path: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_POOLS` - Maximum cached pools (default: 500)
    /// - `POOL_TTL` - Pool TTL in seconds (default: 1800)
    /// - `MAX_ATTEMPTS` - Retake quota per user/exam pair (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    /// - `EVICTION_POLICY` - `hybrid` or `lru` (default: hybrid)
    /// - `DEDUP_POLICY` - `force-miss` or `serve-repeat` (default: force-miss)
    /// - `QUESTION_BANK_PATH` - JSON question bank file (default: built-in demo bank)
    pub fn from_env() -> Self {
        Self {
            max_pools: env::var("MAX_POOLS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            pool_ttl: env::var("POOL_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            max_attempts: env::var("MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            eviction_policy: env::var("EVICTION_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            dedup_policy: env::var("DEDUP_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            question_bank_path: env::var("QUESTION_BANK_PATH").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_pools: 500,
            pool_ttl: 1800,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            server_port: 3000,
            cleanup_interval: 60,
            eviction_policy: EvictionPolicy::default(),
            dedup_policy: DedupPolicy::default(),
            question_bank_path: None,
        }
    }
}
