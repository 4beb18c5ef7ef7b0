//! Configuration Module
//!
//! Handles process configuration loaded from environment variables and the
//! runtime-updatable cache configuration value object.

use std::env;

use serde::{Deserialize, Serialize};

// == Cache Config ==
/// Cache tuning parameters.
///
/// All fields may be updated at runtime through [`CacheConfigUpdate`];
/// changes take effect on the next cache operation.
#[derive(Debug, Clone, Serialize)]
pub struct CacheConfig {
    /// Whether caching is active. Disabling discards all cached entries.
    pub enabled: bool,
    /// Entry time-to-live in milliseconds, measured from creation
    pub ttl_ms: u64,
    /// Ceiling on the estimated footprint of all entries, in megabytes
    pub max_memory_mb: f64,
    /// Ceiling on the number of entries
    pub max_entries: usize,
    /// Interval between background sweeps, in milliseconds
    pub cleanup_interval_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_ms: 600_000,
            max_memory_mb: 50.0,
            max_entries: 10,
            cleanup_interval_ms: 60_000,
        }
    }
}

impl CacheConfig {
    /// Merges the provided fields into this config, leaving absent fields
    /// untouched.
    pub fn apply(&mut self, update: &CacheConfigUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(ttl_ms) = update.ttl_ms {
            self.ttl_ms = ttl_ms;
        }
        if let Some(max_memory_mb) = update.max_memory_mb {
            self.max_memory_mb = max_memory_mb;
        }
        if let Some(max_entries) = update.max_entries {
            self.max_entries = max_entries;
        }
        if let Some(cleanup_interval_ms) = update.cleanup_interval_ms {
            self.cleanup_interval_ms = cleanup_interval_ms;
        }
    }
}

// == Cache Config Update ==
/// Partial cache configuration: only the fields present are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfigUpdate {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    #[serde(default)]
    pub max_memory_mb: Option<f64>,
    #[serde(default)]
    pub max_entries: Option<usize>,
    #[serde(default)]
    pub cleanup_interval_ms: Option<u64>,
}

// == Process Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// External bridge command used to reach the contact directory
    pub bridge_command: String,
    /// Initial cache configuration
    pub cache: CacheConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `BRIDGE_COMMAND` - contact bridge executable (default: "contacts-bridge")
    /// - `CACHE_ENABLED` - whether caching is active (default: true)
    /// - `CACHE_TTL_MS` - entry TTL in milliseconds (default: 600000)
    /// - `CACHE_MAX_MEMORY_MB` - memory ceiling in MB (default: 50)
    /// - `CACHE_MAX_ENTRIES` - entry-count ceiling (default: 10)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - sweep interval in ms (default: 60000)
    pub fn from_env() -> Self {
        let defaults = CacheConfig::default();
        Self {
            server_port: env_parse("SERVER_PORT", 3000),
            bridge_command: env::var("BRIDGE_COMMAND")
                .unwrap_or_else(|_| "contacts-bridge".to_string()),
            cache: CacheConfig {
                enabled: env_parse("CACHE_ENABLED", defaults.enabled),
                ttl_ms: env_parse("CACHE_TTL_MS", defaults.ttl_ms),
                max_memory_mb: env_parse("CACHE_MAX_MEMORY_MB", defaults.max_memory_mb),
                max_entries: env_parse("CACHE_MAX_ENTRIES", defaults.max_entries),
                cleanup_interval_ms: env_parse(
                    "CACHE_CLEANUP_INTERVAL_MS",
                    defaults.cleanup_interval_ms,
                ),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            bridge_command: "contacts-bridge".to_string(),
            cache: CacheConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
