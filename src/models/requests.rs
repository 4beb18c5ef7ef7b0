//! Request DTOs for the contacts broker API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::config::CacheConfigUpdate;

/// Request body for PATCH /cache/config.
///
/// Every field is optional; absent fields leave the live configuration
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdateRequest {
    /// Whether caching is active
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Entry TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    /// Memory ceiling in megabytes
    #[serde(default)]
    pub max_memory_mb: Option<f64>,
    /// Entry-count ceiling
    #[serde(default)]
    pub max_entries: Option<usize>,
    /// Sweep interval in milliseconds
    #[serde(default)]
    pub cleanup_interval_ms: Option<u64>,
}

impl ConfigUpdateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.ttl_ms == Some(0) {
            return Some("ttl_ms must be greater than zero".to_string());
        }
        if matches!(self.max_memory_mb, Some(mb) if mb <= 0.0) {
            return Some("max_memory_mb must be greater than zero".to_string());
        }
        if self.max_entries == Some(0) {
            return Some("max_entries must be greater than zero".to_string());
        }
        if self.cleanup_interval_ms == Some(0) {
            return Some("cleanup_interval_ms must be greater than zero".to_string());
        }
        None
    }

    /// Converts the request into the cache-layer update value.
    pub fn into_update(self) -> CacheConfigUpdate {
        CacheConfigUpdate {
            enabled: self.enabled,
            ttl_ms: self.ttl_ms,
            max_memory_mb: self.max_memory_mb,
            max_entries: self.max_entries,
            cleanup_interval_ms: self.cleanup_interval_ms,
        }
    }
}
