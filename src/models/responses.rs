//! Response DTOs for the contacts broker API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, ContactsSnapshot};

/// Response body for GET /contacts
#[derive(Debug, Clone, Serialize)]
pub struct ContactsResponse {
    /// Number of contacts in the snapshot
    pub count: usize,
    /// Name-to-numbers mapping
    pub contacts: ContactsSnapshot,
}

impl ContactsResponse {
    pub fn new(contacts: ContactsSnapshot) -> Self {
        Self {
            count: contacts.len(),
            contacts,
        }
    }
}

/// Response body for GET /contacts/:name
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    /// The queried name
    pub name: String,
    /// Phone numbers found for the name; empty when nothing matched
    pub phones: Vec<String>,
}

impl ContactResponse {
    pub fn new(name: impl Into<String>, phones: Vec<String>) -> Self {
        Self {
            name: name.into(),
            phones,
        }
    }
}

/// Response body for GET /contacts/phone/:number
#[derive(Debug, Clone, Serialize)]
pub struct PhoneLookupResponse {
    /// The queried number as given
    pub query: String,
    /// The resolved contact name
    pub name: String,
}

impl PhoneLookupResponse {
    pub fn new(query: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            name: name.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions (TTL expiry and LRU/memory pressure)
    pub evictions: u64,
    /// Number of lookups served
    pub total_queries: u64,
    /// Current number of cached entries
    pub current_entries: usize,
    /// Estimated footprint of all entries in megabytes
    pub estimated_memory_mb: f64,
    /// Hit rate (hits / total_queries)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_queries: stats.total_queries,
            current_entries: stats.current_entries,
            estimated_memory_mb: stats.estimated_memory_mb,
        }
    }
}

/// Response body for the invalidation endpoints (DELETE /cache[/:key])
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
}

impl InvalidateResponse {
    /// Response for a single-key invalidation.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            message: format!("Cache entry '{}' invalidated", key.into()),
        }
    }

    /// Response for a full invalidation.
    pub fn all() -> Self {
        Self {
            message: "Cache cleared".to_string(),
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
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
