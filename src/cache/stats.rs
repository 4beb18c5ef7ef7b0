//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (absent, expired, or disabled)
    pub misses: u64,
    /// Number of entries removed by TTL expiry or LRU/memory pressure
    pub evictions: u64,
    /// Number of lookups served, hit or miss
    pub total_queries: u64,
    /// Current number of entries in the cache
    pub current_entries: usize,
    /// Current estimated footprint of all entries, in megabytes
    pub estimated_memory_mb: f64,
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
    /// Returns hits / total_queries, or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.total_queries == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_queries as f64
        }
    }

    // == Record Query ==
    /// Increments the lookup counter.
    pub fn record_query(&mut self) {
        self.total_queries += 1;
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Derived Gauges ==
    /// Updates the current entry count and estimated memory gauges.
    pub fn set_usage(&mut self, entries: usize, memory_mb: f64) {
        self.current_entries = entries;
        self.estimated_memory_mb = memory_mb;
    }
}
