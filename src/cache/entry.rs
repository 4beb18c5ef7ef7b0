//! Cache Entry Module
//!
//! Defines the contact snapshot type and the bookkeeping wrapper stored
//! for each cached snapshot.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// A full contact directory snapshot: display name mapped to an ordered
/// list of phone numbers.
///
/// Display names are not guaranteed unique in the underlying directory;
/// a later record with the same name replaces the earlier one. BTreeMap
/// keeps iteration order deterministic (lexicographic by name), which is
/// the tie-break order used by fuzzy name matching.
pub type ContactsSnapshot = BTreeMap<String, Vec<String>>;

// == Cache Entry ==
/// One cached snapshot plus its access metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached contact snapshot
    pub snapshot: ContactsSnapshot,
    /// Creation timestamp (Unix milliseconds). Never refreshed on access:
    /// expiry is absolute, not sliding.
    pub created_at: u64,
    /// Timestamp of the most recent successful read (Unix milliseconds).
    /// Drives LRU eviction.
    pub last_accessed_at: u64,
    /// Number of successful reads. Diagnostic only, not used for eviction.
    pub access_count: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry for a freshly stored snapshot.
    pub fn new(snapshot: ContactsSnapshot) -> Self {
        let now = current_timestamp_ms();
        Self {
            snapshot,
            created_at: now,
            last_accessed_at: now,
            access_count: 1,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived the given TTL.
    ///
    /// An entry expires once its age strictly exceeds `ttl_ms`; at exactly
    /// `ttl_ms` it is still alive.
    pub fn is_expired(&self, ttl_ms: u64) -> bool {
        self.age_ms() > ttl_ms
    }

    // == Touch ==
    /// Records a successful read: bumps the access counter and refreshes
    /// the last-access timestamp.
    pub fn touch(&mut self) {
        self.access_count += 1;
        self.last_accessed_at = current_timestamp_ms();
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
