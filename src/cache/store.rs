//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU eviction, absolute
//! TTL expiry, and a memory ceiling driven by the snapshot estimator.

use std::collections::HashMap;

use crate::cache::{estimate, CacheEntry, CacheStats, ContactsSnapshot};
use crate::config::{CacheConfig, CacheConfigUpdate};

// == Contact Cache ==
/// Keyed store of contact snapshots with expiration and eviction.
///
/// All operations are plain in-memory map work; the store never reaches out
/// to the contact directory itself. Eviction picks the entry with the oldest
/// `last_accessed_at`; ties are broken arbitrarily by map iteration order.
#[derive(Debug)]
pub struct ContactCache {
    /// Key-to-snapshot storage
    entries: HashMap<String, CacheEntry>,
    /// Runtime-updatable tuning parameters
    config: CacheConfig,
    /// Cumulative performance counters
    stats: CacheStats,
}

impl ContactCache {
    // == Constructor ==
    /// Creates a new ContactCache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Retrieves a snapshot by key.
    ///
    /// Counts every call as a query. A disabled cache and an absent key are
    /// misses; an entry older than the TTL is removed on sight and counted
    /// as both a miss and an eviction. On a hit the entry's access
    /// bookkeeping is updated and a clone of the snapshot is returned, so
    /// callers cannot mutate cached state through the result.
    pub fn get(&mut self, key: &str) -> Option<ContactsSnapshot> {
        self.stats.record_query();

        if !self.config.enabled {
            self.stats.record_miss();
            return None;
        }

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.config.ttl_ms),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            self.stats.record_eviction();
            return None;
        }

        let snapshot = {
            let entry = self.entries.get_mut(key)?;
            entry.touch();
            entry.snapshot.clone()
        };
        self.stats.record_hit();
        Some(snapshot)
    }

    // == Set ==
    /// Stores a snapshot under the given key, overwriting any previous entry.
    ///
    /// No-op while disabled. If admitting the snapshot would push the
    /// estimated total over the memory ceiling, a single LRU entry is
    /// evicted first; this check deliberately runs once rather than looping,
    /// so one oversized snapshot can leave the store over the ceiling until
    /// the next sweep. Independently, one LRU entry is evicted when the entry
    /// count is already at its ceiling.
    pub fn set(&mut self, snapshot: ContactsSnapshot, key: &str) {
        if !self.config.enabled {
            return;
        }

        let incoming_mb = estimate::snapshot_size_mb(&snapshot);
        if self.total_memory_mb() + incoming_mb > self.config.max_memory_mb {
            self.evict_lru();
        }

        if self.entries.len() >= self.config.max_entries {
            self.evict_lru();
        }

        self.entries.insert(key.to_string(), CacheEntry::new(snapshot));
    }

    // == Merge Contact ==
    /// Write-through enrichment: folds one discovered (name, phones) pair
    /// into the snapshot cached under `key`.
    ///
    /// A live entry is mutated in place and its access bookkeeping touched;
    /// with no live entry the pair becomes a fresh single-contact snapshot
    /// via [`set`](Self::set). No-op while disabled.
    pub fn merge_contact(&mut self, key: &str, name: &str, phones: Vec<String>) {
        if !self.config.enabled {
            return;
        }

        let live = matches!(
            self.entries.get(key),
            Some(entry) if !entry.is_expired(self.config.ttl_ms)
        );

        if live {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.snapshot.insert(name.to_string(), phones);
                entry.touch();
            }
        } else {
            let mut snapshot = ContactsSnapshot::new();
            snapshot.insert(name.to_string(), phones);
            self.set(snapshot, key);
        }
    }

    // == Invalidate ==
    /// Removes one entry, or every entry when no key is given.
    pub fn invalidate(&mut self, key: Option<&str>) {
        match key {
            Some(k) => {
                self.entries.remove(k);
            }
            None => self.entries.clear(),
        }
    }

    // == Cleanup ==
    /// Purges expired entries, then enforces the memory ceiling.
    ///
    /// Every expired entry counts as an eviction. After expiry, LRU entries
    /// are evicted one at a time until the estimated total fits under the
    /// ceiling or the store is empty (unlike `set`, this loop runs to
    /// satisfaction). Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        if !self.config.enabled {
            return 0;
        }

        let ttl = self.config.ttl_ms;
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        let mut removed = 0;
        for key in expired_keys {
            self.entries.remove(&key);
            self.stats.record_eviction();
            removed += 1;
        }

        while self.total_memory_mb() > self.config.max_memory_mb {
            if !self.evict_lru() {
                break;
            }
            removed += 1;
        }

        removed
    }

    // == Update Config ==
    /// Merges the given fields into the live configuration.
    ///
    /// Disabling the cache discards its contents; it is not a pause.
    /// Sweeper re-arming on enable/interval changes is the owner's job.
    pub fn update_config(&mut self, update: &CacheConfigUpdate) {
        let was_enabled = self.config.enabled;
        self.config.apply(update);
        if was_enabled && !self.config.enabled {
            self.entries.clear();
        }
    }

    // == Clear ==
    /// Drops all entries, leaving counters intact.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Returns a copy of the counters with current usage gauges filled in.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_usage(self.entries.len(), self.total_memory_mb());
        stats
    }

    // == Config ==
    /// Returns a copy of the current configuration.
    pub fn config(&self) -> CacheConfig {
        self.config.clone()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==
    /// Estimated footprint of all entries, in megabytes.
    fn total_memory_mb(&self) -> f64 {
        self.entries
            .values()
            .map(|entry| estimate::snapshot_size_mb(&entry.snapshot))
            .sum()
    }

    /// Evicts the least-recently-used entry. Returns false on an empty store.
    fn evict_lru(&mut self) -> bool {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed_at)
            .map(|(key, _)| key.clone());

        match victim {
            Some(key) => {
                self.entries.remove(&key);
                self.stats.record_eviction();
                true
            }
            None => false,
        }
    }
}
