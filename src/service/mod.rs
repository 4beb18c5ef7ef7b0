//! Contact Service Module
//!
//! The cache-aware query layer. Decides per logical query whether to trust
//! the cache, when to bypass it, and how to fold partial discoveries back
//! in. Owns the cache store and the lifecycle of its background sweeper.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, ContactCache, ContactsSnapshot, ALL_CONTACTS_KEY};
use crate::config::{CacheConfig, CacheConfigUpdate};
use crate::directory::{phone, ContactDirectory};
use crate::error::{BrokerError, Result};
use crate::tasks::spawn_sweeper;

// == Contact Service ==
/// Brokers contact queries through the cache and down to the directory.
///
/// Constructed explicitly and injected wherever it is needed; dropping the
/// service without calling [`shutdown`](Self::shutdown) leaves the sweeper
/// task running until the runtime exits.
pub struct ContactService {
    /// The slow external directory
    directory: Arc<dyn ContactDirectory>,
    /// Snapshot cache shared with the sweeper
    cache: Arc<RwLock<ContactCache>>,
    /// Handle of the running sweeper, if any
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl ContactService {
    // == Constructor ==
    /// Creates a service over the given directory and starts the sweeper
    /// when caching is enabled. Must be called within a tokio runtime.
    pub fn new(directory: Arc<dyn ContactDirectory>, config: CacheConfig) -> Self {
        let enabled = config.enabled;
        let interval_ms = config.cleanup_interval_ms;
        let cache = Arc::new(RwLock::new(ContactCache::new(config)));

        let sweeper = enabled.then(|| spawn_sweeper(cache.clone(), interval_ms));

        Self {
            directory,
            cache,
            sweeper: Mutex::new(sweeper),
        }
    }

    // == Bulk Enumeration ==
    /// Returns the full contact snapshot, preferring the cache.
    ///
    /// On a cache miss the directory's primary enumeration runs; when it
    /// yields nothing the slower fallback enumeration is tried. Whichever
    /// produced a non-empty snapshot is cached under the bulk key. An empty
    /// final result is returned as-is and not cached, so the next call
    /// retries the directory.
    pub async fn get_all_contacts(&self) -> Result<ContactsSnapshot> {
        if let Some(snapshot) = self.cache.write().await.get(ALL_CONTACTS_KEY) {
            debug!(contacts = snapshot.len(), "bulk lookup served from cache");
            return Ok(snapshot);
        }

        self.directory.check_access().await?;

        let mut snapshot = self.directory.list_all().await?;
        if snapshot.is_empty() {
            debug!("primary enumeration yielded nothing, trying fallback");
            snapshot = self.directory.list_all_fallback().await?;
        }

        if !snapshot.is_empty() {
            self.cache
                .write()
                .await
                .set(snapshot.clone(), ALL_CONTACTS_KEY);
        }

        Ok(snapshot)
    }

    // == Name Lookup ==
    /// Returns the phone numbers for a contact name.
    ///
    /// Asks the directory directly first (a single-name query is cheaper
    /// than bulk enumeration). On zero matches, falls back to a
    /// case-insensitive substring search over the bulk snapshot; the first
    /// match in snapshot iteration order wins. No match at all yields an
    /// empty list, not an error.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<String>> {
        self.directory.check_access().await?;

        let phones = self.directory.lookup_name(name).await?;
        if !phones.is_empty() {
            return Ok(phones);
        }

        debug!(name, "direct lookup empty, falling back to fuzzy search");
        let snapshot = self.get_all_contacts().await?;
        let needle = name.to_lowercase();
        Ok(snapshot
            .iter()
            .find(|(candidate, _)| candidate.to_lowercase().contains(&needle))
            .map(|(_, phones)| phones.clone())
            .unwrap_or_default())
    }

    // == Phone Lookup ==
    /// Resolves a phone number to a contact name.
    ///
    /// Searches only the cached snapshot first; a miss there does not
    /// trigger bulk enumeration. On a miss the directory's per-contact scan
    /// runs, and a successful discovery is merged back into the cached bulk
    /// snapshot so repeated lookups warm the cache without a full
    /// re-enumeration.
    pub async fn find_by_phone(&self, number: &str) -> Result<Option<String>> {
        let forms = phone::normalize_forms(number);
        if forms.is_empty() {
            return Err(BrokerError::InvalidRequest(format!(
                "phone number {number:?} contains no digits"
            )));
        }

        {
            let mut cache = self.cache.write().await;
            if let Some(snapshot) = cache.get(ALL_CONTACTS_KEY) {
                if let Some((name, _)) = phone::match_in_snapshot(&snapshot, &forms) {
                    debug!(name, "phone lookup served from cache");
                    return Ok(Some(name.to_string()));
                }
            }
        }

        self.directory.check_access().await?;

        match self.directory.scan_for_phone(&forms).await? {
            Some((name, phones)) => {
                self.cache
                    .write()
                    .await
                    .merge_contact(ALL_CONTACTS_KEY, &name, phones);
                Ok(Some(name))
            }
            None => Ok(None),
        }
    }

    // == Cache Administration ==
    /// Returns a copy of the current cache counters and usage gauges.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Returns a copy of the current cache configuration.
    pub async fn cache_config(&self) -> CacheConfig {
        self.cache.read().await.config()
    }

    /// Removes one cached entry, or everything when no key is given.
    pub async fn invalidate_cache(&self, key: Option<&str>) {
        self.cache.write().await.invalidate(key);
    }

    /// Applies a partial configuration update and re-arms the sweeper.
    ///
    /// Any existing sweeper is stopped first so two sweeps never run
    /// concurrently; a new one starts only while the cache is enabled.
    /// Returns the resulting configuration.
    pub async fn update_cache_config(&self, update: &CacheConfigUpdate) -> CacheConfig {
        let config = {
            let mut cache = self.cache.write().await;
            cache.update_config(update);
            cache.config()
        };

        let mut sweeper = self.sweeper.lock().await;
        if let Some(handle) = sweeper.take() {
            handle.abort();
        }
        if config.enabled {
            *sweeper = Some(spawn_sweeper(self.cache.clone(), config.cleanup_interval_ms));
        }

        config
    }

    // == Shutdown ==
    /// Stops the sweeper and drops all cached entries. The service is not
    /// meant to serve queries afterward.
    pub async fn shutdown(&self) {
        let mut sweeper = self.sweeper.lock().await;
        if let Some(handle) = sweeper.take() {
            handle.abort();
        }
        self.cache.write().await.clear();
        info!("contact service shut down");
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // == Mock Directory ==
    #[derive(Default)]
    struct MockDirectory {
        primary: ContactsSnapshot,
        fallback: ContactsSnapshot,
        lookup: Vec<String>,
        scan_result: Option<(String, Vec<String>)>,
        deny_access: bool,
        primary_calls: AtomicUsize,
        fallback_calls: AtomicUsize,
        scan_calls: AtomicUsize,
    }

    #[async_trait]
    impl ContactDirectory for MockDirectory {
        async fn check_access(&self) -> Result<()> {
            if self.deny_access {
                Err(BrokerError::AccessDenied("grant contacts access".to_string()))
            } else {
                Ok(())
            }
        }

        async fn list_all(&self) -> Result<ContactsSnapshot> {
            self.primary_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.primary.clone())
        }

        async fn list_all_fallback(&self) -> Result<ContactsSnapshot> {
            self.fallback_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fallback.clone())
        }

        async fn lookup_name(&self, _name: &str) -> Result<Vec<String>> {
            Ok(self.lookup.clone())
        }

        async fn scan_for_phone(
            &self,
            forms: &[String],
        ) -> Result<Option<(String, Vec<String>)>> {
            self.scan_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.scan_result.clone().filter(|(_, phones)| {
                phones
                    .iter()
                    .any(|p| forms.iter().any(|f| phone::numbers_match(p, f)))
            }))
        }
    }

    fn snapshot(pairs: &[(&str, &[&str])]) -> ContactsSnapshot {
        pairs
            .iter()
            .map(|(name, phones)| {
                (
                    name.to_string(),
                    phones.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect()
    }

    fn service_with(mock: MockDirectory) -> (ContactService, Arc<MockDirectory>) {
        let directory = Arc::new(mock);
        let service = ContactService::new(directory.clone(), CacheConfig::default());
        (service, directory)
    }

    #[tokio::test]
    async fn test_bulk_enumeration_is_cached() {
        let (service, directory) = service_with(MockDirectory {
            primary: snapshot(&[("Alice", &["555-0001"])]),
            ..Default::default()
        });

        let first = service.get_all_contacts().await.unwrap();
        let second = service.get_all_contacts().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(directory.primary_calls.load(Ordering::SeqCst), 1);

        let stats = service.cache_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_fallback_used_when_primary_empty() {
        let (service, directory) = service_with(MockDirectory {
            fallback: snapshot(&[("Bob", &["555-0002"])]),
            ..Default::default()
        });

        let result = service.get_all_contacts().await.unwrap();

        assert!(result.contains_key("Bob"));
        assert_eq!(directory.fallback_calls.load(Ordering::SeqCst), 1);

        // The fallback result was cached: no further enumeration.
        service.get_all_contacts().await.unwrap();
        assert_eq!(directory.primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(directory.fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_cached() {
        let (service, directory) = service_with(MockDirectory::default());

        assert!(service.get_all_contacts().await.unwrap().is_empty());
        assert!(service.get_all_contacts().await.unwrap().is_empty());

        // Both calls went all the way to the directory.
        assert_eq!(directory.primary_calls.load(Ordering::SeqCst), 2);
        assert_eq!(service.cache_stats().await.current_entries, 0);
    }

    #[tokio::test]
    async fn test_access_denied_is_distinct_from_empty() {
        let (service, _) = service_with(MockDirectory {
            deny_access: true,
            ..Default::default()
        });

        let result = service.get_all_contacts().await;
        assert!(matches!(result, Err(BrokerError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn test_direct_name_lookup_skips_bulk_path() {
        let (service, directory) = service_with(MockDirectory {
            lookup: vec!["555-0003".to_string()],
            ..Default::default()
        });

        let phones = service.find_by_name("Carol").await.unwrap();

        assert_eq!(phones, vec!["555-0003"]);
        assert_eq!(directory.primary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fuzzy_name_fallback_is_case_insensitive() {
        let (service, _) = service_with(MockDirectory {
            primary: snapshot(&[
                ("Alice Smith", &["555-0001"]),
                ("Bob Jones", &["555-0002"]),
            ]),
            ..Default::default()
        });

        let phones = service.find_by_name("alice").await.unwrap();
        assert_eq!(phones, vec!["555-0001"]);
    }

    #[tokio::test]
    async fn test_fuzzy_name_no_match_is_empty_list() {
        let (service, _) = service_with(MockDirectory {
            primary: snapshot(&[("Alice", &["555-0001"])]),
            ..Default::default()
        });

        let phones = service.find_by_name("Zed").await.unwrap();
        assert!(phones.is_empty());
    }

    #[tokio::test]
    async fn test_phone_miss_never_triggers_bulk_enumeration() {
        let (service, directory) = service_with(MockDirectory::default());

        let result = service.find_by_phone("555-0009").await.unwrap();

        assert_eq!(result, None);
        assert_eq!(directory.scan_calls.load(Ordering::SeqCst), 1);
        // The cache-only search must not fall through to enumeration.
        assert_eq!(directory.primary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(directory.fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_phone_scan_write_through() {
        let (service, directory) = service_with(MockDirectory {
            scan_result: Some(("Bob".to_string(), vec!["555-1234".to_string()])),
            ..Default::default()
        });

        let first = service.find_by_phone("555-1234").await.unwrap();
        assert_eq!(first.as_deref(), Some("Bob"));
        assert_eq!(directory.scan_calls.load(Ordering::SeqCst), 1);

        // The discovery was merged into the bulk snapshot: the repeat
        // lookup is a cache hit with no further scanning.
        let second = service.find_by_phone("5551234").await.unwrap();
        assert_eq!(second.as_deref(), Some("Bob"));
        assert_eq!(directory.scan_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_phone_write_through_enriches_existing_snapshot() {
        let (service, _) = service_with(MockDirectory {
            primary: snapshot(&[("Alice", &["555-0001"])]),
            scan_result: Some(("Bob".to_string(), vec!["555-1234".to_string()])),
            ..Default::default()
        });

        service.get_all_contacts().await.unwrap();
        service.find_by_phone("555-1234").await.unwrap();

        // Merge, not replace: both contacts are in the cached snapshot.
        let all = service.get_all_contacts().await.unwrap();
        assert!(all.contains_key("Alice"));
        assert!(all.contains_key("Bob"));
    }

    #[tokio::test]
    async fn test_phone_normalization_equivalence_on_cached_contact() {
        let (service, directory) = service_with(MockDirectory {
            scan_result: Some((
                "Bob".to_string(),
                vec!["+1 (555) 123-4567".to_string()],
            )),
            ..Default::default()
        });

        service.find_by_phone("5551234567").await.unwrap();
        assert_eq!(directory.scan_calls.load(Ordering::SeqCst), 1);

        for query in ["+15551234567", "5551234567", "(555) 123-4567"] {
            let name = service.find_by_phone(query).await.unwrap();
            assert_eq!(name.as_deref(), Some("Bob"), "query {query} missed");
        }
        assert_eq!(directory.scan_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_phone_without_digits_is_invalid() {
        let (service, _) = service_with(MockDirectory::default());

        let result = service.find_by_phone("not a number").await;
        assert!(matches!(result, Err(BrokerError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_disable_clears_cache() {
        let (service, _) = service_with(MockDirectory {
            primary: snapshot(&[("Alice", &["555-0001"])]),
            ..Default::default()
        });
        service.get_all_contacts().await.unwrap();
        assert_eq!(service.cache_stats().await.current_entries, 1);

        let config = service
            .update_cache_config(&CacheConfigUpdate {
                enabled: Some(false),
                ..Default::default()
            })
            .await;

        assert!(!config.enabled);
        assert_eq!(service.cache_stats().await.current_entries, 0);
    }

    #[tokio::test]
    async fn test_invalidate_forces_re_enumeration() {
        let (service, directory) = service_with(MockDirectory {
            primary: snapshot(&[("Alice", &["555-0001"])]),
            ..Default::default()
        });

        service.get_all_contacts().await.unwrap();
        service.invalidate_cache(None).await;
        service.get_all_contacts().await.unwrap();

        assert_eq!(directory.primary_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_shutdown_clears_state() {
        let (service, _) = service_with(MockDirectory {
            primary: snapshot(&[("Alice", &["555-0001"])]),
            ..Default::default()
        });
        service.get_all_contacts().await.unwrap();

        service.shutdown().await;

        assert_eq!(service.cache_stats().await.current_entries, 0);
    }
}
