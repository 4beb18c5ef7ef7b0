//! Cache Sweeper Task
//!
//! Background task that periodically purges expired snapshots and enforces
//! the cache memory ceiling outside of request paths. Without it, a cache
//! that stops being queried would hold stale or oversized data indefinitely.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ContactCache;

/// Spawns a background task that periodically runs the store's cleanup.
///
/// The task sleeps for the configured interval between sweeps, taking the
/// store write lock only for the duration of each cleanup call. The
/// returned handle is used to abort the task when the cache is disabled,
/// reconfigured, or shut down; the owner must abort any previous handle
/// before spawning a replacement so two sweeps never run concurrently.
///
/// # Arguments
/// * `cache` - Shared reference to the contact cache
/// * `interval_ms` - Interval in milliseconds between sweeps
pub fn spawn_sweeper(cache: Arc<RwLock<ContactCache>>, interval_ms: u64) -> JoinHandle<()> {
    let interval = Duration::from_millis(interval_ms);

    tokio::spawn(async move {
        info!("starting cache sweeper with interval of {} ms", interval_ms);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup()
            };

            if removed > 0 {
                info!("cache sweep removed {} entries", removed);
            } else {
                debug!("cache sweep found nothing to remove");
            }
        }
    })
}
