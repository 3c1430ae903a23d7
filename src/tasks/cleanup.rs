//! TTL Cleanup Task
//!
//! Background janitor that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::{CacheStore, MIN_CLEANUP_INTERVAL};

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// Every `interval` the task acquires the write lock on the store and removes
/// expired entries. It exits when `true` is sent on `shutdown` or when the
/// sender is dropped.
///
/// # Arguments
/// * `cache` - Shared reference to the store
/// * `interval` - Time between sweeps, raised to `MIN_CLEANUP_INTERVAL` if zero
/// * `shutdown` - Receiver of the shutdown signal
///
/// # Returns
/// A JoinHandle that completes once the janitor has stopped.
///
/// # Example
/// ```ignore
/// let (tx, rx) = watch::channel(false);
/// let handle = spawn_cleanup_task(store.clone(), Duration::from_secs(1), rx);
/// // Later:
/// tx.send_replace(true);
/// handle.await?;
/// ```
pub fn spawn_cleanup_task<T>(
    cache: Arc<RwLock<CacheStore<T>>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    let interval = interval.max(MIN_CLEANUP_INTERVAL);

    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; the first sweep waits a full interval
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    // Err means every sender is gone
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = {
                        let mut cache_guard = cache.write().await;
                        cache_guard.cleanup_expired()
                    };

                    if removed > 0 {
                        info!("TTL cleanup: removed {} expired entries", removed);
                    } else {
                        debug!("TTL cleanup: no expired entries found");
                    }
                }
            }
        }

        info!("TTL cleanup task stopped");
    })
}
