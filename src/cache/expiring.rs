//! Expiring Cache Module
//!
//! Thread-safe handle combining the store, its reader/writer lock and the
//! background janitor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{CacheStats, CacheStore, MIN_CLEANUP_INTERVAL};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_cleanup_task;

// == Expiring Cache ==
/// In-memory cache with a per-entry TTL and a background janitor.
///
/// Lookups take a shared read lock and never remove anything; an expired
/// entry is simply reported as absent. Expired entries are physically
/// deleted by a janitor task that sweeps the whole map every cleanup
/// interval, so at most one interval's worth of expired garbage is retained
/// regardless of read traffic.
///
/// Call [`close`](Self::close) before discarding the cache to stop the
/// janitor and wait for it. Dropping the cache without closing still signals
/// the janitor, which then exits on its own without being awaited.
///
/// # Example
/// ```rust,no_run
/// use expiring_cache::ExpiringCache;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let cache = ExpiringCache::new(Duration::from_secs(1));
///     cache.set("session", Duration::from_secs(30), 42u64).await;
///     assert_eq!(cache.get("session").await, Some(42));
///     cache.close().await;
/// }
/// ```
#[derive(Debug)]
pub struct ExpiringCache<T> {
    store: Arc<RwLock<CacheStore<T>>>,
    cleanup_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    /// Janitor handle, cleared only once the task has exited
    janitor: Mutex<Option<JoinHandle<()>>>,
    /// Mirrors `janitor.is_none()`; written under the `janitor` lock
    closed: AtomicBool,
}

impl<T> ExpiringCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache whose janitor sweeps every `cleanup_interval`.
    ///
    /// A zero interval is raised to [`MIN_CLEANUP_INTERVAL`].
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context, since the janitor
    /// has to be spawned on one. Use [`try_new`](Self::try_new) to get an
    /// error instead.
    pub fn new(cleanup_interval: Duration) -> Self {
        match Self::try_new(cleanup_interval) {
            Ok(cache) => cache,
            Err(err) => panic!(
                "ExpiringCache::new must be called from within a Tokio runtime: {}",
                err
            ),
        }
    }

    /// Creates a cache, returning [`CacheError::RuntimeUnavailable`] when no
    /// Tokio runtime is running on the current thread.
    pub fn try_new(cleanup_interval: Duration) -> Result<Self> {
        tokio::runtime::Handle::try_current().map_err(|_| CacheError::RuntimeUnavailable)?;

        let cleanup_interval = if cleanup_interval.is_zero() {
            warn!(
                "Cleanup interval of zero requested, using {:?}",
                MIN_CLEANUP_INTERVAL
            );
            MIN_CLEANUP_INTERVAL
        } else {
            cleanup_interval
        };

        let store = Arc::new(RwLock::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let janitor = spawn_cleanup_task(store.clone(), cleanup_interval, shutdown_rx);

        Ok(Self {
            store,
            cleanup_interval,
            shutdown_tx,
            janitor: Mutex::new(Some(janitor)),
            closed: AtomicBool::new(false),
        })
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// # Panics
    ///
    /// Panics outside a Tokio runtime, like [`new`](Self::new).
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.cleanup_interval)
    }

    // == Set ==
    /// Stores `value` under `key`, live for `ttl` from now.
    ///
    /// Overwrites any existing entry and resets its expiry. A zero TTL stores
    /// an entry that is already expired.
    pub async fn set(&self, key: impl Into<String>, ttl: Duration, value: T) {
        self.store.write().await.set(key.into(), ttl, value);
    }

    // == Get ==
    /// Returns a clone of the live value under `key`.
    ///
    /// `None` covers both absent and expired keys. The entry is not removed.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.store.read().await.get(key)
    }

    // == Delete ==
    /// Removes `key`, returning whether an entry (live or expired) was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Cleanup Expired ==
    /// Runs one sweep right away, returning the number of entries removed.
    ///
    /// This is the only reclamation left once the cache is closed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    // == Introspection ==
    /// Number of entries physically held, expired-but-unswept included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// The effective sweep interval.
    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }
}

impl<T> ExpiringCache<T> {
    // == Close ==
    /// Stops the janitor and waits until it has fully exited.
    ///
    /// Once this returns no background task touches the map again. Calling it
    /// more than once is harmless: later callers wait for the first close to
    /// finish and then return. The cache stays usable afterwards, but expired
    /// entries are only reclaimed through
    /// [`cleanup_expired`](ExpiringCache::cleanup_expired).
    ///
    /// Cancel safe: if this future is dropped before the janitor exits, the
    /// handle stays in place and the next `close` waits for it.
    pub async fn close(&self) {
        let mut janitor = self.janitor.lock().await;
        let Some(handle) = janitor.as_mut() else {
            return;
        };

        self.shutdown_tx.send_replace(true);
        let result = handle.await;
        *janitor = None;
        self.closed.store(true, Ordering::Release);

        match result {
            Ok(()) => info!("Expiring cache closed"),
            Err(err) => warn!("Cleanup task ended abnormally: {}", err),
        }
    }

    /// Whether [`close`](Self::close) has completed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
