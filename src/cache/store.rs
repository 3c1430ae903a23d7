//! Cache Store Module
//!
//! HashMap storage with per-entry TTL. The store itself is not synchronized;
//! [`ExpiringCache`](crate::cache::ExpiringCache) wraps it in a reader/writer lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, StatsCounters};

// == Cache Store ==
/// Key-value storage with TTL expiry and activity counters.
#[derive(Debug)]
pub struct CacheStore<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Activity counters
    stats: StatsCounters,
}

impl<T> CacheStore<T> {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: StatsCounters::new(),
        }
    }

    // == Set ==
    /// Stores a value under `key`, expiring `ttl` from now.
    ///
    /// If the key already exists, the value is overwritten and its expiry reset.
    pub fn set(&mut self, key: String, ttl: Duration, value: T) {
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are reported as misses but left in place; removing
    /// them is the sweep's job.
    pub fn get(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key, returning whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes every entry expired as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.record_sweep(removed);
        removed
    }

    /// Removes every entry expired as of now.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Instant::now())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Length ==
    /// Returns the number of entries physically held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for CacheStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const LONG_TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), LONG_TTL, "value1".to_string());

        assert_eq!(store.get("key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store: CacheStore<String> = CacheStore::new();

        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), LONG_TTL, 1u8);
        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));

        assert!(store.is_empty());
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_overwrite_resets_expiry() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), Duration::from_millis(20), "value1");
        store.set("key1".to_string(), LONG_TTL, "value2");

        sleep(Duration::from_millis(40));

        assert_eq!(store.get("key1"), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_zero_ttl_never_retrievable() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), Duration::ZERO, "value1");

        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_get_does_not_remove_expired() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), Duration::from_millis(10), "value1");
        sleep(Duration::from_millis(30));

        assert!(store.get("key1").is_none());
        // Still physically present until a sweep runs
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), LONG_TTL, "value1");
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new();

        store.set("key1".to_string(), Duration::from_millis(10), "value1");
        store.set("key2".to_string(), LONG_TTL, "value2");

        sleep(Duration::from_millis(30));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key2"), Some("value2"));

        let stats = store.stats();
        assert_eq!(stats.sweeps, 1);
        assert_eq!(stats.expired_removed, 1);
    }

    #[test]
    fn test_store_cleanup_at_boundary() {
        let mut store = CacheStore::new();
        store.set("key1".to_string(), Duration::from_secs(5), "value1");

        let now = Instant::now();
        assert_eq!(store.cleanup_expired_at(now), 0);
        assert_eq!(store.cleanup_expired_at(now + Duration::from_secs(6)), 1);
        assert!(store.is_empty());
    }
}
