//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL and janitor-based reclamation.

mod entry;
mod expiring;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use entry::CacheEntry;
pub use expiring::ExpiringCache;
pub use stats::{CacheStats, StatsCounters};
pub use store::CacheStore;

// == Public Constants ==
/// Smallest sweep interval; a zero interval is raised to this
pub const MIN_CLEANUP_INTERVAL: Duration = Duration::from_millis(1);
