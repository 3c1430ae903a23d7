//! Expiring Cache - an embeddable in-memory key-value cache
//!
//! Stores values of one type under string keys, each with its own TTL, and
//! reclaims expired entries with a periodic background janitor.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, ExpiringCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
