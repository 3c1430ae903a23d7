//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Insertion time on the monotonic clock
    pub created_at: Instant,
    /// Expiration instant, None = TTL too large for the clock to represent
    pub expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// A zero TTL produces an entry that is already expired.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time-to-live measured from now
    pub fn new(value: T, ttl: Duration) -> Self {
        let now = Instant::now();

        Self {
            value,
            created_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at the given instant.
    ///
    /// Boundary condition: an entry is live strictly before its expiration
    /// instant and expired from that instant on.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks if the entry has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if the entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry is still live
    /// - `None` if the TTL overflowed the clock
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
