//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::{CacheError, Result};

/// Environment variable holding the janitor interval in milliseconds.
pub const CLEANUP_INTERVAL_ENV: &str = "CACHE_CLEANUP_INTERVAL_MS";

/// Default janitor interval.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(1);

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How often the background janitor sweeps expired entries
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds (default: 1000)
    ///
    /// Unparsable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let cleanup_interval = match env::var(CLEANUP_INTERVAL_ENV) {
            Ok(raw) => Self::parse_interval_ms(&raw).unwrap_or_else(|err| {
                warn!("{}, using default {:?}", err, DEFAULT_CLEANUP_INTERVAL);
                DEFAULT_CLEANUP_INTERVAL
            }),
            Err(_) => DEFAULT_CLEANUP_INTERVAL,
        };

        Self { cleanup_interval }
    }

    /// Parses a millisecond count as used by `CACHE_CLEANUP_INTERVAL_MS`.
    pub fn parse_interval_ms(raw: &str) -> Result<Duration> {
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| CacheError::InvalidConfig {
                var: CLEANUP_INTERVAL_ENV.to_string(),
                value: raw.to_string(),
            })
    }

    /// Returns a copy with a different cleanup interval.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.cleanup_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_with_cleanup_interval() {
        let config = CacheConfig::default().with_cleanup_interval(Duration::from_millis(5));
        assert_eq!(config.cleanup_interval, Duration::from_millis(5));
    }

    #[test]
    fn test_parse_interval_ms() {
        assert_eq!(
            CacheConfig::parse_interval_ms("250").unwrap(),
            Duration::from_millis(250)
        );
        assert_eq!(
            CacheConfig::parse_interval_ms(" 0 ").unwrap(),
            Duration::ZERO
        );
        assert!(matches!(
            CacheConfig::parse_interval_ms("-5"),
            Err(CacheError::InvalidConfig { .. })
        ));
        assert!(matches!(
            CacheConfig::parse_interval_ms("soon"),
            Err(CacheError::InvalidConfig { .. })
        ));
    }

    // Single test touches the environment so parallel tests cannot race on it.
    #[test]
    fn test_config_from_env() {
        env::remove_var(CLEANUP_INTERVAL_ENV);
        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        env::set_var(CLEANUP_INTERVAL_ENV, "40");
        assert_eq!(
            CacheConfig::from_env().cleanup_interval,
            Duration::from_millis(40)
        );

        env::set_var(CLEANUP_INTERVAL_ENV, "not-a-number");
        assert_eq!(
            CacheConfig::from_env().cleanup_interval,
            DEFAULT_CLEANUP_INTERVAL
        );

        env::remove_var(CLEANUP_INTERVAL_ENV);
    }
}
