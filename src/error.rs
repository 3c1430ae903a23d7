//! Error types for the cache
//!
//! Provides unified error handling using thiserror. A missing or expired key
//! is not an error; lookups report it through `Option`.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The cache was constructed outside a Tokio runtime, so the janitor
    /// task could not be spawned
    #[error("no Tokio runtime available to spawn the cleanup task")]
    RuntimeUnavailable,

    /// A configuration value could not be parsed
    #[error("invalid value {value:?} for {var}")]
    InvalidConfig { var: String, value: String },
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
