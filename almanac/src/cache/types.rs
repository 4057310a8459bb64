//! Core types for the cache system.

use thiserror::Error;

/// Cache-related errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error during cache operations
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key escapes the cache root or contains invalid components
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}
