//! Custom error types for the common library
//!
//! This module defines the error type returned by every key-value store
//! backend. A missing key is never an error: backends report it as `None`.

use thiserror::Error;

/// Custom error type for key-value store operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error occurred while reading or writing the backing file
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error returned by the Redis server or client
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The store refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Storage configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;
