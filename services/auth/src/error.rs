//! Custom error types for the session layer

use common::StorageError;
use thiserror::Error;

/// Custom error type for session operations
#[derive(Error, Debug)]
pub enum AuthError {
    /// The persistent store rejected a read or write
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Another login, logout or profile update has not finished yet
    #[error("Another session operation is already in progress")]
    OperationInFlight,

    /// Login was attempted without a token
    #[error("Auth token must not be empty")]
    EmptyToken,

    /// Language code outside the supported set
    #[error("Unsupported language code: {0}")]
    InvalidLanguage(String),

    /// Role outside the supported set
    #[error("Unsupported role: {0}")]
    InvalidRole(String),
}

/// Type alias for session results
pub type AuthResult<T> = Result<T, AuthError>;
