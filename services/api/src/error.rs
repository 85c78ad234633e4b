//! Custom error types for the remote service stubs

use std::time::Duration;
use thiserror::Error;

/// Custom error type for remote service calls
///
/// A rejected request (wrong OTP, unknown survey number) is not an error: it
/// comes back as a failed [`crate::models::ServiceResponse`]. Errors are
/// reserved for calls that never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The call did not complete within the configured timeout
    #[error("{operation} timed out after {}ms", .after.as_millis())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
