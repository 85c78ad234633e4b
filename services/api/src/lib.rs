//! Remote service stubs for FarmApp
//!
//! Stand-ins for the future backend: OTP login, Aadhaar KYC, the farmer
//! profile, land search and land claim applications. Every call answers from
//! literal demo data after a simulated network delay, and is bounded by a
//! timeout so a hung call surfaces as [`ApiError::Timeout`] instead of
//! stalling the caller.
//!
//! Calls are at-most-once: there is no retry, backoff or deduplication.

pub mod error;
pub mod models;
pub mod services;

use std::future::Future;
use std::time::Duration;
use tracing::warn;

pub use error::{ApiError, ApiResult};
pub use models::ServiceResponse;
pub use services::{
    ApplicationService, AuthService, FarmerService, KycService, LandService, RemoteServices,
};

/// Demo switches for the land and application stubs
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Report an already submitted application before any claim is made
    pub has_existing_application: bool,
    /// Return land buckets for the farmer; `false` returns an empty list
    pub user_has_land_buckets: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            has_existing_application: false,
            user_has_land_buckets: true,
        }
    }
}

/// Remote service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Sleep for each call's simulated latency before answering
    pub simulate_latency: bool,
    /// Upper bound on a single call, simulated latency included
    pub timeout: Duration,
    pub demo: DemoConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            timeout: Duration::from_secs(10),
            demo: DemoConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Configuration that answers immediately, for tests and scripted flows
    pub fn instant() -> Self {
        Self {
            simulate_latency: false,
            ..Self::default()
        }
    }
}

/// Run `call` after the simulated `latency`, bounded by the configured timeout
pub(crate) async fn simulate<T, F>(
    config: &ServiceConfig,
    operation: &'static str,
    latency: Duration,
    call: F,
) -> ApiResult<T>
where
    F: Future<Output = T>,
{
    let work = async {
        if config.simulate_latency {
            tokio::time::sleep(latency).await;
        }
        call.await
    };

    tokio::time::timeout(config.timeout, work)
        .await
        .map_err(|_| {
            warn!("{} timed out after {:?}", operation, config.timeout);
            ApiError::Timeout {
                operation,
                after: config.timeout,
            }
        })
}

/// Current time in milliseconds, used to mint demo identifiers
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
