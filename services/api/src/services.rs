//! Remote service stubs

pub mod application;
pub mod auth;
pub mod farmer;
pub mod kyc;
pub mod land;

use crate::ServiceConfig;

// Re-export for convenience
pub use application::ApplicationService;
pub use auth::AuthService;
pub use farmer::FarmerService;
pub use kyc::KycService;
pub use land::LandService;

/// Every remote service, built from one configuration
#[derive(Clone)]
pub struct RemoteServices {
    pub auth: AuthService,
    pub kyc: KycService,
    pub farmer: FarmerService,
    pub land: LandService,
    pub applications: ApplicationService,
}

impl RemoteServices {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            auth: AuthService::new(config.clone()),
            kyc: KycService::new(config.clone()),
            farmer: FarmerService::new(config.clone()),
            land: LandService::new(config.clone()),
            applications: ApplicationService::new(config),
        }
    }
}
