//! Farmer profile lookup

use std::time::Duration;

use crate::models::{ApplicationStatus, FarmerProfile, FarmerProfileData, ServiceResponse};
use crate::{ApiResult, ServiceConfig, simulate};

const PROFILE_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct FarmerService {
    config: ServiceConfig,
}

impl FarmerService {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Profile of the signed-in farmer
    pub async fn get_farmer_profile(&self) -> ApiResult<ServiceResponse<FarmerProfileData>> {
        simulate(&self.config, "get_farmer_profile", PROFILE_LATENCY, async {
            ServiceResponse::Success(FarmerProfileData {
                data: FarmerProfile {
                    name: "John Doe".to_string(),
                    father_name: "Father Name".to_string(),
                    mobile: "9999999999".to_string(),
                    aadhaar_number: "************1234".to_string(),
                    application_status: ApplicationStatus::NotSubmitted,
                    has_completed_kyc: true,
                },
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_profile_shape() -> ApiResult<()> {
        let response = FarmerService::new(ServiceConfig::instant())
            .get_farmer_profile()
            .await?;

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["applicationStatus"], "NOT_SUBMITTED");
        assert_eq!(value["data"]["hasCompletedKYC"], true);
        Ok(())
    }
}
