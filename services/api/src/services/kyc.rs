//! Aadhaar based KYC

use std::time::Duration;
use tracing::info;

use crate::models::{AadhaarOtpSent, KycRecord, KycVerification, ServiceResponse};
use crate::{ApiResult, ServiceConfig, now_millis, simulate};

/// Aadhaar OTP accepted by the stub
pub const TEST_AADHAAR_OTP: &str = "654321";

const SEND_OTP_LATENCY: Duration = Duration::from_millis(1500);
const VERIFY_OTP_LATENCY: Duration = Duration::from_millis(2000);

/// Aadhaar KYC service
#[derive(Debug, Clone)]
pub struct KycService {
    config: ServiceConfig,
}

impl KycService {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Send an OTP to the mobile number linked with an Aadhaar number
    pub async fn send_aadhaar_otp(
        &self,
        aadhaar_number: &str,
    ) -> ApiResult<ServiceResponse<AadhaarOtpSent>> {
        simulate(&self.config, "send_aadhaar_otp", SEND_OTP_LATENCY, async {
            let last_four = aadhaar_number
                .len()
                .checked_sub(4)
                .and_then(|start| aadhaar_number.get(start..))
                .unwrap_or("");
            info!("Sending Aadhaar OTP for ********{}", last_four);

            ServiceResponse::Success(AadhaarOtpSent {
                transaction_id: format!("dummy_txn_{}", now_millis()),
                message: "Aadhaar OTP sent successfully".to_string(),
            })
        })
        .await
    }

    /// Verify the Aadhaar OTP of a transaction
    pub async fn verify_aadhaar_otp(
        &self,
        transaction_id: &str,
        otp: &str,
    ) -> ApiResult<ServiceResponse<KycVerification>> {
        simulate(&self.config, "verify_aadhaar_otp", VERIFY_OTP_LATENCY, async {
            if otp != TEST_AADHAAR_OTP {
                return ServiceResponse::failure("Invalid Aadhaar OTP. Use 654321 for testing");
            }

            info!("Aadhaar OTP verified for transaction {}", transaction_id);
            ServiceResponse::Success(KycVerification {
                user_data: KycRecord {
                    name: "John Doe".to_string(),
                    father_name: "Father Name".to_string(),
                    address: "123 Test Street, Test City, Test State - 123456".to_string(),
                    aadhaar_number: "************1234".to_string(),
                },
            })
        })
        .await
    }
}
