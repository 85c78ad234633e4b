//! Mobile number OTP login

use std::time::Duration;
use tracing::info;

use crate::models::{Acknowledgement, OtpVerification, ServiceResponse, UserData, UserLookup};
use crate::{ApiResult, ServiceConfig, now_millis, simulate};

/// OTP accepted by the stub
pub const TEST_OTP: &str = "123456";

const LOOKUP_LATENCY: Duration = Duration::from_millis(1000);
const SEND_OTP_LATENCY: Duration = Duration::from_millis(1500);
const VERIFY_OTP_LATENCY: Duration = Duration::from_millis(2000);

/// Users already registered with the backend
fn registered_user(mobile: &str) -> Option<UserData> {
    match mobile {
        "9999999999" => Some(UserData {
            name: "Existing User".to_string(),
            mobile: mobile.to_string(),
            role: Some("farmer".to_string()),
            has_completed_kyc: Some(true),
            registration_date: Some("2024-01-01".to_string()),
        }),
        "8888888888" => Some(UserData {
            name: "Another User".to_string(),
            mobile: mobile.to_string(),
            role: Some("sahayak".to_string()),
            has_completed_kyc: Some(false),
            registration_date: Some("2024-02-01".to_string()),
        }),
        _ => None,
    }
}

/// OTP login service
#[derive(Debug, Clone)]
pub struct AuthService {
    config: ServiceConfig,
}

impl AuthService {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Check if a mobile number is already registered
    pub async fn check_user_exists(&self, mobile: &str) -> ApiResult<UserLookup> {
        simulate(&self.config, "check_user_exists", LOOKUP_LATENCY, async {
            let user_data = registered_user(mobile);
            UserLookup {
                exists: user_data.is_some(),
                user_data,
            }
        })
        .await
    }

    /// Send a login OTP. The stub always succeeds.
    pub async fn send_otp(
        &self,
        mobile: &str,
        role: &str,
    ) -> ApiResult<ServiceResponse<Acknowledgement>> {
        simulate(&self.config, "send_otp", SEND_OTP_LATENCY, async {
            info!("Sending login OTP to {} for role {}", mobile, role);
            ServiceResponse::Success(Acknowledgement {
                message: "OTP sent successfully".to_string(),
            })
        })
        .await
    }

    /// Verify a login OTP and issue a session token
    pub async fn verify_otp(
        &self,
        mobile: &str,
        otp: &str,
    ) -> ApiResult<ServiceResponse<OtpVerification>> {
        simulate(&self.config, "verify_otp", VERIFY_OTP_LATENCY, async {
            if otp != TEST_OTP {
                return ServiceResponse::failure("Invalid OTP. Use 123456 for testing");
            }

            let existing = registered_user(mobile);
            let is_new_user = existing.is_none();
            let user_data = existing.unwrap_or_else(|| UserData {
                name: "New User".to_string(),
                mobile: mobile.to_string(),
                role: None,
                has_completed_kyc: None,
                registration_date: None,
            });

            info!("OTP verified for {} (new user: {})", mobile, is_new_user);
            ServiceResponse::Success(OtpVerification {
                token: format!("dummy_jwt_token_{}", now_millis()),
                is_new_user,
                user_data,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(ServiceConfig::instant())
    }

    #[tokio::test]
    async fn test_check_user_exists() -> ApiResult<()> {
        let lookup = service().check_user_exists("8888888888").await?;
        assert!(lookup.exists);
        assert_eq!(
            lookup.user_data.and_then(|user| user.role),
            Some("sahayak".to_string())
        );

        let lookup = service().check_user_exists("7777777777").await?;
        assert!(!lookup.exists);
        assert!(lookup.user_data.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_send_otp_always_succeeds() -> ApiResult<()> {
        let response = service().send_otp("7777777777", "farmer").await?;
        assert_eq!(
            response.data().map(|ack| ack.message.as_str()),
            Some("OTP sent successfully")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_verify_otp_for_existing_user() -> ApiResult<()> {
        let response = service().verify_otp("9999999999", TEST_OTP).await?;
        let verification = response.into_data().expect("verification should succeed");

        assert!(verification.token.starts_with("dummy_jwt_token_"));
        assert!(!verification.is_new_user);
        assert_eq!(verification.user_data.name, "Existing User");
        Ok(())
    }

    #[tokio::test]
    async fn test_verify_otp_for_new_user() -> ApiResult<()> {
        let response = service().verify_otp("7777777777", TEST_OTP).await?;
        let verification = response.into_data().expect("verification should succeed");

        assert!(verification.is_new_user);
        assert_eq!(verification.user_data.name, "New User");
        assert_eq!(verification.user_data.mobile, "7777777777");
        Ok(())
    }

    #[tokio::test]
    async fn test_verify_otp_rejects_wrong_code() -> ApiResult<()> {
        let response = service().verify_otp("9999999999", "000000").await?;
        assert!(!response.is_success());
        assert_eq!(
            response.message(),
            Some("Invalid OTP. Use 123456 for testing")
        );
        Ok(())
    }
}
