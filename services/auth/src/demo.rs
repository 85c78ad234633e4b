//! Scripted walk through the farmer journey
//!
//! Drives the session layer and the remote stubs in the order the screens
//! do: onboarding, OTP login, Aadhaar KYC, land claim, logout. Used by the
//! binary and by the end-to-end tests.

use anyhow::{Result, bail};
use api::RemoteServices;
use api::models::{ClaimRequest, ServiceResponse};
use api::services::auth::TEST_OTP;
use api::services::kyc::TEST_AADHAAR_OTP;
use tracing::info;

use crate::models::{Language, Role, UserProfile};
use crate::session::AuthManager;
use crate::validation;

/// Inputs typed by the user along the way
#[derive(Debug, Clone)]
pub struct DemoInput {
    pub language: Language,
    pub role: Role,
    pub mobile: String,
    pub otp: String,
    pub aadhaar_number: String,
    pub aadhaar_otp: String,
}

impl Default for DemoInput {
    fn default() -> Self {
        Self {
            language: Language::Hi,
            role: Role::Farmer,
            mobile: "9999999999".to_string(),
            otp: TEST_OTP.to_string(),
            aadhaar_number: "123412341234".to_string(),
            aadhaar_otp: TEST_AADHAAR_OTP.to_string(),
        }
    }
}

/// What the journey produced
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub is_new_user: bool,
    pub profile: UserProfile,
    pub application_id: String,
    pub total_lands: usize,
}

fn require<T>(response: ServiceResponse<T>, step: &str) -> Result<T> {
    match response {
        ServiceResponse::Success(data) => Ok(data),
        ServiceResponse::Failure { message, .. } => bail!("{step} failed: {message}"),
    }
}

/// Run the journey and log out at the end
pub async fn run(
    session: &AuthManager,
    services: &RemoteServices,
    input: &DemoInput,
) -> Result<DemoReport> {
    session.complete_onboarding().await?;
    session.set_language_to(input.language).await?;
    info!(
        "Interface language: {} ({})",
        input.language.name(),
        input.language.native_name()
    );

    validation::validate_mobile_number(&input.mobile).map_err(anyhow::Error::msg)?;
    let sent = services
        .auth
        .send_otp(&input.mobile, input.role.as_str())
        .await?;
    info!("{}", require(sent, "Sending OTP")?.message);

    validation::validate_otp(&input.otp).map_err(anyhow::Error::msg)?;
    let verified = require(
        services.auth.verify_otp(&input.mobile, &input.otp).await?,
        "OTP verification",
    )?;
    session
        .login(
            &verified.token,
            input.role,
            Some(UserProfile::from(verified.user_data)),
        )
        .await?;
    info!("Signed in as {}", input.role);

    validation::validate_aadhaar_number(&input.aadhaar_number).map_err(anyhow::Error::msg)?;
    let transaction = require(
        services.kyc.send_aadhaar_otp(&input.aadhaar_number).await?,
        "Sending Aadhaar OTP",
    )?
    .transaction_id;

    validation::validate_otp(&input.aadhaar_otp).map_err(anyhow::Error::msg)?;
    let kyc = require(
        services
            .kyc
            .verify_aadhaar_otp(&transaction, &input.aadhaar_otp)
            .await?,
        "Aadhaar verification",
    )?;

    let mut profile = session.state().user.unwrap_or_default();
    profile.apply_kyc(&kyc.user_data);
    session.update_user(profile.clone()).await?;
    info!("KYC completed for {}", profile.name);

    let buckets = require(services.land.get_land_buckets().await?, "Listing land")?.buckets;
    validation::validate_claim_selection(buckets.len()).map_err(anyhow::Error::msg)?;

    let claim = ClaimRequest {
        claimed_buckets: buckets.into_iter().map(|bucket| bucket.bucket_id).collect(),
        added_lands: Vec::new(),
    };
    let receipt = require(
        services.applications.claim_lands(claim).await?,
        "Claiming land",
    )?;

    let application = require(
        services.applications.get_application_status().await?,
        "Reading application status",
    )?;
    info!(
        "Application {} is {:?} with {} lands",
        application.application_id, application.status, application.total_lands
    );

    session.logout().await?;

    Ok(DemoReport {
        is_new_user: verified.is_new_user,
        profile,
        application_id: receipt.application_id,
        total_lands: receipt.total_lands,
    })
}
