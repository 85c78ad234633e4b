//! Identity models: OTP login, Aadhaar KYC and the farmer profile

use serde::{Deserialize, Serialize};

use super::ApplicationStatus;

/// User record known to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub name: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(
        rename = "hasCompletedKYC",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub has_completed_kyc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
}

/// Answer to a "does this mobile number exist" lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLookup {
    pub exists: bool,
    pub user_data: Option<UserData>,
}

/// Success payload that only carries a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

/// Successful login OTP verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerification {
    pub token: String,
    pub is_new_user: bool,
    pub user_data: UserData,
}

/// Aadhaar OTP dispatched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarOtpSent {
    pub transaction_id: String,
    pub message: String,
}

/// Identity details returned by a successful Aadhaar verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycRecord {
    pub name: String,
    pub father_name: String,
    pub address: String,
    /// Masked, only the last four digits are visible
    pub aadhaar_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycVerification {
    pub user_data: KycRecord,
}

/// Farmer profile as held by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    pub name: String,
    pub father_name: String,
    pub mobile: String,
    pub aadhaar_number: String,
    pub application_status: ApplicationStatus,
    #[serde(rename = "hasCompletedKYC")]
    pub has_completed_kyc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerProfileData {
    pub data: FarmerProfile,
}
