//! Remote service models

pub mod application;
pub mod land;
pub mod user;

use serde::{Serialize, Serializer};

// Re-export for convenience
pub use application::{Application, ApplicationStatus, ClaimReceipt, ClaimRequest};
pub use land::{GeoJson, LandBucket, LandBuckets, LandParcel, LandRecord, LandSearch, LandSearchResult};
pub use user::{
    Acknowledgement, AadhaarOtpSent, FarmerProfile, FarmerProfileData, KycRecord, KycVerification,
    OtpVerification, UserData, UserLookup,
};

/// Result of a remote call that produced an answer
///
/// Serializes as `{"success": true, ...data}` or
/// `{"success": false, "message": ..., "code": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse<T> {
    Success(T),
    Failure {
        message: String,
        code: Option<String>,
    },
}

impl<T> ServiceResponse<T> {
    /// Failed response with a human-readable message
    pub fn failure(message: impl Into<String>) -> Self {
        ServiceResponse::Failure {
            message: message.into(),
            code: None,
        }
    }

    /// Failed response with a message and a machine-readable code
    pub fn failure_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        ServiceResponse::Failure {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ServiceResponse::Success(_))
    }

    /// Payload of a successful response
    pub fn data(&self) -> Option<&T> {
        match self {
            ServiceResponse::Success(data) => Some(data),
            ServiceResponse::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ServiceResponse::Success(data) => Some(data),
            ServiceResponse::Failure { .. } => None,
        }
    }

    /// Message of a failed response
    pub fn message(&self) -> Option<&str> {
        match self {
            ServiceResponse::Success(_) => None,
            ServiceResponse::Failure { message, .. } => Some(message),
        }
    }
}

impl<T: Serialize> Serialize for ServiceResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Envelope<'a, T> {
            success: bool,
            #[serde(flatten)]
            data: Option<&'a T>,
            #[serde(skip_serializing_if = "Option::is_none")]
            message: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            code: Option<&'a str>,
        }

        let envelope = match self {
            ServiceResponse::Success(data) => Envelope {
                success: true,
                data: Some(data),
                message: None,
                code: None,
            },
            ServiceResponse::Failure { message, code } => Envelope {
                success: false,
                data: None,
                message: Some(message.as_str()),
                code: code.as_deref(),
            },
        };
        envelope.serialize(serializer)
    }
}
