//! User profile record

use api::models::{KycRecord, UserData};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::Role;

/// Profile of the signed-in user
///
/// Persisted as JSON under `userProfile`. Fields this type does not know
/// about are kept in `extra` so they survive being read and written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Masked Aadhaar number from KYC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhaar_number: Option<String>,
    #[serde(
        rename = "hasCompletedKYC",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub has_completed_kyc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Profile with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Copy identity details from a completed Aadhaar verification
    pub fn apply_kyc(&mut self, record: &KycRecord) {
        self.name = record.name.clone();
        self.father_name = Some(record.father_name.clone());
        self.address = Some(record.address.clone());
        self.aadhaar_number = Some(record.aadhaar_number.clone());
        self.has_completed_kyc = Some(true);
    }
}

impl From<UserData> for UserProfile {
    fn from(data: UserData) -> Self {
        let role = data.role.as_deref().and_then(|role| match role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                warn!("Ignoring role from backend: {}", e);
                None
            }
        });

        Self {
            name: data.name,
            mobile: Some(data.mobile),
            role,
            has_completed_kyc: data.has_completed_kyc,
            registration_date: data.registration_date,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = json!({
            "name": "Asha",
            "mobile": "9999999999",
            "village": "Bellur",
            "hasCompletedKYC": true
        });

        let profile: UserProfile = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.has_completed_kyc, Some(true));
        assert_eq!(profile.extra.get("village"), Some(&json!("Bellur")));

        assert_eq!(serde_json::to_value(&profile).unwrap(), raw);
    }

    #[test]
    fn test_from_backend_user() {
        let data = UserData {
            name: "Another User".to_string(),
            mobile: "8888888888".to_string(),
            role: Some("sahayak".to_string()),
            has_completed_kyc: Some(false),
            registration_date: Some("2024-02-01".to_string()),
        };

        let profile = UserProfile::from(data);
        assert_eq!(profile.role, Some(Role::Sahayak));
        assert_eq!(profile.mobile.as_deref(), Some("8888888888"));
        assert_eq!(profile.has_completed_kyc, Some(false));
    }

    #[test]
    fn test_apply_kyc() {
        let mut profile = UserProfile::new("New User").with_mobile("7777777777");
        profile.apply_kyc(&KycRecord {
            name: "John Doe".to_string(),
            father_name: "Father Name".to_string(),
            address: "123 Test Street".to_string(),
            aadhaar_number: "************1234".to_string(),
        });

        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.mobile.as_deref(), Some("7777777777"));
        assert_eq!(profile.has_completed_kyc, Some(true));
    }
}
