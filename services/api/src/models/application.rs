//! Land claim application models

use serde::{Deserialize, Serialize};

use super::LandParcel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    NotSubmitted,
    Submitted,
}

/// Lands the farmer wants to claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    /// Ids of the selected land buckets
    #[serde(default)]
    pub claimed_buckets: Vec<String>,
    /// Parcels added through manual search
    #[serde(default)]
    pub added_lands: Vec<LandParcel>,
}

impl ClaimRequest {
    pub fn total_lands(&self) -> usize {
        self.claimed_buckets.len() + self.added_lands.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    pub application_id: String,
    pub message: String,
    pub total_lands: usize,
}

/// Submitted land claim application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub status: ApplicationStatus,
    pub application_id: String,
    /// `YYYY-MM-DD`
    pub submitted_date: String,
    /// `YYYY-MM-DD`
    pub last_updated: String,
    pub total_lands: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claimed_buckets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added_lands: Vec<LandParcel>,
}
