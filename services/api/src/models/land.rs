//! Land parcel models

use serde::{Deserialize, Serialize};

/// GeoJSON geometry. Positions are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJson {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl GeoJson {
    /// Polygon with a single outer ring
    pub fn polygon(ring: Vec<[f64; 2]>) -> Self {
        Self {
            kind: "Polygon".to_string(),
            coordinates: vec![ring],
        }
    }

    /// Mean position of the outer ring as `[longitude, latitude]`
    ///
    /// A closed ring repeats its first position at the end; the repeat is
    /// not counted twice.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        let ring = self.coordinates.first()?;
        let points = match ring.as_slice() {
            [first, rest @ .., last] if !rest.is_empty() && first == last => &ring[..ring.len() - 1],
            _ => ring.as_slice(),
        };
        if points.is_empty() {
            return None;
        }

        let count = points.len() as f64;
        let (lng, lat) = points
            .iter()
            .fold((0.0, 0.0), |(lng, lat), p| (lng + p[0], lat + p[1]));
        Some([lng / count, lat / count])
    }
}

/// Revenue-record details shared by buckets and search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandRecord {
    pub village: String,
    pub tehsil: String,
    pub district: String,
    pub survey_no: String,
    pub area: String,
    pub owner_name: String,
    pub land_type: String,
    pub geo_json: GeoJson,
}

/// Parcel pre-associated with the farmer, available to claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandBucket {
    pub bucket_id: String,
    #[serde(flatten)]
    pub record: LandRecord,
}

/// Parcel found by a manual search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandParcel {
    pub land_id: String,
    #[serde(flatten)]
    pub record: LandRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandBuckets {
    pub buckets: Vec<LandBucket>,
}

/// Manual land search criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandSearch {
    pub village_id: String,
    pub survey_no: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandSearchResult {
    pub land_details: LandParcel,
}
