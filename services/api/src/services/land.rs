//! Land bucket listing and manual land search

use std::time::Duration;
use tracing::info;

use crate::models::{
    GeoJson, LandBucket, LandBuckets, LandParcel, LandRecord, LandSearch, LandSearchResult,
    ServiceResponse,
};
use crate::{ApiResult, ServiceConfig, simulate};

const BUCKETS_LATENCY: Duration = Duration::from_millis(1500);
const SEARCH_LATENCY: Duration = Duration::from_millis(2000);

/// Axis-aligned square-ish ring starting at `(lng, lat)`, closed
fn ring(lng: f64, lat: f64, width: f64, height: f64) -> Vec<[f64; 2]> {
    vec![
        [lng, lat],
        [lng + width, lat],
        [lng + width, lat + height],
        [lng, lat + height],
        [lng, lat],
    ]
}

fn record(
    village: &str,
    tehsil: &str,
    district: &str,
    survey_no: &str,
    area: &str,
    geo_json: GeoJson,
) -> LandRecord {
    LandRecord {
        village: village.to_string(),
        tehsil: tehsil.to_string(),
        district: district.to_string(),
        survey_no: survey_no.to_string(),
        area: area.to_string(),
        owner_name: "John Doe".to_string(),
        land_type: "Agricultural".to_string(),
        geo_json,
    }
}

/// Parcels on record, keyed by survey number
fn land_records() -> Vec<LandRecord> {
    vec![
        record(
            "Kadaganchi",
            "Haveri",
            "Haveri",
            "123/4",
            "2.5 acres",
            GeoJson::polygon(ring(75.1230, 14.4560, 0.0010, 0.0010)),
        ),
        record(
            "Bellur",
            "Haveri",
            "Haveri",
            "456/7",
            "3.2 acres",
            GeoJson::polygon(ring(75.1250, 14.4580, 0.0020, 0.0020)),
        ),
        record(
            "Honnali",
            "Honnali",
            "Davangere",
            "789/1",
            "1.8 acres",
            GeoJson::polygon(ring(75.1300, 14.4620, 0.0015, 0.0015)),
        ),
        record(
            "Test Village",
            "Test Tehsil",
            "Test District",
            "999/1",
            "4.0 acres",
            GeoJson::polygon(ring(75.1350, 14.4650, 0.0020, 0.0020)),
        ),
    ]
}

/// Land ids are derived from the survey number: `123/4` becomes `land_123_4`
fn land_id(survey_no: &str) -> String {
    format!("land_{}", survey_no.replace('/', "_"))
}

#[derive(Debug, Clone)]
pub struct LandService {
    config: ServiceConfig,
}

impl LandService {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Parcels associated with the farmer that can be claimed
    ///
    /// The last record on file is only reachable through manual search.
    pub async fn get_land_buckets(&self) -> ApiResult<ServiceResponse<LandBuckets>> {
        let has_buckets = self.config.demo.user_has_land_buckets;
        simulate(&self.config, "get_land_buckets", BUCKETS_LATENCY, async move {
            let buckets: Vec<LandBucket> = if has_buckets {
                land_records()
                    .into_iter()
                    .take(3)
                    .enumerate()
                    .map(|(i, record)| LandBucket {
                        bucket_id: format!("bucket_{}", i + 1),
                        record,
                    })
                    .collect()
            } else {
                Vec::new()
            };
            ServiceResponse::Success(LandBuckets { buckets })
        })
        .await
    }

    /// Look up a parcel by survey number
    ///
    /// `village_id` is accepted but not used for matching.
    pub async fn search_land(
        &self,
        search: &LandSearch,
    ) -> ApiResult<ServiceResponse<LandSearchResult>> {
        simulate(&self.config, "search_land", SEARCH_LATENCY, async {
            info!(
                "Searching land in {} with survey number {}",
                search.village_id, search.survey_no
            );

            match land_records()
                .into_iter()
                .find(|record| record.survey_no == search.survey_no)
            {
                Some(record) => ServiceResponse::Success(LandSearchResult {
                    land_details: LandParcel {
                        land_id: land_id(&record.survey_no),
                        record,
                    },
                }),
                None => ServiceResponse::failure(
                    "Land parcel not found. Please check the survey number.",
                ),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DemoConfig;

    fn search(survey_no: &str) -> LandSearch {
        LandSearch {
            village_id: "Bellur".to_string(),
            survey_no: survey_no.to_string(),
        }
    }

    #[tokio::test]
    async fn test_buckets_listed() -> ApiResult<()> {
        let service = LandService::new(ServiceConfig::instant());
        let buckets = service
            .get_land_buckets()
            .await?
            .into_data()
            .expect("listing should succeed")
            .buckets;

        let ids: Vec<&str> = buckets.iter().map(|b| b.bucket_id.as_str()).collect();
        assert_eq!(ids, vec!["bucket_1", "bucket_2", "bucket_3"]);
        assert_eq!(buckets[2].record.district, "Davangere");
        Ok(())
    }

    #[tokio::test]
    async fn test_no_buckets_when_disabled() -> ApiResult<()> {
        let config = ServiceConfig {
            demo: DemoConfig {
                user_has_land_buckets: false,
                ..DemoConfig::default()
            },
            ..ServiceConfig::instant()
        };
        let response = LandService::new(config).get_land_buckets().await?;
        assert!(response.is_success());
        assert_eq!(response.data().map(|d| d.buckets.len()), Some(0));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_by_survey_number() -> ApiResult<()> {
        let service = LandService::new(ServiceConfig::instant());

        let parcel = service
            .search_land(&search("999/1"))
            .await?
            .into_data()
            .expect("999/1 is on record")
            .land_details;
        assert_eq!(parcel.land_id, "land_999_1");
        assert_eq!(parcel.record.area, "4.0 acres");

        let missing = service.search_land(&search("1/1")).await?;
        assert_eq!(
            missing.message(),
            Some("Land parcel not found. Please check the survey number.")
        );
        Ok(())
    }
}
