//! Land claim applications
//!
//! The submitted application lives in the service instance, so every clone
//! of one [`ApplicationService`] sees the same application.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::{Application, ApplicationStatus, ClaimReceipt, ClaimRequest, ServiceResponse};
use crate::{ApiResult, ServiceConfig, now_millis, simulate};

const CLAIM_LATENCY: Duration = Duration::from_millis(2500);
const STATUS_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Debug)]
struct ApplicationState {
    current: Option<Application>,
    has_existing_application: bool,
}

#[derive(Debug, Clone)]
pub struct ApplicationService {
    config: ServiceConfig,
    state: Arc<Mutex<ApplicationState>>,
}

impl ApplicationService {
    pub fn new(config: ServiceConfig) -> Self {
        let state = ApplicationState {
            current: None,
            has_existing_application: config.demo.has_existing_application,
        };
        Self {
            config,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Submit a claim for the selected buckets and manually added lands
    pub async fn claim_lands(
        &self,
        claim: ClaimRequest,
    ) -> ApiResult<ServiceResponse<ClaimReceipt>> {
        simulate(&self.config, "claim_lands", CLAIM_LATENCY, async move {
            let application_id = format!("app_{}", now_millis());
            let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
            let total_lands = claim.total_lands();

            let application = Application {
                status: ApplicationStatus::Submitted,
                application_id: application_id.clone(),
                submitted_date: today.clone(),
                last_updated: today,
                total_lands,
                claimed_buckets: claim.claimed_buckets,
                added_lands: claim.added_lands,
            };

            let mut state = self.state.lock().await;
            state.current = Some(application);
            state.has_existing_application = true;
            info!(
                "Submitted application {} for {} lands",
                application_id, total_lands
            );

            ServiceResponse::Success(ClaimReceipt {
                application_id,
                message: "Land claim application submitted successfully".to_string(),
                total_lands,
            })
        })
        .await
    }

    /// Status of the farmer's application
    pub async fn get_application_status(&self) -> ApiResult<ServiceResponse<Application>> {
        simulate(&self.config, "get_application_status", STATUS_LATENCY, async {
            let state = self.state.lock().await;
            match (&state.current, state.has_existing_application) {
                (Some(application), _) => ServiceResponse::Success(application.clone()),
                (None, true) => ServiceResponse::Success(Application {
                    status: ApplicationStatus::Submitted,
                    application_id: "app_123456".to_string(),
                    submitted_date: "2024-01-15".to_string(),
                    last_updated: "2024-01-20".to_string(),
                    total_lands: 3,
                    claimed_buckets: Vec::new(),
                    added_lands: Vec::new(),
                }),
                (None, false) => {
                    ServiceResponse::failure_with_code("No application found", "NO_APPLICATION")
                }
            }
        })
        .await
    }

    /// Forget the submitted application and the demo flag
    pub async fn reset_demo_data(&self) {
        let mut state = self.state.lock().await;
        state.current = None;
        state.has_existing_application = false;
        info!("Demo data reset successfully");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DemoConfig;

    #[tokio::test]
    async fn test_no_application_initially() -> ApiResult<()> {
        let service = ApplicationService::new(ServiceConfig::instant());
        let response = service.get_application_status().await?;

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["code"], "NO_APPLICATION");
        Ok(())
    }

    #[tokio::test]
    async fn test_claim_then_status() -> ApiResult<()> {
        let service = ApplicationService::new(ServiceConfig::instant());
        let claim = ClaimRequest {
            claimed_buckets: vec!["bucket_1".to_string(), "bucket_3".to_string()],
            added_lands: Vec::new(),
        };

        let receipt = service
            .claim_lands(claim)
            .await?
            .into_data()
            .expect("claim should succeed");
        assert!(receipt.application_id.starts_with("app_"));
        assert_eq!(receipt.total_lands, 2);

        // A clone shares the submitted application
        let status = service
            .clone()
            .get_application_status()
            .await?
            .into_data()
            .expect("application was submitted");
        assert_eq!(status.application_id, receipt.application_id);
        assert_eq!(status.status, ApplicationStatus::Submitted);
        assert_eq!(status.claimed_buckets, vec!["bucket_1", "bucket_3"]);
        assert_eq!(status.submitted_date.len(), "YYYY-MM-DD".len());
        Ok(())
    }

    #[tokio::test]
    async fn test_demo_application_and_reset() -> ApiResult<()> {
        let config = ServiceConfig {
            demo: DemoConfig {
                has_existing_application: true,
                ..DemoConfig::default()
            },
            ..ServiceConfig::instant()
        };
        let service = ApplicationService::new(config);

        let status = service.get_application_status().await?;
        assert_eq!(
            status.data().map(|a| a.application_id.as_str()),
            Some("app_123456")
        );

        service.reset_demo_data().await;
        assert!(!service.get_application_status().await?.is_success());
        Ok(())
    }
}
