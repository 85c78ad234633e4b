use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use api::RemoteServices;
use auth::{AuthManager, config::AppConfig, demo};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting FarmApp");

    let store = config.open_store().await?;
    let session = AuthManager::initialize(store).await;

    let state = session.state();
    info!(
        "Restored session: phase {:?}, language {}, onboarding completed: {}",
        state.phase(),
        state.language,
        state.has_completed_onboarding
    );

    let services = RemoteServices::new(config.service_config());
    let report = demo::run(&session, &services, &demo::DemoInput::default()).await?;

    info!(
        "Application {} submitted for {} lands by {}",
        report.application_id, report.total_lands, report.profile.name
    );
    info!("Session ended: phase {:?}", session.state().phase());

    Ok(())
}
