//! Application configuration
//!
//! Built-in defaults overlaid with `FARMAPP_*` environment variables, e.g.
//! `FARMAPP_STORAGE_BACKEND=redis` or `FARMAPP_SERVICE_TIMEOUT_MS=5000`.

use anyhow::{Context, Result};
use api::{DemoConfig, ServiceConfig};
use common::cache::{RedisConfig, RedisStore};
use common::{FileStore, KeyValueStore, MemoryStore};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Which key-value store backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    /// File used by the `file` backend
    pub storage_path: PathBuf,
    pub redis_url: String,
    pub redis_namespace: String,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Sleep for each remote call's simulated latency
    pub simulate_latency: bool,
    pub service_timeout_ms: u64,
    pub demo_has_existing_application: bool,
    pub demo_user_has_land_buckets: bool,
}

impl AppConfig {
    /// Load the configuration from defaults and the environment
    pub fn load() -> Result<Self> {
        let config = ::config::Config::builder()
            .set_default("storage_backend", "file")?
            .set_default("storage_path", "farmapp-store.json")?
            .set_default("redis_url", "redis://localhost:6379")?
            .set_default("redis_namespace", "farmapp")?
            .set_default("log_level", "info")?
            .set_default("simulate_latency", true)?
            .set_default("service_timeout_ms", 10_000_i64)?
            .set_default("demo_has_existing_application", false)?
            .set_default("demo_user_has_land_buckets", true)?
            .add_source(::config::Environment::with_prefix("FARMAPP").try_parsing(true))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Remote service settings derived from this configuration
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            simulate_latency: self.simulate_latency,
            timeout: Duration::from_millis(self.service_timeout_ms),
            demo: DemoConfig {
                has_existing_application: self.demo_has_existing_application,
                user_has_land_buckets: self.demo_user_has_land_buckets,
            },
        }
    }

    /// Open the configured key-value store
    pub async fn open_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match self.storage_backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::new(&self.storage_path)),
            StorageBackend::Redis => {
                let redis_config = RedisConfig {
                    url: self.redis_url.clone(),
                    namespace: self.redis_namespace.clone(),
                };
                Arc::new(RedisStore::new(&redis_config).await?)
            }
        };

        if !store.health_check().await? {
            anyhow::bail!("Storage backend {:?} is not healthy", self.storage_backend);
        }
        info!("Using {:?} storage backend", self.storage_backend);
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.storage_backend, StorageBackend::File);
        assert_eq!(config.storage_path, PathBuf::from("farmapp-store.json"));
        assert_eq!(config.log_level, "info");
        assert!(config.simulate_latency);
        assert_eq!(config.service_config().timeout, Duration::from_secs(10));
        assert!(config.service_config().demo.user_has_land_buckets);
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        // Set environment variables for testing
        unsafe {
            std::env::set_var("FARMAPP_STORAGE_BACKEND", "memory");
            std::env::set_var("FARMAPP_SIMULATE_LATENCY", "false");
            std::env::set_var("FARMAPP_SERVICE_TIMEOUT_MS", "250");
        }

        let config = AppConfig::load().unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert!(!config.simulate_latency);
        assert_eq!(
            config.service_config().timeout,
            Duration::from_millis(250)
        );

        // Clean up
        unsafe {
            std::env::remove_var("FARMAPP_STORAGE_BACKEND");
            std::env::remove_var("FARMAPP_SIMULATE_LATENCY");
            std::env::remove_var("FARMAPP_SERVICE_TIMEOUT_MS");
        }
    }

    #[tokio::test]
    async fn test_open_file_store() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = AppConfig {
            storage_backend: StorageBackend::File,
            storage_path: dir.path().join("store.json"),
            redis_url: "redis://localhost:6379".to_string(),
            redis_namespace: "farmapp".to_string(),
            log_level: "info".to_string(),
            simulate_latency: false,
            service_timeout_ms: 1000,
            demo_has_existing_application: false,
            demo_user_has_land_buckets: true,
        };

        let store = config.open_store().await?;
        store.set("selectedLanguage", "hi").await?;
        assert_eq!(store.get("selectedLanguage").await?, Some("hi".to_string()));
        Ok(())
    }
}
