//! Redis key-value store
//!
//! This module provides a [`KeyValueStore`] backed by Redis. Keys are
//! namespaced so several devices or test runs can share one server.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::error::StorageResult;
use crate::store::KeyValueStore;

/// Configuration for Redis connection
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Prefix prepended to every key as `<namespace>:<key>`
    pub namespace: String,
}

/// Redis-backed store
pub struct RedisStore {
    client: Client,
    namespace: String,
}

impl RedisStore {
    /// Initialize a new Redis store
    pub async fn new(config: &RedisConfig) -> StorageResult<Self> {
        let client = Client::open(config.url.clone())?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisStore {
            client,
            namespace: config.namespace.clone(),
        })
    }

    /// Get a multiplexed connection
    async fn get_connection(&self) -> StorageResult<redis::aio::MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(self.namespaced(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(self.namespaced(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: u64 = conn.del(self.namespaced(key)).await?;
        Ok(())
    }

    /// A single `DEL` with every key, atomic on the server
    async fn multi_remove(&self, keys: &[&str]) -> StorageResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.get_connection().await?;
        let keys: Vec<String> = keys.iter().map(|key| self.namespaced(key)).collect();
        let _: u64 = conn.del(keys).await?;
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}
