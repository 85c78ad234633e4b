//! Key-value store contract
//!
//! Every durable backend (in-memory, JSON file, Redis) implements
//! [`KeyValueStore`]. Callers hold it as `Arc<dyn KeyValueStore>` so a test can
//! swap in a fake without touching the code under test.

use async_trait::async_trait;

use crate::error::StorageResult;

/// Durable, key-addressed string storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key, `None` when the key is absent
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Set a key-value pair, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Remove several keys
    ///
    /// The default removes keys one at a time and stops at the first failure.
    /// Backends that can drop all keys in one step override this.
    async fn multi_remove(&self, keys: &[&str]) -> StorageResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }

    /// Check if the store is reachable
    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }
}
