//! In-memory key-value store
//!
//! Holds everything in a `HashMap` behind a tokio `RwLock`. Nothing survives a
//! restart unless the same instance is reused, which is what tests rely on to
//! simulate an app relaunch. Faults can be injected per key for reads and
//! globally for writes.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::store::KeyValueStore;

/// In-memory store, cheap to clone (clones share the same map)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    failing_reads: Arc<RwLock<HashSet<String>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `get` of `key` fail until [`MemoryStore::heal`] is called
    pub async fn fail_reads_for(&self, key: &str) {
        self.failing_reads.write().await.insert(key.to_string());
    }

    /// Make every `set`, `remove` and `multi_remove` fail, or succeed again
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Clear every injected fault
    pub async fn heal(&self) {
        self.failing_reads.write().await.clear();
        self.fail_writes(false);
    }

    /// Number of successful mutations since creation
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of keys currently stored
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes are disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.failing_reads.read().await.contains(key) {
            return Err(StorageError::Unavailable(format!("read of {key} failed")));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        debug!("Setting key {} in memory store", key);
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.entries.write().await.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn multi_remove(&self, keys: &[&str]) -> StorageResult<()> {
        self.check_writable()?;
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(*key);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
