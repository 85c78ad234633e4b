//! JSON file key-value store
//!
//! Device-local durable storage: every key lives in one JSON object on disk.
//! The file is read on first access and cached; each mutation rewrites the
//! whole object through a temporary file and an atomic rename, so a reader
//! never sees a partially written file.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};
use crate::store::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a JSON object in a single file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Option<Entries>>,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path) -> StorageResult<Entries> {
        match fs::read_to_string(path).await {
            Ok(content) if content.trim().is_empty() => Ok(Entries::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No store file at {}, starting empty", path.display());
                Ok(Entries::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &Entries) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp_path, &self.path).await?;
        debug!("Persisted {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Load the entries for a write. An unparseable file is moved aside to
    /// `<name>.json.corrupt` and the store starts over empty.
    async fn load_for_write(&self) -> StorageResult<Entries> {
        match Self::load(&self.path).await {
            Err(StorageError::Serialization(e)) => {
                let aside = self.path.with_extension("json.corrupt");
                warn!(
                    "Store file {} is unreadable ({}), moving it to {}",
                    self.path.display(),
                    e,
                    aside.display()
                );
                fs::rename(&self.path, &aside).await?;
                Ok(Entries::new())
            }
            other => other,
        }
    }

    /// Apply `mutate` to a copy of the entries and persist it. The cache is
    /// only replaced once the file write succeeded.
    async fn update<F>(&self, mutate: F) -> StorageResult<()>
    where
        F: FnOnce(&mut Entries),
    {
        let mut guard = self.entries.lock().await;
        let mut next = match guard.as_ref() {
            Some(entries) => entries.clone(),
            None => self.load_for_write().await?,
        };
        mutate(&mut next);
        self.persist(&next).await?;
        *guard = Some(next);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            *guard = Some(Self::load(&self.path).await?);
        }
        Ok(guard.as_ref().and_then(|entries| entries.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
        .await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }

    async fn multi_remove(&self, keys: &[&str]) -> StorageResult<()> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
        .await
    }

    async fn health_check(&self) -> StorageResult<bool> {
        self.get("__health__").await.map(|_| true)
    }
}
