//! Common library for the FarmApp workspace
//!
//! This crate provides the persistent key-value store used by the session
//! layer: the [`store::KeyValueStore`] contract, its backends and the
//! storage error type.

pub mod cache;
pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

/// Example usage of the store backends
///
/// ```rust,no_run
/// use common::{FileStore, KeyValueStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStore::new("farmapp-store.json");
///     store.set("selectedLanguage", "kn").await?;
///     println!("Language: {:?}", store.get("selectedLanguage").await?);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
