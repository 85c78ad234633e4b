//! Session layer for FarmApp
//!
//! Owns the authentication state of the app: whether a user is signed in,
//! their role and profile, the interface language and whether onboarding was
//! completed. State is loaded once from a persistent key-value store at
//! startup and changed only through [`AuthManager`]'s operations.
//!
//! ```rust,no_run
//! use auth::{AuthManager, Role, UserProfile};
//! use common::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = AuthManager::initialize(Arc::new(MemoryStore::new())).await;
//!     manager
//!         .login("tok123", Role::Farmer, Some(UserProfile::new("Asha")))
//!         .await?;
//!     assert!(manager.is_authenticated());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use models::{Language, Role, SessionPhase, SessionState, UserProfile};
pub use session::AuthManager;
pub use storage::StorageService;
