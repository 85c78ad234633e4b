//! Typed access to the persisted session fields
//!
//! One getter and one setter per tracked field over a [`KeyValueStore`].
//! Getters report failures instead of hiding them; the session manager
//! decides what a failed read falls back to.

use common::{KeyValueStore, StorageResult};
use std::sync::Arc;
use tracing::debug;

use crate::models::UserProfile;

/// Store keys
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USER_ROLE: &str = "userRole";
    pub const USER_PROFILE: &str = "userProfile";
    pub const SELECTED_LANGUAGE: &str = "selectedLanguage";
    pub const ONBOARDING_COMPLETED: &str = "onboardingCompleted";

    /// Keys dropped on logout
    pub const USER_DATA: [&str; 3] = [AUTH_TOKEN, USER_ROLE, USER_PROFILE];
}

/// Typed storage adapter for the session fields
#[derive(Clone)]
pub struct StorageService {
    store: Arc<dyn KeyValueStore>,
}

impl StorageService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn set_auth_token(&self, token: &str) -> StorageResult<()> {
        self.store.set(keys::AUTH_TOKEN, token).await
    }

    pub async fn auth_token(&self) -> StorageResult<Option<String>> {
        self.store.get(keys::AUTH_TOKEN).await
    }

    pub async fn remove_auth_token(&self) -> StorageResult<()> {
        self.store.remove(keys::AUTH_TOKEN).await
    }

    /// True when a non-empty token is stored
    pub async fn is_authenticated(&self) -> StorageResult<bool> {
        Ok(self
            .auth_token()
            .await?
            .is_some_and(|token| !token.is_empty()))
    }

    pub async fn set_user_role(&self, role: &str) -> StorageResult<()> {
        self.store.set(keys::USER_ROLE, role).await
    }

    /// Raw stored role, not validated
    pub async fn user_role(&self) -> StorageResult<Option<String>> {
        self.store.get(keys::USER_ROLE).await
    }

    pub async fn set_user_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        let json = serde_json::to_string(profile)?;
        self.store.set(keys::USER_PROFILE, &json).await
    }

    /// Stored profile. Unparseable JSON is a serialization error.
    pub async fn user_profile(&self) -> StorageResult<Option<UserProfile>> {
        match self.store.get(keys::USER_PROFILE).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn set_language(&self, code: &str) -> StorageResult<()> {
        self.store.set(keys::SELECTED_LANGUAGE, code).await
    }

    /// Raw stored language code, not validated
    pub async fn language(&self) -> StorageResult<Option<String>> {
        self.store.get(keys::SELECTED_LANGUAGE).await
    }

    pub async fn set_onboarding_completed(&self) -> StorageResult<()> {
        self.store.set(keys::ONBOARDING_COMPLETED, "true").await
    }

    pub async fn has_completed_onboarding(&self) -> StorageResult<bool> {
        Ok(self
            .store
            .get(keys::ONBOARDING_COMPLETED)
            .await?
            .is_some_and(|flag| flag == "true"))
    }

    /// Remove token, role and profile in one call
    pub async fn clear_user_data(&self) -> StorageResult<()> {
        debug!("Clearing persisted user data");
        self.store.multi_remove(&keys::USER_DATA).await
    }

    pub async fn health_check(&self) -> StorageResult<bool> {
        self.store.health_check().await
    }
}
