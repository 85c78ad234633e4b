//! Session management over the persistent store
//!
//! [`AuthManager`] owns the in-memory [`SessionState`] and is the only thing
//! that mutates it. Every mutation writes to the store first and publishes
//! the new state afterwards, in one `send_modify`, so a reader never sees a
//! half-applied update.
//!
//! Read paths never fail: a field that cannot be read falls back to its
//! default. Write paths return the storage error and record its message in
//! `last_error`.

use common::{KeyValueStore, StorageError, StorageResult};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, watch};
use tracing::{error, info, warn};

use crate::error::{AuthError, AuthResult};
use crate::models::{Language, Role, SessionState, UserProfile};
use crate::storage::StorageService;

/// Session manager for the signed-in user
///
/// Clones share the same state and the same in-flight guard.
#[derive(Clone)]
pub struct AuthManager {
    storage: StorageService,
    state: Arc<watch::Sender<SessionState>>,
    in_flight: Arc<Mutex<()>>,
}

/// Log a failed read and fall back to `default`
fn or_default<T>(result: StorageResult<T>, field: &str, default: T) -> T {
    result.unwrap_or_else(|e| {
        error!("Error reading {} during hydration: {}", field, e);
        default
    })
}

impl AuthManager {
    /// Create a session manager in the hydrating state
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            storage: StorageService::new(store),
            state: Arc::new(state),
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    /// Create a session manager and hydrate it from the store
    pub async fn initialize(store: Arc<dyn KeyValueStore>) -> Self {
        let manager = Self::new(store);
        manager.hydrate().await;
        manager
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn language(&self) -> Language {
        self.state.borrow().language
    }

    pub fn user_role(&self) -> Option<Role> {
        self.state.borrow().user_role
    }

    /// Typed storage used by this manager
    pub fn storage(&self) -> &StorageService {
        &self.storage
    }

    /// Load the session from the store
    ///
    /// Reads token presence, onboarding flag, language, role and profile, in
    /// that order, then publishes all of them at once with `is_loading`
    /// cleared. Meant to run once at startup; calling it again re-reads the
    /// store.
    pub async fn hydrate(&self) {
        info!("Hydrating session from storage");

        let is_authenticated =
            or_default(self.storage.is_authenticated().await, "auth token", false);
        let has_completed_onboarding = or_default(
            self.storage.has_completed_onboarding().await,
            "onboarding flag",
            false,
        );

        let language = or_default(self.storage.language().await, "language", None)
            .and_then(|code| match code.parse::<Language>() {
                Ok(language) => Some(language),
                Err(e) => {
                    warn!("Ignoring stored language: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let user_role = or_default(self.storage.user_role().await, "user role", None).and_then(
            |role| match role.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    warn!("Ignoring stored role: {}", e);
                    None
                }
            },
        );

        let user = or_default(self.storage.user_profile().await, "user profile", None);

        self.state.send_modify(|state| {
            state.is_authenticated = is_authenticated;
            state.has_completed_onboarding = has_completed_onboarding;
            state.language = language;
            state.user_role = user_role;
            state.user = user;
            state.is_loading = false;
        });

        info!(
            "Session hydrated (authenticated: {}, language: {})",
            is_authenticated, language
        );
    }

    /// Sign in with a token issued by the backend
    ///
    /// Token and role are persisted, then the profile if one is given. The
    /// in-memory state only changes once every write succeeded. When a write
    /// fails on a signed-out session, the keys already written are removed.
    pub async fn login(
        &self,
        token: &str,
        role: Role,
        user_data: Option<UserProfile>,
    ) -> AuthResult<()> {
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        let _guard = self.acquire("login")?;

        info!("Logging in with role {}", role);
        let persisted = async {
            self.storage.set_auth_token(token).await?;
            self.storage.set_user_role(role.as_str()).await?;
            if let Some(profile) = &user_data {
                self.storage.set_user_profile(profile).await?;
            }
            Ok::<_, StorageError>(())
        }
        .await;

        if let Err(e) = persisted {
            // Undo the writes that went through
            let was_authenticated = self.state.borrow().is_authenticated;
            if !was_authenticated {
                if let Err(clear) = self.storage.clear_user_data().await {
                    warn!("Failed to roll back partial login: {}", clear);
                }
            }
            return Err(self.record_failure("login", e));
        }

        self.state.send_modify(|state| {
            state.is_authenticated = true;
            state.user_role = Some(role);
            state.user = user_data;
        });
        Ok(())
    }

    /// Sign out, keeping the language preference
    ///
    /// The in-memory session is reset even when clearing the store fails; the
    /// failure is still returned.
    pub async fn logout(&self) -> AuthResult<()> {
        let _guard = self.acquire("logout")?;

        info!("Logging out");
        let cleared = self.storage.clear_user_data().await;
        self.state.send_modify(|state| *state = state.logged_out());

        cleared.map_err(|e| self.record_failure("logout", e))
    }

    /// Change the interface language from its code
    ///
    /// Codes other than `en`, `hi` and `kn` are rejected and nothing is
    /// written.
    pub async fn set_language(&self, code: &str) -> AuthResult<()> {
        let language = code.parse::<Language>().inspect_err(|e| {
            warn!("Rejected language change: {}", e);
        })?;
        self.set_language_to(language).await
    }

    /// Change the interface language
    ///
    /// The in-memory language changes even when persisting it fails; the
    /// failure is still returned.
    pub async fn set_language_to(&self, language: Language) -> AuthResult<()> {
        info!("Setting language to {}", language);
        let persisted = self.storage.set_language(language.code()).await;
        self.state.send_modify(|state| state.language = language);

        persisted.map_err(|e| self.record_failure("set_language", e))
    }

    /// Mark onboarding as done. Repeated calls do nothing.
    pub async fn complete_onboarding(&self) -> AuthResult<()> {
        if self.state.borrow().has_completed_onboarding {
            return Ok(());
        }

        info!("Completing onboarding");
        if let Err(e) = self.storage.set_onboarding_completed().await {
            return Err(self.record_failure("complete_onboarding", e));
        }
        self.state
            .send_modify(|state| state.has_completed_onboarding = true);
        Ok(())
    }

    /// Replace the stored profile
    pub async fn update_user(&self, user_data: UserProfile) -> AuthResult<()> {
        let _guard = self.acquire("update_user")?;

        info!("Updating user profile");
        if let Err(e) = self.storage.set_user_profile(&user_data).await {
            return Err(self.record_failure("update_user", e));
        }
        self.state.send_modify(|state| state.user = Some(user_data));
        Ok(())
    }

    pub fn clear_last_error(&self) {
        self.state.send_if_modified(|state| state.last_error.take().is_some());
    }

    /// Take the single-flight guard shared by login, logout and profile updates
    fn acquire(&self, operation: &str) -> AuthResult<MutexGuard<'_, ()>> {
        self.in_flight.try_lock().map_err(|_| {
            warn!("Rejected {}: another session operation is in flight", operation);
            AuthError::OperationInFlight
        })
    }

    fn record_failure(&self, operation: &str, e: StorageError) -> AuthError {
        error!("Error during {}: {}", operation, e);
        let message = format!("{operation} failed: {e}");
        self.state
            .send_modify(|state| state.last_error = Some(message));
        AuthError::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::keys;
    use common::MemoryStore;
    use tokio_test::{assert_err, assert_ok};

    async fn hydrated(store: &MemoryStore) -> AuthManager {
        AuthManager::initialize(Arc::new(store.clone())).await
    }

    #[tokio::test]
    async fn test_new_manager_is_hydrating() {
        let manager = AuthManager::new(Arc::new(MemoryStore::new()));
        let state = manager.state();
        assert!(state.is_loading);
        assert!(!state.is_authenticated);
    }

    #[tokio::test]
    async fn test_hydrate_restores_everything() -> StorageResult<()> {
        let store = MemoryStore::new();
        store.set(keys::AUTH_TOKEN, "tok").await?;
        store.set(keys::USER_ROLE, "sahayak").await?;
        store.set(keys::USER_PROFILE, r#"{"name":"Ravi"}"#).await?;
        store.set(keys::SELECTED_LANGUAGE, "kn").await?;
        store.set(keys::ONBOARDING_COMPLETED, "true").await?;

        let state = hydrated(&store).await.state();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.user_role, Some(Role::Sahayak));
        assert_eq!(state.user, Some(UserProfile::new("Ravi")));
        assert_eq!(state.language, Language::Kn);
        assert!(state.has_completed_onboarding);
        Ok(())
    }

    #[tokio::test]
    async fn test_hydrate_ignores_unknown_values() -> StorageResult<()> {
        let store = MemoryStore::new();
        store.set(keys::USER_ROLE, "admin").await?;
        store.set(keys::SELECTED_LANGUAGE, "fr").await?;
        store.set(keys::USER_PROFILE, "not json").await?;

        let state = hydrated(&store).await.state();
        assert_eq!(state.user_role, None);
        assert_eq!(state.language, Language::En);
        assert_eq!(state.user, None);
        assert!(!state.is_loading);
        Ok(())
    }

    #[tokio::test]
    async fn test_second_hydrate_never_reports_loading() -> StorageResult<()> {
        let store = MemoryStore::new();
        let manager = hydrated(&store).await;
        let mut updates = manager.subscribe();

        store.set(keys::SELECTED_LANGUAGE, "hi").await?;
        manager.hydrate().await;

        assert_ok!(updates.changed().await);
        let state = updates.borrow_and_update().clone();
        assert!(!state.is_loading);
        assert_eq!(state.language, Language::Hi);
        Ok(())
    }

    #[tokio::test]
    async fn test_login_rejects_empty_token() {
        let store = MemoryStore::new();
        let manager = hydrated(&store).await;

        let err = assert_err!(manager.login("", Role::Farmer, None).await);
        assert!(matches!(err, AuthError::EmptyToken));
        assert_eq!(store.write_count(), 0);
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_failure_leaves_state_untouched() {
        let store = MemoryStore::new();
        let manager = hydrated(&store).await;
        store.fail_writes(true);

        let err = assert_err!(
            manager
                .login("tok", Role::Farmer, Some(UserProfile::new("Asha")))
                .await
        );
        assert!(matches!(err, AuthError::Storage(_)));

        let state = manager.state();
        assert!(!state.is_authenticated);
        assert_eq!(state.user_role, None);
        assert_eq!(state.user, None);
        assert!(
            state
                .last_error
                .as_deref()
                .is_some_and(|message| message.starts_with("login failed"))
        );

        manager.clear_last_error();
        assert_eq!(manager.state().last_error, None);
    }

    #[tokio::test]
    async fn test_logout_resets_state_when_clear_fails() {
        let store = MemoryStore::new();
        let manager = hydrated(&store).await;
        assert_ok!(manager.set_language("hi").await);
        assert_ok!(manager.login("tok", Role::Farmer, None).await);

        store.fail_writes(true);
        let err = assert_err!(manager.logout().await);
        assert!(matches!(err, AuthError::Storage(_)));

        let state = manager.state();
        assert!(!state.is_authenticated);
        assert_eq!(state.language, Language::Hi);
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn test_set_language_rejects_unknown_code() {
        let store = MemoryStore::new();
        let manager = hydrated(&store).await;

        let err = assert_err!(manager.set_language("ta").await);
        assert!(matches!(err, AuthError::InvalidLanguage(code) if code == "ta"));
        assert_eq!(store.write_count(), 0);
        assert_eq!(manager.language(), Language::En);
    }

    #[tokio::test]
    async fn test_set_language_updates_memory_when_write_fails() {
        let store = MemoryStore::new();
        let manager = hydrated(&store).await;
        store.fail_writes(true);

        assert_err!(manager.set_language_to(Language::Kn).await);
        assert_eq!(manager.language(), Language::Kn);
        assert!(manager.state().last_error.is_some());
    }

    #[tokio::test]
    async fn test_update_user_overwrites() -> StorageResult<()> {
        let store = MemoryStore::new();
        let manager = hydrated(&store).await;

        let mut first = UserProfile::new("Asha").with_mobile("9999999999");
        first.address = Some("Bellur".to_string());
        assert_ok!(manager.update_user(first).await);

        let second = UserProfile::new("Asha K");
        assert_ok!(manager.update_user(second.clone()).await);

        assert_eq!(manager.state().user, Some(second.clone()));
        assert_eq!(manager.storage().user_profile().await?, Some(second));
        Ok(())
    }

    #[tokio::test]
    async fn test_subscribers_see_login() {
        let manager = hydrated(&MemoryStore::new()).await;
        let mut updates = manager.subscribe();

        assert_ok!(manager.login("tok", Role::Sahayak, None).await);

        assert_ok!(updates.changed().await);
        let state = updates.borrow_and_update().clone();
        assert!(state.is_authenticated);
        assert_eq!(state.user_role, Some(Role::Sahayak));
    }
}
