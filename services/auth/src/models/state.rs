//! In-memory session state

use serde::Serialize;

use super::{Language, Role, UserProfile};

/// Coarse session phase, derived from [`SessionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Initial load from the store has not finished
    Hydrating,
    Unauthenticated,
    Authenticated,
}

/// Snapshot of the session as seen by the screens
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_authenticated: bool,
    /// True only until the first hydration finishes
    pub is_loading: bool,
    pub user: Option<UserProfile>,
    pub user_role: Option<Role>,
    /// Survives logout
    pub language: Language,
    pub has_completed_onboarding: bool,
    /// Message of the last failed write, until cleared
    pub last_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
            user: None,
            user_role: None,
            language: Language::default(),
            has_completed_onboarding: false,
            last_error: None,
        }
    }
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Hydrating
        } else if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }

    /// State after logout: defaults, keeping only the language
    pub fn logged_out(&self) -> Self {
        Self {
            is_loading: false,
            language: self.language,
            ..Self::default()
        }
    }
}
