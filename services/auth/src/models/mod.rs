//! Session models

pub mod language;
pub mod role;
pub mod state;
pub mod user;

// Re-export for convenience
pub use language::Language;
pub use role::Role;
pub use state::{SessionPhase, SessionState};
pub use user::UserProfile;
