//! User role

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Role chosen on the role selection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Farmer claiming their own land
    Farmer,
    /// Field assistant registering farmers
    Sahayak,
}

impl Role {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Sahayak => "sahayak",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "farmer" => Ok(Role::Farmer),
            "sahayak" => Ok(Role::Sahayak),
            other => Err(AuthError::InvalidRole(other.to_string())),
        }
    }
}
