//! User roles.

use serde::{Deserialize, Serialize};

/// Error returned when a role name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct RoleError(pub String);

/// Privilege level of a user.
///
/// Variants are declared from least to most privileged so that the derived
/// ordering gives `User < Manager < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shopper. Cannot authenticate for privileged operations.
    User,
    /// May edit existing items.
    Manager,
    /// May create and edit items.
    Admin,
}

impl Role {
    /// Canonical lowercase name, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    /// Accepts the lowercase names and the capitalised class names used in
    /// default-data files (`User`, `Manager`, `Admin`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "User" => Ok(Self::User),
            "manager" | "Manager" => Ok(Self::Manager),
            "admin" | "Admin" => Ok(Self::Admin),
            _ => Err(RoleError(s.to_owned())),
        }
    }
}
