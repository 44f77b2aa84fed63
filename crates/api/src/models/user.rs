//! User domain type.

use serde::{Deserialize, Serialize};

use corner_store_core::{Email, PasswordDigest, Role, UserId};

/// A store user.
///
/// Only users carrying a password digest can authenticate; in practice that
/// means managers and admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Privilege level.
    pub role: Role,
    /// Salted password digest, absent for users who cannot log in.
    #[serde(default)]
    pub password: Option<PasswordDigest>,
}

impl User {
    /// Create a user, hashing `password` when it is present and non-empty.
    #[must_use]
    pub fn new(email: Email, role: Role, password: Option<&str>) -> Self {
        Self {
            id: UserId::new_v4(),
            email,
            role,
            password: password
                .filter(|p| !p.is_empty())
                .map(PasswordDigest::derive),
        }
    }

    /// Check a plaintext password. Always false for users without a digest.
    #[must_use]
    pub fn authenticate(&self, password: &str) -> bool {
        self.password
            .as_ref()
            .is_some_and(|digest| digest.verify(password))
    }
}
