//! Authentication error types.

use thiserror::Error;

use corner_store_core::Role;

use crate::db::RepositoryError;

/// Errors that can occur while checking credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (unknown user, no password, or wrong password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The user authenticated but lacks the required role.
    #[error("requires role {required}")]
    Forbidden {
        /// Minimum role for the operation.
        required: Role,
    },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
