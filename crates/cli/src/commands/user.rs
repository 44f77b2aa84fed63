//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! cs-cli user create -e admin@example.com -r admin -p god
//! ```

use thiserror::Error;

use corner_store_api::db::Repositories;
use corner_store_api::db::RepositoryError;
use corner_store_api::models::User;
use corner_store_core::{Email, EmailError, Role, RoleError};

use super::{ConnectError, connect};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Invalid role.
    #[error("{0}. Valid roles: user, manager, admin")]
    InvalidRole(#[from] RoleError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Build the user to store, validating input before any connection is made.
fn build(email: &str, role: &str, password: Option<&str>) -> Result<User, UserError> {
    let email = Email::parse(email)?;
    let role: Role = role.parse()?;
    Ok(User::new(email, role, password))
}

/// Create or replace a user.
///
/// # Errors
///
/// Returns `UserError` on invalid input or database failure.
pub async fn create(email: &str, role: &str, password: Option<&str>) -> Result<(), UserError> {
    let user = build(email, role, password)?;
    if user.password.is_none() && user.role > Role::User {
        tracing::warn!("{} has no password and will not be able to log in", user.email);
    }

    let pool = connect().await?;
    Repositories::postgres(pool).users().save(&user).await?;

    tracing::info!("Saved user: {} ({})", user.email, user.role);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_validates_input() {
        assert!(matches!(
            build("test", "admin", None),
            Err(UserError::InvalidEmail(_))
        ));
        assert!(matches!(
            build("root@example.com", "root", None),
            Err(UserError::InvalidRole(_))
        ));

        let user = build("ivan@example.com", "Manager", Some("test")).unwrap();
        assert_eq!(user.role, Role::Manager);
        assert!(user.authenticate("test"));
    }
}
