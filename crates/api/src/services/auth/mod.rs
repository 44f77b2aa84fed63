//! Authentication service.
//!
//! Privileged operations carry an email and a plaintext password. A caller is
//! authorized when the password matches the user's salted digest and the
//! user's role is at least the role the operation requires.

mod error;

pub use error::AuthError;

use tracing::instrument;

use corner_store_core::{Email, Role};

use crate::db::{Repositories, UserRepository};
use crate::models::User;

/// Email and password supplied with a privileged request.
///
/// `Debug` is implemented manually so the password never reaches logs.
#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub fn new(repos: &'a Repositories) -> Self {
        Self {
            users: repos.users(),
        }
    }

    /// Look up `email` and verify `password`.
    ///
    /// Returns `None` for unknown users, users without a password, and wrong
    /// passwords alike.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the user cannot be read.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<Option<User>, AuthError> {
        let user = self.users.find_by_email(email).await?;
        Ok(user.filter(|user| user.authenticate(password)))
    }

    /// Authenticate `credentials` and require at least `required`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if login fails.
    /// Returns `AuthError::Forbidden` if the user's role is below `required`.
    /// Returns `AuthError::Repository` on storage failure.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn authorize(
        &self,
        credentials: &Credentials,
        required: Role,
    ) -> Result<User, AuthError> {
        let user = self
            .login(&credentials.email, &credentials.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if user.role < required {
            tracing::warn!(role = %user.role, %required, "Insufficient role");
            return Err(AuthError::Forbidden { required });
        }

        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: Email::parse(email).unwrap(),
            password: password.to_owned(),
        }
    }

    async fn repos() -> Repositories {
        let repos = Repositories::memory();
        for (email, role, password) in [
            ("vasya@example.com", Role::User, None),
            ("ivan@example.com", Role::Manager, Some("test")),
            ("admin@example.com", Role::Admin, Some("god")),
        ] {
            let user = User::new(Email::parse(email).unwrap(), role, password);
            repos.users().save(&user).await.unwrap();
        }
        repos
    }

    #[tokio::test]
    async fn test_login() {
        let repos = repos().await;
        let auth = AuthService::new(&repos);
        let ivan = Email::parse("ivan@example.com").unwrap();

        assert!(auth.login(&ivan, "test").await.unwrap().is_some());
        assert!(auth.login(&ivan, "123").await.unwrap().is_none());

        let nobody = Email::parse("nobody@example.com").unwrap();
        assert!(auth.login(&nobody, "test").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_without_password_cannot_login() {
        let repos = repos().await;
        let auth = AuthService::new(&repos);
        let err = auth
            .authorize(&credentials("vasya@example.com", ""), Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authorize_checks_role() {
        let repos = repos().await;
        let auth = AuthService::new(&repos);

        let manager = credentials("ivan@example.com", "test");
        assert!(auth.authorize(&manager, Role::Manager).await.is_ok());
        let err = auth.authorize(&manager, Role::Admin).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Forbidden {
                required: Role::Admin
            }
        ));

        let admin = credentials("admin@example.com", "god");
        assert_eq!(
            auth.authorize(&admin, Role::Manager).await.unwrap().role,
            Role::Admin
        );
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let debug = format!("{:?}", credentials("ivan@example.com", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
