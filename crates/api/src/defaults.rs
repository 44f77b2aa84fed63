//! Default store data.
//!
//! Default data is read from a TOML file:
//!
//! ```toml
//! [[users]]
//! class = "Manager"
//! id = "0bc224c6-f78e-4de9-a3de-fe17451e6d0d"
//! email = "ivan@example.com"
//! password = "test"
//!
//! [[items]]
//! id = "5b1f5c4e-4d3a-4c6f-9d0e-0a6f3b1f2c11"
//! name = "Spoon"
//! price = 120 # minor units
//!
//! [[carts]]
//! email = "vasya@example.com"
//! items = [{ id = "5b1f5c4e-4d3a-4c6f-9d0e-0a6f3b1f2c11", name = "Spoon", price = 120 }]
//! ```
//!
//! When the file does not exist, three built-in users are used instead.

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use corner_store_core::{
    CartId, Email, ItemId, Price, PriceError, Role, RoleError, UserId,
};

use crate::db::{RepositoryError, Repositories};
use crate::models::{Cart, Item, User};

/// Errors that can occur while loading or seeding default data.
#[derive(Debug, Error)]
pub enum DefaultsError {
    /// The defaults file exists but cannot be read.
    #[error("cannot read defaults file: {0}")]
    Io(#[from] std::io::Error),

    /// The defaults file is not valid TOML for this layout.
    #[error("invalid defaults file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A user entry names an unknown class.
    #[error("invalid user class: {0}")]
    Role(#[from] RoleError),

    /// An item entry has an invalid price.
    #[error("invalid item price: {0}")]
    Price(#[from] PriceError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

const BUILTIN_USERS: &str = r#"
[[users]]
class = "User"
id = "2e6db091-cbbc-4b78-98b0-1ec90cd7daae"
email = "vasya@example.com"

[[users]]
class = "Manager"
id = "0bc224c6-f78e-4de9-a3de-fe17451e6d0d"
email = "ivan@example.com"
password = "test"

[[users]]
class = "Admin"
id = "c56013d7-f913-4b88-bc76-52bfe4a1791d"
email = "admin@example.com"
password = "god"
"#;

/// Users, items and carts to seed into an empty store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub users: Vec<DefaultUser>,
    #[serde(default)]
    pub items: Vec<DefaultItem>,
    #[serde(default)]
    pub carts: Vec<DefaultCart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultUser {
    /// `User`, `Manager` or `Admin`.
    pub class: String,
    pub id: Option<UserId>,
    pub email: Email,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    /// Minor units.
    pub price: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultCart {
    pub id: Option<CartId>,
    pub email: Email,
    #[serde(default)]
    pub items: Vec<DefaultItem>,
}

/// How many records [`Defaults::seed`] inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub items: usize,
    pub carts: usize,
}

impl Defaults {
    /// Read defaults from `path`, or fall back to [`Defaults::builtin`] when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError::Io` if the file exists but cannot be read, and
    /// `DefaultsError::Parse` if it is malformed.
    pub fn load(path: &Path) -> Result<Self, DefaultsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No defaults file, using built-in users");
                Ok(Self::builtin())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse defaults from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError::Parse` if the text is malformed.
    pub fn parse(text: &str) -> Result<Self, DefaultsError> {
        Ok(toml::from_str(text)?)
    }

    /// A plain user, a manager and an admin.
    ///
    /// # Panics
    ///
    /// Panics if the embedded user list does not parse.
    #[must_use]
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_USERS).expect("built-in users are a valid defaults document")
    }

    /// Insert every default record whose key is not already stored.
    ///
    /// Users are keyed by email, items by ID and carts by email, so seeding
    /// twice changes nothing and edits made since the last start survive.
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError` if an entry is invalid or storage fails.
    #[instrument(skip_all)]
    pub async fn seed(&self, repos: &Repositories) -> Result<SeedReport, DefaultsError> {
        let mut report = SeedReport::default();

        for entry in &self.users {
            if repos.users().find_by_email(&entry.email).await?.is_some() {
                continue;
            }
            repos.users().save(&entry.to_user()?).await?;
            report.users += 1;
        }

        for entry in &self.items {
            if repos.items().get(entry.id).await?.is_some() {
                continue;
            }
            repos.items().save(&entry.to_item()?).await?;
            report.items += 1;
        }

        for entry in &self.carts {
            if repos.carts().get_by_email(&entry.email).await?.is_some() {
                continue;
            }
            repos.carts().save(&entry.to_cart()?).await?;
            report.carts += 1;
        }

        tracing::info!(
            users = report.users,
            items = report.items,
            carts = report.carts,
            "Default data seeded"
        );
        Ok(report)
    }
}

impl DefaultUser {
    /// Build the user, hashing the password with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns `DefaultsError::Role` for an unknown class.
    pub fn to_user(&self) -> Result<User, DefaultsError> {
        let role: Role = self.class.parse()?;
        let mut user = User::new(self.email.clone(), role, self.password.as_deref());
        if let Some(id) = self.id {
            user.id = id;
        }
        Ok(user)
    }
}

impl DefaultItem {
    /// # Errors
    ///
    /// Returns `DefaultsError::Price` for a negative price.
    pub fn to_item(&self) -> Result<Item, DefaultsError> {
        Ok(Item {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: Price::from_minor_units(self.price)?,
        })
    }
}

impl DefaultCart {
    /// # Errors
    ///
    /// Returns `DefaultsError::Price` if an item has a negative price.
    pub fn to_cart(&self) -> Result<Cart, DefaultsError> {
        let mut cart = Cart::new(self.email.clone());
        if let Some(id) = self.id {
            cart.id = id;
        }
        for item in &self.items {
            cart.add(item.to_item()?);
        }
        Ok(cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[users]]
        class = "Admin"
        email = "root@example.com"
        password = "hunter2"

        [[items]]
        id = "5b1f5c4e-4d3a-4c6f-9d0e-0a6f3b1f2c11"
        name = "Spoon"
        description = "Teaspoon"
        price = 120

        [[carts]]
        email = "vasya@example.com"
        items = [{ id = "5b1f5c4e-4d3a-4c6f-9d0e-0a6f3b1f2c11", name = "Spoon", price = 120 }]
    "#;

    #[test]
    fn test_builtin_users() {
        let defaults = Defaults::builtin();
        let users: Vec<_> = defaults
            .users
            .iter()
            .map(|u| u.to_user().unwrap())
            .collect();

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].role, Role::User);
        assert!(users[0].password.is_none());
        assert!(users[1].authenticate("test"));
        assert_eq!(users[2].role, Role::Admin);
        assert!(users[2].authenticate("god"));
        assert_eq!(
            users[2].id.to_string(),
            "c56013d7-f913-4b88-bc76-52bfe4a1791d"
        );
    }

    #[test]
    fn test_parse_rejects_bad_email() {
        let err = Defaults::parse("[[users]]\nclass = \"User\"\nemail = \"test\"\n").unwrap_err();
        assert!(matches!(err, DefaultsError::Parse(_)));
    }

    #[test]
    fn test_unknown_class() {
        let defaults =
            Defaults::parse("[[users]]\nclass = \"Root\"\nemail = \"r@example.com\"\n")
                .unwrap();
        assert!(matches!(
            defaults.users[0].to_user(),
            Err(DefaultsError::Role(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_builtin() {
        let defaults = Defaults::load(Path::new("/nonexistent/corner-store/default.toml")).unwrap();
        assert_eq!(defaults.users.len(), 3);
        assert!(defaults.items.is_empty());
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repos = Repositories::memory();
        let defaults = Defaults::parse(SAMPLE).unwrap();

        let first = defaults.seed(&repos).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                users: 1,
                items: 1,
                carts: 1
            }
        );

        let second = defaults.seed(&repos).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let cart = repos
            .carts()
            .get_by_email(&Email::parse("vasya@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cart.total().minor_units(), 120);
    }

    #[tokio::test]
    async fn test_seed_keeps_existing_users() {
        let repos = Repositories::memory();
        let existing = User::new(
            Email::parse("admin@example.com").unwrap(),
            Role::Admin,
            Some("changed"),
        );
        repos.users().save(&existing).await.unwrap();

        let report = Defaults::builtin().seed(&repos).await.unwrap();
        assert_eq!(report.users, 2);

        let admin = repos
            .users()
            .find_by_email(&existing.email)
            .await
            .unwrap()
            .unwrap();
        assert!(admin.authenticate("changed"));
        assert!(!admin.authenticate("god"));
    }
}
