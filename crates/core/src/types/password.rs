//! Salted password digests.
//!
//! A digest is `hex(SHA-512(password ++ salt))` where the salt is a random
//! 32-character hex string. Only privileged users carry a digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use uuid::Uuid;

/// Stored credentials for a password-protected user.
///
/// `Debug` is implemented manually so the hash never reaches logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest {
    salt: String,
    hash: String,
}

impl PasswordDigest {
    /// Hash `password` with a freshly generated salt.
    #[must_use]
    pub fn derive(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let hash = digest(password, &salt);
        Self { salt, hash }
    }

    /// Rebuild a digest from stored parts.
    #[must_use]
    pub const fn from_parts(salt: String, hash: String) -> Self {
        Self { salt, hash }
    }

    /// The salt appended to the password before hashing.
    #[must_use]
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The hex-encoded SHA-512 hash.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Check `password` against this digest in constant time.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        constant_time_compare(&digest(password, &self.salt), &self.hash)
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("salt", &self.salt)
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

fn digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
