//! User records

use serde::{Deserialize, Serialize};

use crate::users::crypto;

/// A user allowed through the jump host.
///
/// Stored in the registry under a generated key that is distinct from the username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
    /// Base64 of the raw public key file
    pub public_key: String,
    pub is_admin: bool,
}

impl User {
    /// Checks a candidate password against the stored hash.
    pub fn verify_password(&self, candidate: &str) -> bool {
        crypto::verify_password(candidate, &self.password_hash)
    }
}

/// Fields collected for a user that does not have a registry key yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub public_key: String,
}

impl From<NewUser> for User {
    fn from(new_user: NewUser) -> Self {
        User {
            username: new_user.username,
            password_hash: new_user.password_hash,
            public_key: new_user.public_key,
            is_admin: new_user.is_admin,
        }
    }
}
