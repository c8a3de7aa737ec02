//! User accounts as seen by the tracker.

use serde::Serialize;

use crate::roles::ROLE_ADMIN;
use crate::types::{DbId, Timestamp};

/// Full account record, including the password hash.
///
/// NEVER serialize this to API responses directly; use [`UserProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Safe user representation for responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}
