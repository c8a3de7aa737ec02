//! Row mapping for the `users` table.

use paddock_core::account::User;
use paddock_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row. Contains the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role,
            created_at: row.created_at,
        }
    }
}
