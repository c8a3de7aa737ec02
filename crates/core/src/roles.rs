//! Well-known role name constants.
//!
//! These must match the `role` check constraint in `20260301000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
