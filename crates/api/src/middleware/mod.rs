//! Request extractors that enforce authentication.
//!
//! - [`auth::AuthUser`] -- the account behind a Bearer token.
//! - [`rbac::RequireAdmin`] -- an [`auth::AuthUser`] holding the `admin` role.

pub mod auth;
pub mod rbac;
