//! Account credentials and session tokens.
//!
//! - [`password`] -- Argon2id hashing of account passwords.
//! - [`jwt`] -- signed bearer tokens issued at signup and login.

pub mod jwt;
pub mod password;
