//! Row types for the database tables and their domain conversions.

pub mod project;
pub mod user;
