//! Domain core for the livestock feeding tracker.
//!
//! Pure feeding rules, schedule templates and the daily project refresh,
//! plus the collaborator traits implemented by the storage and HTTP crates.
//! This crate has no internal dependencies.

pub mod account;
pub mod animal;
pub mod clock;
pub mod countdown;
pub mod day_state;
pub mod error;
pub mod feeding;
pub mod input;
pub mod project;
pub mod roles;
pub mod schedule;
pub mod store;
pub mod tracker;
pub mod types;
