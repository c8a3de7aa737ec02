//! Animal kinds a project can track.
//!
//! Any string is accepted as an animal type. `cow` and `goat` (case
//! insensitive) have dedicated feeding rules; everything else is kept
//! verbatim as [`AnimalType::Other`] and falls through to the generic
//! schedule and the non-goat feed tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Days between periodic weight/tier re-checks for cows.
pub const CHECK_PERIOD_COW_DAYS: i32 = 30;

/// Days between re-checks for every other animal (every day).
pub const CHECK_PERIOD_DEFAULT_DAYS: i32 = 1;

/// Fixed target weight for goats (kg).
pub const GOAT_TARGET_WEIGHT_KG: f64 = 24.0;

/// Target gain over the purchase weight for cows and other animals (kg).
pub const TARGET_GAIN_KG: f64 = 120.0;

// ---------------------------------------------------------------------------
// AnimalType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnimalType {
    Cow,
    Goat,
    /// Unknown type, stored as entered.
    Other(String),
}

impl AnimalType {
    /// Classify a raw type name. Never fails.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "cow" => AnimalType::Cow,
            "goat" => AnimalType::Goat,
            _ => AnimalType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AnimalType::Cow => "cow",
            AnimalType::Goat => "goat",
            AnimalType::Other(name) => name,
        }
    }

    pub fn is_goat(&self) -> bool {
        matches!(self, AnimalType::Goat)
    }

    /// Re-check cadence in days for this animal.
    pub fn check_period_days(&self) -> i32 {
        match self {
            AnimalType::Cow => CHECK_PERIOD_COW_DAYS,
            _ => CHECK_PERIOD_DEFAULT_DAYS,
        }
    }

    /// Target weight given the weight at purchase.
    pub fn target_weight(&self, purchase_weight: f64) -> f64 {
        match self {
            AnimalType::Goat => GOAT_TARGET_WEIGHT_KG,
            _ => purchase_weight + TARGET_GAIN_KG,
        }
    }
}

impl From<String> for AnimalType {
    fn from(raw: String) -> Self {
        AnimalType::parse(&raw)
    }
}

impl From<AnimalType> for String {
    fn from(animal: AnimalType) -> Self {
        animal.as_str().to_string()
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
