//! The tracked-animal project record.

use chrono::NaiveDate;
use serde::Serialize;

use crate::animal::AnimalType;
use crate::day_state::DayState;
use crate::error::CoreError;
use crate::feeding::feed_tier;
use crate::schedule::{build_schedule, Schedule};
use crate::types::{DbId, Timestamp};

/// One tracked animal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub animal_type: AnimalType,
    pub purchase_date: NaiveDate,
    pub weight: f64,
    pub feed_tier: i32,
    pub target_weight: f64,
    pub check_period_days: i32,
    /// Elapsed-day count at which the last periodic re-check ran.
    pub last_check_day: Option<i64>,
    #[serde(flatten)]
    pub day: DayState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for a project about to be inserted. Derived values are computed
/// by [`NewProject::prepare`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub owner_id: DbId,
    pub name: String,
    pub animal_type: AnimalType,
    pub purchase_date: NaiveDate,
    pub weight: f64,
    pub feed_tier: i32,
    pub target_weight: f64,
    pub check_period_days: i32,
    pub day: DayState,
}

/// Admin field corrections. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectEdit {
    pub name: Option<String>,
    pub animal_type: Option<AnimalType>,
    pub purchase_date: Option<NaiveDate>,
    pub weight: Option<f64>,
}

impl NewProject {
    pub fn prepare(
        owner_id: DbId,
        name: &str,
        animal_type: AnimalType,
        purchase_date: NaiveDate,
        weight: f64,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        let name = normalize_name(name)?;
        Ok(Self {
            owner_id,
            name,
            feed_tier: feed_tier(weight, &animal_type),
            target_weight: animal_type.target_weight(weight),
            check_period_days: animal_type.check_period_days(),
            animal_type,
            purchase_date,
            weight,
            day: DayState::fresh(today),
        })
    }
}

impl Project {
    /// Record a measured weight and re-tier from it.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
        self.feed_tier = feed_tier(weight, &self.animal_type);
    }

    /// Apply admin corrections. The feed tier is always recomputed from the
    /// resulting weight and type; a type change also resets the check period.
    pub fn apply_edit(&mut self, edit: ProjectEdit) -> Result<(), CoreError> {
        if let Some(name) = edit.name {
            self.name = normalize_name(&name)?;
        }
        if let Some(animal_type) = edit.animal_type {
            if animal_type != self.animal_type {
                self.check_period_days = animal_type.check_period_days();
            }
            self.animal_type = animal_type;
        }
        if let Some(purchase_date) = edit.purchase_date {
            self.purchase_date = purchase_date;
        }
        if let Some(weight) = edit.weight {
            self.weight = weight;
        }
        self.feed_tier = feed_tier(self.weight, &self.animal_type);
        Ok(())
    }

    /// The schedule for `day` at the current weight.
    pub fn schedule(&self, day: NaiveDate) -> Schedule {
        build_schedule(day, self.weight, &self.animal_type)
    }

    /// Every photo filename this record references.
    pub fn photo_filenames(&self) -> Vec<String> {
        self.day.all_photos().cloned().collect()
    }
}

fn normalize_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Project name must not be empty".into()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};

    use super::*;

    /// A persisted project as it would look right after creation on `today`.
    pub fn project(animal_type: AnimalType, weight: f64, purchase_date: NaiveDate) -> Project {
        let new = NewProject::prepare(1, "Lalu", animal_type, purchase_date, weight, purchase_date)
            .expect("fixture should be valid");
        let stamp = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Project {
            id: 7,
            owner_id: new.owner_id,
            name: new.name,
            animal_type: new.animal_type,
            purchase_date: new.purchase_date,
            weight: new.weight,
            feed_tier: new.feed_tier,
            target_weight: new.target_weight,
            check_period_days: new.check_period_days,
            last_check_day: None,
            day: new.day,
            created_at: stamp,
            updated_at: stamp,
        }
    }
}
