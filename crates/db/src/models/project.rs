//! Row mapping for the `projects` table.

use chrono::NaiveDate;
use paddock_core::animal::AnimalType;
use paddock_core::day_state::{DayState, TaskFlags, TaskPhotos};
use paddock_core::project::Project;
use paddock_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A project row as stored. Converted into [`Project`] at the repository
/// boundary.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub animal_type: String,
    pub purchase_date: NaiveDate,
    pub weight: f64,
    pub feed_tier: i32,
    pub target_weight: f64,
    pub check_period_days: i32,
    pub last_check_day: Option<i64>,
    pub task_reset_date: Option<NaiveDate>,
    pub task_state: Json<TaskFlags>,
    pub task_photos: Json<TaskPhotos>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            animal_type: AnimalType::parse(&row.animal_type),
            purchase_date: row.purchase_date,
            weight: row.weight,
            feed_tier: row.feed_tier,
            target_weight: row.target_weight,
            check_period_days: row.check_period_days,
            last_check_day: row.last_check_day,
            day: DayState {
                task_reset_date: row.task_reset_date,
                task_state: row.task_state.0,
                task_photos: row.task_photos.0,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
