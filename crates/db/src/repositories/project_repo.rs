//! Repository for the `projects` table.

use paddock_core::project::{NewProject, Project};
use paddock_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::ProjectRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, animal_type, purchase_date, weight, feed_tier, \
                       target_weight, check_period_days, last_check_day, task_reset_date, \
                       task_state, task_photos, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewProject) -> Result<ProjectRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_id, name, animal_type, purchase_date, weight, feed_tier,
                                   target_weight, check_period_days, task_reset_date,
                                   task_state, task_photos)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(input.animal_type.as_str())
            .bind(input.purchase_date)
            .bind(input.weight)
            .bind(input.feed_tier)
            .bind(input.target_weight)
            .bind(input.check_period_days)
            .bind(input.day.task_reset_date)
            .bind(Json(&input.day.task_state))
            .bind(Json(&input.day.task_photos))
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID, scoped to its owner.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's projects ordered by most recently created first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, ProjectRow>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable column from `project`.
    ///
    /// Returns `None` if no row with the project's `id` exists.
    pub async fn update(pool: &PgPool, project: &Project) -> Result<Option<ProjectRow>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                animal_type = $3,
                purchase_date = $4,
                weight = $5,
                feed_tier = $6,
                target_weight = $7,
                check_period_days = $8,
                last_check_day = $9,
                task_reset_date = $10,
                task_state = $11,
                task_photos = $12,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(project.id)
            .bind(&project.name)
            .bind(project.animal_type.as_str())
            .bind(project.purchase_date)
            .bind(project.weight)
            .bind(project.feed_tier)
            .bind(project.target_weight)
            .bind(project.check_period_days)
            .bind(project.last_check_day)
            .bind(project.day.task_reset_date)
            .bind(Json(&project.day.task_state))
            .bind(Json(&project.day.task_photos))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
