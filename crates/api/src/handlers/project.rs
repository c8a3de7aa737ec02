//! Owner-facing handlers for the `/projects` resource.
//!
//! Every project-scoped handler runs the daily refresh before reading or
//! mutating task state, so a request on a new day never touches the
//! previous day's flags or photos.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use paddock_core::animal::AnimalType;
use paddock_core::countdown::until_midnight;
use paddock_core::error::CoreError;
use paddock_core::input::{parse_purchase_date, parse_task_index, parse_weight, NumberInput};
use paddock_core::project::{NewProject, Project};
use paddock_core::schedule::Schedule;
use paddock_core::tracker::{elapsed_days, DisplayMeta};
use serde::{Deserialize, Serialize};

use super::{load_owned, read_photo_form, refresh_for_today, remove_photo_files, save_project};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub animal_type: String,
    pub purchase_date: String,
    pub weight: NumberInput,
}

/// Request body for `POST /projects/{id}/weight`.
#[derive(Debug, Deserialize)]
pub struct WeightRequest {
    pub weight: NumberInput,
}

/// Request body for `POST /projects/{id}/tasks`.
#[derive(Debug, Deserialize)]
pub struct SaveTasksRequest {
    /// Indices of the tasks that are done; every other task is not done.
    #[serde(default)]
    pub done: Vec<usize>,
}

/// A project in the owner's list.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub elapsed_days: i64,
}

/// Everything the daily dashboard shows.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub project: Project,
    pub schedule: Schedule,
    #[serde(flatten)]
    pub meta: DisplayMeta,
    /// Time left until the task list resets, localized.
    pub countdown: String,
}

/// Result of a photo upload.
#[derive(Debug, Serialize)]
pub struct PhotoUploadResult {
    pub task_index: usize,
    /// Stored names of the accepted files, in upload order.
    pub stored: Vec<String>,
    pub task_done: bool,
    pub project: Project,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ProjectSummary>>>> {
    let today = state.clock.today();
    let data = state
        .projects
        .list_by_owner(auth.user_id)
        .await?
        .into_iter()
        .map(|project| ProjectSummary {
            elapsed_days: elapsed_days(project.purchase_date, today),
            project,
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let weight = parse_weight(&input.weight)?;
    let purchase_date = parse_purchase_date(&input.purchase_date)?;
    if input.animal_type.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Animal type must not be empty".into(),
        )));
    }
    let animal_type = AnimalType::parse(&input.animal_type);

    let new = NewProject::prepare(
        auth.user_id,
        &input.name,
        animal_type,
        purchase_date,
        weight,
        state.clock.today(),
    )?;
    let project = state.projects.create(&new).await?;

    tracing::info!(
        project_id = project.id,
        owner_id = project.owner_id,
        animal_type = %project.animal_type,
        feed_tier = project.feed_tier,
        "Project created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}/dashboard
///
/// Applies any due re-check and the daily reset, persists them, and returns
/// the day's schedule with the derived display values.
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let project = load_owned(&state, &raw_id, auth.user_id).await?;
    let refresh = refresh_for_today(&state, project);

    let project = if refresh.outcome.changed() {
        save_project(&state, &refresh.project).await?
    } else {
        refresh.project
    };

    let countdown = until_midnight(state.clock.now()).render(state.config.locale);

    Ok(Json(DataResponse {
        data: Dashboard {
            project,
            schedule: refresh.schedule,
            meta: refresh.meta,
            countdown,
        },
    }))
}

/// POST /api/v1/projects/{id}/weight
///
/// Record a measured weight and re-tier. Invalid input leaves the record
/// untouched.
pub async fn update_weight(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(input): Json<WeightRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let mut project = load_owned(&state, &raw_id, auth.user_id).await?;
    let weight = parse_weight(&input.weight)?;

    let previous_tier = project.feed_tier;
    project.set_weight(weight);
    let project = save_project(&state, &project).await?;

    tracing::info!(
        project_id = project.id,
        weight,
        previous_tier,
        new_tier = project.feed_tier,
        "Weight updated",
    );

    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/tasks
///
/// Replace today's completion flags.
pub async fn save_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(input): Json<SaveTasksRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_owned(&state, &raw_id, auth.user_id).await?;
    let mut refresh = refresh_for_today(&state, project);

    refresh
        .project
        .day
        .record_completion(&input.done, refresh.schedule.task_count())?;
    let project = save_project(&state, &refresh.project).await?;

    tracing::debug!(project_id = project.id, done = input.done.len(), "Tasks saved");

    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/photos
///
/// Multipart form: `task_index` plus one or more `photos` files. Stored
/// photos are appended to the task and the task is marked done.
pub async fn upload_photos(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<PhotoUploadResult>>> {
    let form = read_photo_form(multipart).await?;
    let project = load_owned(&state, &raw_id, auth.user_id).await?;

    let raw_index = form
        .task_index
        .ok_or_else(|| AppError::BadRequest("Missing required 'task_index' field".into()))?;
    let task_index = parse_task_index(&raw_index)?;

    let mut refresh = refresh_for_today(&state, project);
    if !refresh.schedule.contains_index(task_index) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Task index {task_index} is out of range (schedule has {} tasks)",
            refresh.schedule.task_count()
        ))));
    }

    let stored = state.photos.save(task_index, form.uploads).await?;
    refresh
        .project
        .day
        .attach_photos(task_index, stored.clone(), true);
    let project = match save_project(&state, &refresh.project).await {
        Ok(project) => project,
        Err(e) => {
            remove_photo_files(&state, refresh.project.id, &stored).await;
            return Err(e);
        }
    };

    tracing::info!(
        project_id = project.id,
        task_index,
        count = stored.len(),
        "Task photos uploaded",
    );

    Ok(Json(DataResponse {
        data: PhotoUploadResult {
            task_index,
            task_done: project.day.is_done(task_index),
            stored,
            project,
        },
    }))
}
