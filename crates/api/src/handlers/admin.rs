//! Admin handlers for the `/admin/projects` resource.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use paddock_core::animal::AnimalType;
use paddock_core::day_state::{TaskEdit, TaskFlags, TaskPhotos};
use paddock_core::error::CoreError;
use paddock_core::input::{parse_purchase_date, parse_task_index, parse_weight, NumberInput};
use paddock_core::project::{Project, ProjectEdit};
use serde::{Deserialize, Serialize};

use super::{load_any, read_photo_form, refresh_for_today, remove_photo_files, save_project};
use crate::error::{project_not_found, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Shown when a project's owner account no longer exists.
const UNKNOWN_OWNER: &str = "Unknown";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A project with its owner's contact details.
#[derive(Debug, Serialize)]
pub struct AdminProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub owner_name: String,
    pub owner_email: String,
}

/// Request body for `PUT /admin/projects/{id}`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct AdminUpdateRequest {
    pub name: Option<String>,
    pub animal_type: Option<String>,
    pub purchase_date: Option<String>,
    pub weight: Option<NumberInput>,
    /// Today's flags per task index; see [`TaskEdit::task_done`].
    pub task_done: Option<TaskFlags>,
    /// Photos to drop, per task index.
    #[serde(default)]
    pub delete_photos: TaskPhotos,
}

impl AdminUpdateRequest {
    /// Parse the loosely-typed fields. Nothing is applied on error.
    fn to_edit(&self) -> Result<ProjectEdit, CoreError> {
        let animal_type = match &self.animal_type {
            Some(raw) if raw.trim().is_empty() => {
                return Err(CoreError::Validation(
                    "Animal type must not be empty".into(),
                ))
            }
            Some(raw) => Some(AnimalType::parse(raw)),
            None => None,
        };

        Ok(ProjectEdit {
            name: self.name.clone(),
            animal_type,
            purchase_date: self
                .purchase_date
                .as_deref()
                .map(parse_purchase_date)
                .transpose()?,
            weight: self.weight.as_ref().map(parse_weight).transpose()?,
        })
    }

    fn task_edit(self) -> TaskEdit {
        TaskEdit {
            task_done: self.task_done,
            delete_photos: self.delete_photos,
        }
    }
}

/// Result of an admin photo upload.
#[derive(Debug, Serialize)]
pub struct AdminPhotoResult {
    pub task_index: usize,
    pub stored: Vec<String>,
    pub project: Project,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<AdminProjectView>>>> {
    let owners: HashMap<_, _> = state
        .users
        .list_users()
        .await?
        .into_iter()
        .map(|u| (u.id, (u.name, u.email)))
        .collect();

    let data = state
        .projects
        .list_all()
        .await?
        .into_iter()
        .map(|project| {
            let (owner_name, owner_email) = owners
                .get(&project.owner_id)
                .cloned()
                .unwrap_or_else(|| (UNKNOWN_OWNER.to_string(), UNKNOWN_OWNER.to_string()));
            AdminProjectView {
                project,
                owner_name,
                owner_email,
            }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_any(&state, &raw_id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Field corrections are applied first; task flags and photo deletions are
/// then checked against the resulting schedule. Files that are no longer
/// referenced are removed after the record is saved.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
    Json(input): Json<AdminUpdateRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_any(&state, &raw_id).await?;
    let edit = input.to_edit()?;

    let mut project = refresh_for_today(&state, project).project;
    project.apply_edit(edit)?;

    let task_count = project.schedule(state.clock.today()).task_count();
    let removed = project.day.apply_edit(&input.task_edit(), task_count)?;

    let project = save_project(&state, &project).await?;
    remove_photo_files(&state, project.id, &removed).await;

    tracing::info!(
        project_id = project.id,
        admin_id = admin.user_id,
        removed_photos = removed.len(),
        "Project updated by admin",
    );

    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/admin/projects/{id}/photos/{task_index}
///
/// Adds photos to a task without touching its done flag.
pub async fn upload_photos(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((raw_id, raw_index)): Path<(String, String)>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<AdminPhotoResult>>> {
    let form = read_photo_form(multipart).await?;
    let project = load_any(&state, &raw_id).await?;
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
        .attach_photos(task_index, stored.clone(), false);
    let project = match save_project(&state, &refresh.project).await {
        Ok(project) => project,
        Err(e) => {
            remove_photo_files(&state, refresh.project.id, &stored).await;
            return Err(e);
        }
    };

    Ok(Json(DataResponse {
        data: AdminPhotoResult {
            task_index,
            stored,
            project,
        },
    }))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Removes the record, then every photo file it referenced.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let project = load_any(&state, &raw_id).await?;

    if !state.projects.delete(project.id).await? {
        return Err(project_not_found(project.id));
    }
    let photos = project.photo_filenames();
    remove_photo_files(&state, project.id, &photos).await;

    tracing::info!(
        project_id = project.id,
        admin_id = admin.user_id,
        removed_photos = photos.len(),
        "Project deleted by admin",
    );

    Ok(StatusCode::NO_CONTENT)
}
