//! HTTP handlers, grouped by resource.
//!
//! Shared helpers for loading, refreshing and persisting projects live here
//! so owner and admin paths apply the daily rules identically.

pub mod admin;
pub mod auth;
pub mod project;

use axum::extract::Multipart;
use paddock_core::input::parse_project_id;
use paddock_core::project::Project;
use paddock_core::store::PhotoUpload;
use paddock_core::tracker::Refresh;
use paddock_core::types::DbId;

use crate::error::{project_not_found, AppError, AppResult};
use crate::state::AppState;

/// Load a project the caller owns. Unknown and foreign ids are both 404.
pub(crate) async fn load_owned(
    state: &AppState,
    raw_id: &str,
    owner_id: DbId,
) -> AppResult<Project> {
    let id = parse_project_id(raw_id)?;
    state
        .projects
        .find_owned(id, owner_id)
        .await?
        .ok_or_else(|| project_not_found(id))
}

/// Load any project (admin access).
pub(crate) async fn load_any(state: &AppState, raw_id: &str) -> AppResult<Project> {
    let id = parse_project_id(raw_id)?;
    state
        .projects
        .find_by_id(id)
        .await?
        .ok_or_else(|| project_not_found(id))
}

/// Run the daily refresh against the clock's current day and log what it
/// changed. Nothing is persisted here.
pub(crate) fn refresh_for_today(state: &AppState, project: Project) -> Refresh {
    let id = project.id;
    let refresh = state.tracker.refresh(project, state.clock.today());

    if let Some(recheck) = &refresh.outcome.recheck {
        tracing::info!(
            project_id = id,
            elapsed_days = recheck.elapsed_days,
            previous_tier = recheck.previous_tier,
            new_tier = recheck.new_tier,
            weight = refresh.project.weight,
            "Periodic weight re-check applied",
        );
    }
    if refresh.outcome.day_reset {
        tracing::info!(
            project_id = id,
            day = %refresh.meta.today,
            "Daily task state reset",
        );
    }

    refresh
}

/// Write a project back. A record deleted in the meantime is a 404.
pub(crate) async fn save_project(state: &AppState, project: &Project) -> AppResult<Project> {
    state
        .projects
        .save(project)
        .await?
        .ok_or_else(|| project_not_found(project.id))
}

/// Best-effort removal of photo files. Failures are logged, not returned,
/// because the record no longer references them.
pub(crate) async fn remove_photo_files(state: &AppState, project_id: DbId, filenames: &[String]) {
    for name in filenames {
        if let Err(e) = state.photos.delete(name).await {
            tracing::error!(project_id, file = %name, error = %e, "Failed to delete photo file");
        }
    }
}

/// Fields of a photo upload form.
#[derive(Debug, Default)]
pub(crate) struct PhotoForm {
    /// Raw `task_index` text, if the form carried one.
    pub task_index: Option<String>,
    pub uploads: Vec<PhotoUpload>,
}

/// Read a multipart form with `photos` file fields and an optional
/// `task_index` text field. Unknown fields are ignored.
pub(crate) async fn read_photo_form(mut multipart: Multipart) -> AppResult<PhotoForm> {
    let mut form = PhotoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "task_index" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.task_index = Some(text);
            }
            "photos" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if file_name.is_empty() || bytes.is_empty() {
                    continue;
                }
                form.uploads.push(PhotoUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}
