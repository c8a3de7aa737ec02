//! Route definitions for the owner-facing `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}/dashboard      -> dashboard
/// POST   /{id}/weight         -> update_weight
/// POST   /{id}/tasks          -> save_tasks
/// POST   /{id}/photos         -> upload_photos (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}/dashboard", get(project::dashboard))
        .route("/{id}/weight", post(project::update_weight))
        .route("/{id}/tasks", post(project::save_tasks))
        .route("/{id}/photos", post(project::upload_photos))
}
