//! Route definitions for `/admin/projects`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin/projects`. Every handler requires the admin role.
///
/// ```text
/// GET    /                            -> list
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// POST   /{id}/photos/{task_index}    -> upload_photos (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::list))
        .route(
            "/{id}",
            get(admin::get_by_id)
                .put(admin::update)
                .delete(admin::delete),
        )
        .route("/{id}/photos/{task_index}", post(admin::upload_photos))
}
