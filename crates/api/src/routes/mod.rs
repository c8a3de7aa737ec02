pub mod admin;
pub mod auth;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                 create account (public)
/// /auth/login                                  login (public)
/// /auth/me                                     current account
///
/// /projects                                    list, create (owner)
/// /projects/{id}/dashboard                     daily view
/// /projects/{id}/weight                        record weight (POST)
/// /projects/{id}/tasks                         save completion (POST)
/// /projects/{id}/photos                        upload task photos (POST)
///
/// /admin/projects                              list (admin only)
/// /admin/projects/{id}                         get, update, delete
/// /admin/projects/{id}/photos/{task_index}     upload task photos (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/admin/projects", admin::router())
}
