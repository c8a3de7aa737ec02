use std::sync::Arc;

use paddock_core::clock::Clock;
use paddock_core::store::{PhotoStore, ProjectStore, UserStore};
use paddock_core::tracker::Tracker;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
/// Collaborators are trait objects chosen at startup.
#[derive(Clone)]
pub struct AppState {
    /// Project documents.
    pub projects: Arc<dyn ProjectStore>,
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Photo file storage.
    pub photos: Arc<dyn PhotoStore>,
    /// Source of the current local time.
    pub clock: Arc<dyn Clock>,
    /// Daily refresh engine configured with the re-check policy.
    pub tracker: Tracker,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
