//! Collaborator interfaces the tracker depends on.
//!
//! Handlers receive these as trait objects through application state, so
//! the storage technology (PostgreSQL, in-memory, local disk) is chosen at
//! startup rather than baked into the domain code.

use async_trait::async_trait;

use crate::account::{NewUser, User};
use crate::error::CoreError;
use crate::project::{NewProject, Project};
use crate::types::DbId;

/// Project documents.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create(&self, input: &NewProject) -> Result<Project, CoreError>;

    /// Any project, regardless of owner (admin access).
    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, CoreError>;

    /// A project only if it belongs to `owner_id`.
    async fn find_owned(&self, id: DbId, owner_id: DbId) -> Result<Option<Project>, CoreError>;

    /// An owner's projects, newest first.
    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Project>, CoreError>;

    /// Every project, newest first.
    async fn list_all(&self) -> Result<Vec<Project>, CoreError>;

    /// Write back every mutable field. Returns the stored record, or `None`
    /// if the project no longer exists.
    async fn save(&self, project: &Project) -> Result<Option<Project>, CoreError>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    async fn health_check(&self) -> Result<(), CoreError>;
}

/// User accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`CoreError::Conflict`] when the email is taken.
    async fn create_user(&self, input: &NewUser) -> Result<User, CoreError>;

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, CoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    async fn list_users(&self) -> Result<Vec<User>, CoreError>;
}

/// An uploaded image awaiting storage.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Client-supplied name, unsanitized.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Photo file storage. The tracker only ever handles the returned names.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store accepted uploads for a task and return their stored names in
    /// upload order. Uploads with a disallowed extension are skipped.
    async fn save(
        &self,
        task_index: usize,
        uploads: Vec<PhotoUpload>,
    ) -> Result<Vec<String>, CoreError>;

    async fn delete(&self, filename: &str) -> Result<(), CoreError>;
}
