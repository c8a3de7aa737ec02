//! PostgreSQL implementation of the store traits.

use async_trait::async_trait;
use paddock_core::account::{NewUser, User};
use paddock_core::error::CoreError;
use paddock_core::project::{NewProject, Project};
use paddock_core::store::{ProjectStore, UserStore};
use paddock_core::types::DbId;

use crate::repositories::{ProjectRepo, UserRepo};
use crate::{map_sqlx_error, DbPool};

/// Store backed by a connection pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn create(&self, input: &NewProject) -> Result<Project, CoreError> {
        let row = ProjectRepo::create(&self.pool, input)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        let row = ProjectRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Project::from))
    }

    async fn find_owned(&self, id: DbId, owner_id: DbId) -> Result<Option<Project>, CoreError> {
        let row = ProjectRepo::find_owned(&self.pool, id, owner_id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Project::from))
    }

    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Project>, CoreError> {
        let rows = ProjectRepo::list_by_owner(&self.pool, owner_id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Project>, CoreError> {
        let rows = ProjectRepo::list(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn save(&self, project: &Project) -> Result<Option<Project>, CoreError> {
        let row = ProjectRepo::update(&self.pool, project)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Project::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        ProjectRepo::delete(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &NewUser) -> Result<User, CoreError> {
        let row = UserRepo::create(&self.pool, input)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        let row = UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let row = UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(User::from))
    }

    async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let rows = UserRepo::list(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
