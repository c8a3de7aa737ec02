//! In-memory implementation of the store traits.
//!
//! Data lives for the life of the process. The lock only keeps the maps
//! consistent; read-modify-write sequences across calls are last-write-wins,
//! exactly as with the database backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use paddock_core::account::{NewUser, User};
use paddock_core::error::CoreError;
use paddock_core::project::{NewProject, Project};
use paddock_core::store::{ProjectStore, UserStore};
use paddock_core::types::DbId;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    projects: BTreeMap<DbId, Project>,
    users: BTreeMap<DbId, User>,
    next_project_id: DbId,
    next_user_id: DbId,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create(&self, input: &NewProject) -> Result<Project, CoreError> {
        let mut inner = self.inner.write().await;
        inner.next_project_id += 1;
        let now = Utc::now();
        let project = Project {
            id: inner.next_project_id,
            owner_id: input.owner_id,
            name: input.name.clone(),
            animal_type: input.animal_type.clone(),
            purchase_date: input.purchase_date,
            weight: input.weight,
            feed_tier: input.feed_tier,
            target_weight: input.target_weight,
            check_period_days: input.check_period_days,
            last_check_day: None,
            day: input.day.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        Ok(self.inner.read().await.projects.get(&id).cloned())
    }

    async fn find_owned(&self, id: DbId, owner_id: DbId) -> Result<Option<Project>, CoreError> {
        Ok(self
            .inner
            .read()
            .await
            .projects
            .get(&id)
            .filter(|p| p.owner_id == owner_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Project>, CoreError> {
        Ok(self
            .inner
            .read()
            .await
            .projects
            .values()
            .rev()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Project>, CoreError> {
        Ok(self.inner.read().await.projects.values().rev().cloned().collect())
    }

    async fn save(&self, project: &Project) -> Result<Option<Project>, CoreError> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.projects.get_mut(&project.id) else {
            return Ok(None);
        };
        // Identity and ownership are fixed at creation.
        let mut updated = project.clone();
        updated.owner_id = stored.owner_id;
        updated.created_at = stored.created_at;
        updated.updated_at = Utc::now();
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.inner.write().await.projects.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &NewUser) -> Result<User, CoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == input.email) {
            return Err(CoreError::Conflict(
                "Duplicate value violates unique constraint: uq_users_email".into(),
            ));
        }
        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.inner.read().await.users.values().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use paddock_core::animal::AnimalType;
    use paddock_core::roles::ROLE_USER;

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn new_project(owner_id: DbId, name: &str) -> NewProject {
        NewProject::prepare(owner_id, name, AnimalType::Cow, day(), 140.0, day()).unwrap()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Rahim".into(),
            email: email.into(),
            password_hash: "hash".into(),
            role: ROLE_USER.into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.create(&new_project(1, "A")).await.unwrap();
        let b = store.create(&new_project(1, "B")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(a.last_check_day, None);
    }

    #[tokio::test]
    async fn find_owned_hides_other_owners() {
        let store = MemoryStore::new();
        let p = store.create(&new_project(1, "A")).await.unwrap();
        assert!(store.find_owned(p.id, 1).await.unwrap().is_some());
        assert!(store.find_owned(p.id, 2).await.unwrap().is_none());
        assert!(store.find_by_id(p.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryStore::new();
        store.create(&new_project(1, "Old")).await.unwrap();
        store.create(&new_project(2, "Other")).await.unwrap();
        store.create(&new_project(1, "New")).await.unwrap();

        let mine: Vec<_> = store
            .list_by_owner(1)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(mine, ["New", "Old"]);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn save_keeps_owner_and_reports_missing() {
        let store = MemoryStore::new();
        let mut p = store.create(&new_project(1, "A")).await.unwrap();
        p.owner_id = 99;
        p.set_weight(300.0);

        let saved = store.save(&p).await.unwrap().unwrap();
        assert_eq!(saved.owner_id, 1);
        assert_eq!(saved.feed_tier, 3);

        store.delete(p.id).await.unwrap();
        assert!(store.save(&p).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.create_user(&new_user("a@example.com")).await.unwrap();
        let result = store.create_user(&new_user("a@example.com")).await;
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }
}
