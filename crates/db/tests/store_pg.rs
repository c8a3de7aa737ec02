//! Integration tests for the PostgreSQL store.
//!
//! These need a reachable database (`DATABASE_URL`); run them with
//! `cargo test -p paddock-db -- --ignored`.

use chrono::NaiveDate;
use paddock_core::account::NewUser;
use paddock_core::animal::AnimalType;
use paddock_core::error::CoreError;
use paddock_core::project::NewProject;
use paddock_core::roles::ROLE_USER;
use paddock_core::store::{ProjectStore, UserStore};
use paddock_core::tracker::Tracker;
use paddock_db::PgStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Karim".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        role: ROLE_USER.to_string(),
    }
}

async fn seed_owner(store: &PgStore) -> i64 {
    store
        .create_user(&new_user("owner@example.com"))
        .await
        .expect("user insert should succeed")
        .id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find_project(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = seed_owner(&store).await;

    let input = NewProject::prepare(owner, "Lalu", AnimalType::Cow, day(1), 160.0, day(1)).unwrap();
    let created = store.create(&input).await.unwrap();
    assert_eq!(created.feed_tier, 2);
    assert_eq!(created.check_period_days, 30);
    assert_eq!(created.day.task_reset_date, Some(day(1)));

    assert!(store.find_owned(created.id, owner).await.unwrap().is_some());
    assert!(store.find_owned(created.id, owner + 1).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_day_state_round_trips_through_jsonb(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = seed_owner(&store).await;
    let input = NewProject::prepare(owner, "Kali", AnimalType::Goat, day(1), 20.0, day(1)).unwrap();
    let created = store.create(&input).await.unwrap();

    let mut refreshed = Tracker::default().refresh(created, day(2)).project;
    refreshed.day.record_completion(&[0, 4], 12).unwrap();
    refreshed.day.attach_photos(4, vec!["abc_goat.jpg".into()], true);

    let saved = store.save(&refreshed).await.unwrap().unwrap();
    assert_eq!(saved.day, refreshed.day);
    assert_eq!(saved.last_check_day, Some(1));

    let reloaded = store.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(reloaded.day.photos_for(4), ["abc_goat.jpg"]);
    assert!(reloaded.day.is_done(0));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_project(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = seed_owner(&store).await;
    let input = NewProject::prepare(owner, "Tmp", AnimalType::Cow, day(1), 100.0, day(1)).unwrap();
    let created = store.create(&input).await.unwrap();

    assert!(store.delete(created.id).await.unwrap());
    assert!(!store.delete(created.id).await.unwrap());
    assert!(store.find_by_id(created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_is_conflict(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_user(&new_user("dup@example.com")).await.unwrap();
    let result = store.create_user(&new_user("dup@example.com")).await;
    assert!(matches!(result, Err(CoreError::Conflict(_))));
}
