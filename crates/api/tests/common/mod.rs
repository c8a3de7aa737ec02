//! Shared harness for the HTTP integration tests.
//!
//! Each test gets its own in-memory store, a fixed clock and a temporary
//! upload directory, wired through the same router the binary builds.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use paddock_api::auth::jwt::{generate_access_token, JwtConfig};
use paddock_api::auth::password::hash_password;
use paddock_api::config::ServerConfig;
use paddock_api::router::build_app_router;
use paddock_api::state::AppState;
use paddock_api::storage::LocalPhotoStore;
use paddock_core::account::NewUser;
use paddock_core::clock::FixedClock;
use paddock_core::countdown::Locale;
use paddock_core::roles::ROLE_ADMIN;
use paddock_core::store::{PhotoStore, UserStore};
use paddock_core::tracker::{RecheckPolicy, Tracker};
use paddock_db::MemoryStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "hay-bales-and-water";

const BOUNDARY: &str = "paddock-test-boundary";

/// 2026-03-01 21:30:15, two and a half hours before midnight.
pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(21, 30, 15)
        .unwrap()
}

pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 5 * 1024 * 1024,
        locale: Locale::English,
        recheck: RecheckPolicy::default(),
        jwt: JwtConfig {
            secret: "paddock-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub config: ServerConfig,
    pub uploads: TempDir,
}

pub async fn build_test_app() -> TestApp {
    build_test_app_with_photos(|photos| Arc::new(photos) as Arc<dyn PhotoStore>).await
}

/// Like [`build_test_app`], with the photo store wrapped by `wrap`.
pub async fn build_test_app_with_photos(
    wrap: impl FnOnce(LocalPhotoStore) -> Arc<dyn PhotoStore>,
) -> TestApp {
    let uploads = tempfile::tempdir().expect("temp dir");
    let config = test_config(uploads.path());
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(start_time()));
    let photos = LocalPhotoStore::create(uploads.path())
        .await
        .expect("upload dir");

    let state = AppState {
        projects: store.clone(),
        users: store.clone(),
        photos: wrap(photos),
        clock: clock.clone(),
        tracker: Tracker::new(config.recheck),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        clock,
        config,
        uploads,
    }
}

/// One field of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    },
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(request(Method::GET, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(request(Method::DELETE, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(
            request(Method::POST, uri, token)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(
            request(Method::PUT, uri, token)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_multipart(&self, uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Response {
        self.send(
            request(Method::POST, uri, token)
                .header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(parts)))
                .unwrap(),
        )
        .await
    }

    /// Sign up a regular account and return its token and id.
    pub async fn signup(&self, name: &str, email: &str) -> (String, i64) {
        let response = self
            .post_json(
                "/api/v1/auth/signup",
                None,
                json!({ "name": name, "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        (
            json["access_token"].as_str().unwrap().to_string(),
            json["user"]["id"].as_i64().unwrap(),
        )
    }

    /// Provision an admin directly in the store and return a token for it.
    pub async fn admin_token(&self) -> String {
        let admin = self
            .store
            .create_user(&NewUser {
                name: "Admin".to_string(),
                email: "admin@paddock.test".to_string(),
                password_hash: hash_password(PASSWORD).unwrap(),
                role: ROLE_ADMIN.to_string(),
            })
            .await
            .unwrap();
        generate_access_token(admin.id, ROLE_ADMIN, &self.config.jwt).unwrap()
    }

    /// Create a project through the API and return its JSON record.
    pub async fn create_project(
        &self,
        token: &str,
        animal_type: &str,
        weight: f64,
        purchase_date: &str,
    ) -> Value {
        let response = self
            .post_json(
                "/api/v1/projects",
                Some(token),
                json!({
                    "name": "Lalu",
                    "animal_type": animal_type,
                    "purchase_date": purchase_date,
                    "weight": weight,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["data"].clone()
    }

    pub async fn dashboard(&self, token: &str, id: i64) -> Value {
        let response = self
            .get(&format!("/api/v1/projects/{id}/dashboard"), Some(token))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["data"].clone()
    }

    pub fn upload_path(&self, name: &str) -> std::path::PathBuf {
        self.uploads.path().join(name)
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
