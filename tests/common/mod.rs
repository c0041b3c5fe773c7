#![allow(dead_code)]

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use uuid::Uuid;

use weeklog::config::RuntimeMode;
use weeklog::db::{create_memory_pool, DbPool};
use weeklog::error::{AppError, Result};
use weeklog::handlers::AppState;
use weeklog::migrations::run_migrations;
use weeklog::models::{Day, WorkoutRecord};
use weeklog::repositories::{JsonFileRepository, StoreHandle, WorkoutRepository, WorkoutStore};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations(&pool).expect("Failed to run migrations");
    pool
}

pub fn sqlite_store() -> StoreHandle {
    Arc::new(WorkoutRepository::new(setup_test_db()))
}

/// A fresh directory under the system temp dir, removed on drop.
pub struct TestDir(PathBuf);

impl Deref for TestDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for TestDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

pub fn temp_dir() -> TestDir {
    let dir = std::env::temp_dir().join(format!("weeklog-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    TestDir(dir)
}

/// A file-backed store plus the directory holding it. Keep the `TestDir`
/// alive for as long as the store is used.
pub fn file_store() -> (StoreHandle, PathBuf, TestDir) {
    let dir = temp_dir();
    let path = dir.join("week.json");
    (Arc::new(JsonFileRepository::new(&path)), path, dir)
}

pub struct Backend {
    pub name: &'static str,
    pub store: StoreHandle,
    _dir: Option<TestDir>,
}

/// Both backends, labelled for assertion messages.
pub fn all_stores() -> Vec<Backend> {
    let (file, _, dir) = file_store();
    vec![
        Backend {
            name: "sqlite",
            store: sqlite_store(),
            _dir: None,
        },
        Backend {
            name: "json-file",
            store: file,
            _dir: Some(dir),
        },
    ]
}

pub fn create_test_app(store: StoreHandle) -> Router {
    create_test_app_with_mode(store, RuntimeMode::Production)
}

pub fn create_test_app_with_mode(store: StoreHandle, mode: RuntimeMode) -> Router {
    weeklog::routes::create_router(AppState::new(store), mode)
}

/// Store whose backend is never reachable.
pub struct UnreachableStore;

impl UnreachableStore {
    fn error() -> AppError {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused by storage host",
        ))
    }
}

#[async_trait]
impl WorkoutStore for UnreachableStore {
    async fn get_by_day(&self, _day: Day) -> Result<WorkoutRecord> {
        Err(Self::error())
    }

    async fn set_rest_day(&self, _day: Day) -> Result<WorkoutRecord> {
        Err(Self::error())
    }

    async fn append_exercise(&self, _day: Day, _exercise: &str) -> Result<WorkoutRecord> {
        Err(Self::error())
    }

    async fn ping(&self) -> Result<()> {
        Err(Self::error())
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).into_owned()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
