pub mod file_repo;
pub mod workout_repo;

use std::sync::Arc;

use async_trait::async_trait;

pub use file_repo::JsonFileRepository;
pub use workout_repo::WorkoutRepository;

use crate::config::{Config, StorageUrl};
use crate::db;
use crate::error::{AppError, Result};
use crate::migrations::run_migrations;
use crate::models::{Day, SaveCommand, WorkoutRecord};

/// Per-day workout persistence.
///
/// Writes are upserts: the first write for a day creates its record. Nothing is
/// ever deleted. Appending to a rest day clears the rest flag and starts a fresh
/// exercise list.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Stored record for `day`, or the empty default when nothing has been written.
    /// Never persists the default.
    async fn get_by_day(&self, day: Day) -> Result<WorkoutRecord>;

    /// Mark `day` as rest and drop its exercises. Idempotent.
    async fn set_rest_day(&self, day: Day) -> Result<WorkoutRecord>;

    /// Append `exercise` to the end of the day's list. Duplicates are kept.
    async fn append_exercise(&self, day: Day, exercise: &str) -> Result<WorkoutRecord>;

    /// Check that storage is reachable without changing anything.
    async fn ping(&self) -> Result<()>;

    fn backend(&self) -> &'static str;

    async fn apply(&self, command: SaveCommand) -> Result<WorkoutRecord> {
        match command {
            SaveCommand::Rest(day) => self.set_rest_day(day).await,
            SaveCommand::Append(day, exercise) => self.append_exercise(day, &exercise).await,
        }
    }
}

/// Shared handle to the configured store, created once at startup.
pub type StoreHandle = Arc<dyn WorkoutStore>;

/// Open the backend named by the storage URL. SQLite databases are migrated first.
pub fn open_store(config: &Config) -> anyhow::Result<StoreHandle> {
    match &config.storage_url {
        StorageUrl::Sqlite(path) => {
            tracing::info!("Connecting to database: {}", path);
            let pool = db::create_pool(path, config.storage_timeout)?;
            run_migrations(&pool)?;
            Ok(Arc::new(WorkoutRepository::new(pool)))
        }
        StorageUrl::JsonFile(path) => {
            tracing::info!("Using JSON file storage: {}", path.display());
            Ok(Arc::new(JsonFileRepository::new(path)))
        }
    }
}

pub(crate) fn validate_exercise(exercise: &str) -> Result<&str> {
    let exercise = exercise.trim();
    if exercise.is_empty() {
        return Err(AppError::Validation("Exercise is required".to_string()));
    }
    Ok(exercise)
}
