use async_trait::async_trait;
use rusqlite::OptionalExtension;

use super::{validate_exercise, WorkoutStore};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Day, WorkoutRecord};

/// SQLite-backed store. Every write is a single upsert statement, so concurrent
/// writers to the same day never lose an append.
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutStore for WorkoutRepository {
    async fn get_by_day(&self, day: Day) -> Result<WorkoutRecord> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let record = conn
                .query_row(
                    "SELECT day, is_rest_day, exercises FROM workouts WHERE day = ?",
                    [day.as_str()],
                    WorkoutRecord::from_row,
                )
                .optional()?;
            tracing::debug!("Loaded {} (stored: {})", day, record.is_some());
            Ok(record.unwrap_or_else(|| WorkoutRecord::empty(day)))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    async fn set_rest_day(&self, day: Day) -> Result<WorkoutRecord> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let record = conn.query_row(
                "INSERT INTO workouts (day, is_rest_day, exercises) VALUES (?1, 1, '[]')
                 ON CONFLICT(day) DO UPDATE SET is_rest_day = 1, exercises = '[]'
                 RETURNING day, is_rest_day, exercises",
                [day.as_str()],
                WorkoutRecord::from_row,
            )?;
            tracing::info!("Marked {} as rest day", day);
            Ok(record)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    async fn append_exercise(&self, day: Day, exercise: &str) -> Result<WorkoutRecord> {
        let exercise = validate_exercise(exercise)?.to_string();
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            // Leaving a rest day starts a fresh list.
            let record = conn.query_row(
                "INSERT INTO workouts (day, is_rest_day, exercises) VALUES (?1, 0, json_array(?2))
                 ON CONFLICT(day) DO UPDATE SET
                     exercises = CASE
                         WHEN workouts.is_rest_day THEN json_array(?2)
                         ELSE json_insert(workouts.exercises, '$[#]', ?2)
                     END,
                     is_rest_day = 0
                 RETURNING day, is_rest_day, exercises",
                rusqlite::params![day.as_str(), exercise],
                WorkoutRecord::from_row,
            )?;
            tracing::info!("Added exercise to {}: {}", day, exercise);
            Ok(record)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    async fn ping(&self) -> Result<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
