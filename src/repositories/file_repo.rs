use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{validate_exercise, WorkoutStore};
use crate::error::{AppError, Result};
use crate::models::{Day, WorkoutRecord};

/// One day's entry in the week file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DayEntry {
    #[serde(default)]
    rest: bool,
    #[serde(default)]
    exercises: Vec<String>,
}

impl DayEntry {
    fn into_record(self, day: Day) -> WorkoutRecord {
        WorkoutRecord {
            day,
            is_rest_day: self.rest,
            exercises: self.exercises,
        }
    }
}

// Keys must be lowercase day names; any other key fails the whole file.
type Week = BTreeMap<Day, DayEntry>;

/// Flat-file store: a single JSON object keyed by day name.
///
/// The whole file is rewritten on every write through a temporary file and a
/// rename, so a crash leaves either the old or the new week on disk. Writers in
/// this process are serialized by `write_lock`; separate processes sharing the
/// file are not coordinated.
#[derive(Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn update<F>(&self, day: Day, mutate: F) -> Result<WorkoutRecord>
    where
        F: FnOnce(&mut DayEntry) + Send + 'static,
    {
        let path = self.path.clone();
        let lock = self.write_lock.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let mut week = read_week(&path)?;
            let entry = week.entry(day).or_default();
            mutate(entry);
            let record = entry.clone().into_record(day);
            write_week(&path, &week)?;
            Ok(record)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn read_week(path: &Path) -> Result<Week> {
    match fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(Week::new()),
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Week::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_week(path: &Path, week: &Week) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "week.json".to_string());
    let tmp_path = dir.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    let result = (|| -> Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&serde_json::to_vec_pretty(week)?)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[async_trait]
impl WorkoutStore for JsonFileRepository {
    async fn get_by_day(&self, day: Day) -> Result<WorkoutRecord> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mut week = read_week(&path)?;
            let entry = week.remove(&day);
            tracing::debug!("Loaded {} (stored: {})", day, entry.is_some());
            Ok(entry
                .map(|e| e.into_record(day))
                .unwrap_or_else(|| WorkoutRecord::empty(day)))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    async fn set_rest_day(&self, day: Day) -> Result<WorkoutRecord> {
        let record = self
            .update(day, |entry| {
                entry.rest = true;
                entry.exercises.clear();
            })
            .await?;
        tracing::info!("Marked {} as rest day", day);
        Ok(record)
    }

    async fn append_exercise(&self, day: Day, exercise: &str) -> Result<WorkoutRecord> {
        let exercise = validate_exercise(exercise)?.to_string();
        let logged = exercise.clone();
        let record = self
            .update(day, move |entry| {
                if entry.rest {
                    entry.exercises.clear();
                }
                entry.rest = false;
                entry.exercises.push(exercise);
            })
            .await?;
        tracing::info!("Added exercise to {}: {}", day, logged);
        Ok(record)
    }

    async fn ping(&self) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_week(&path).map(|_| ()))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    fn backend(&self) -> &'static str {
        "json-file"
    }
}
