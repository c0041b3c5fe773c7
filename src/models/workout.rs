use rusqlite::types::Type;
use rusqlite::Row;
use serde::{Deserialize, Deserializer, Serialize};

use super::Day;
use crate::error::{AppError, Result};

/// The workout stored for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub day: Day,
    pub is_rest_day: bool,
    pub exercises: Vec<String>,
}

impl WorkoutRecord {
    /// What a day looks like before anything has been written for it.
    pub fn empty(day: Day) -> Self {
        Self {
            day,
            is_rest_day: false,
            exercises: Vec::new(),
        }
    }

    /// Map a `workouts` row (`day`, `is_rest_day`, `exercises` as a JSON array).
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let day_str: String = row.get("day")?;
        let day = Day::parse(&day_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                Type::Text,
                format!("unknown day {:?}", day_str).into(),
            )
        })?;
        let exercises_json: String = row.get("exercises")?;
        let exercises: Vec<String> = serde_json::from_str(&exercises_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

        Ok(Self {
            day,
            is_rest_day: row.get("is_rest_day")?,
            exercises,
        })
    }
}

/// Accept `rest` as either a form string or a JSON boolean.
/// Only the string `"true"` (or boolean `true`) marks a rest day.
fn deserialize_rest_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    let flag: Option<Flag> = Option::deserialize(deserializer)?;
    Ok(match flag {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => s == "true",
        None => false,
    })
}

/// Body of `POST /save-day` and `POST /api/workout`.
#[derive(Debug, Default, Deserialize)]
pub struct SaveDay {
    pub day: Option<String>,
    #[serde(default, deserialize_with = "deserialize_rest_flag")]
    pub rest: bool,
    pub exercise: Option<String>,
}

/// A validated write against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveCommand {
    Rest(Day),
    Append(Day, String),
}

impl SaveCommand {
    pub fn day(&self) -> Day {
        match self {
            SaveCommand::Rest(day) | SaveCommand::Append(day, _) => *day,
        }
    }
}

impl SaveDay {
    pub fn into_command(self) -> Result<SaveCommand> {
        let day = match self.day.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.parse::<Day>()?,
            _ => return Err(AppError::BadRequest("Day is required".to_string())),
        };

        if self.rest {
            return Ok(SaveCommand::Rest(day));
        }

        let exercise = self.exercise.as_deref().map(str::trim).unwrap_or_default();
        if exercise.is_empty() {
            return Err(AppError::Validation("Exercise is required".to_string()));
        }

        Ok(SaveCommand::Append(day, exercise.to_string()))
    }
}
