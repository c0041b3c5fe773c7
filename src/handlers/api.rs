//! JSON flavour of the day routes, for clients that fetch and render themselves.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::extract::{DayPath, JsonOrForm};
use super::AppState;
use crate::error::{ApiError, AppError};
use crate::models::{SaveDay, WorkoutRecord};

type ApiResult<T> = std::result::Result<T, ApiError>;

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Workout Tracker API" }))
}

pub async fn show(
    State(state): State<AppState>,
    day: std::result::Result<DayPath, AppError>,
) -> ApiResult<Json<WorkoutRecord>> {
    let DayPath(day) = day?;
    let record = state.store.get_by_day(day).await?;
    Ok(Json(record))
}

pub async fn save(
    State(state): State<AppState>,
    body: std::result::Result<JsonOrForm<SaveDay>, AppError>,
) -> ApiResult<Json<Value>> {
    let JsonOrForm(form) = body?;
    let command = form.into_command()?;
    let record = state.store.apply(command).await?;
    Ok(Json(json!({ "success": true, "workout": record })))
}
