use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::extract::{DayPath, JsonOrForm};
use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{Day, SaveDay, WorkoutRecord};
use crate::version::GIT_VERSION;

#[derive(Template)]
#[template(path = "day.html")]
struct DayTemplate {
    day: Day,
    record: WorkoutRecord,
    git_version: &'static str,
}

pub async fn show(State(state): State<AppState>, DayPath(day): DayPath) -> Result<Response> {
    let record = state.store.get_by_day(day).await?;

    let template = DayTemplate {
        day,
        record,
        git_version: GIT_VERSION,
    };
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn save(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<SaveDay>,
) -> Result<Response> {
    let command = form.into_command()?;
    let day = command.day();

    state.store.apply(command).await?;

    Ok(Redirect::to(&format!("/{}", day)).into_response())
}
