use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::error::{AppError, Result};
use crate::models::Day;
use crate::version::GIT_VERSION;

#[derive(Template)]
#[template(path = "index.html")]
struct HomeTemplate {
    days: &'static [Day],
    git_version: &'static str,
}

pub async fn index() -> Result<Response> {
    let template = HomeTemplate {
        days: &Day::ALL,
        git_version: GIT_VERSION,
    };
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
