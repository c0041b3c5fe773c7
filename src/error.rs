use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::version::GIT_VERSION;

pub const STORE_UNAVAILABLE_MESSAGE: &str = "Server error - please try again";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Storage file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Storage could not be reached or read. Safe for the client to retry.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_) | AppError::Json(_)
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn report(&self, format: ErrorFormat) -> ErrorReport {
        let status = self.status();
        let message = if self.is_store_unavailable() {
            STORE_UNAVAILABLE_MESSAGE.to_string()
        } else {
            match self {
                AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Validation(msg) => {
                    msg.clone()
                }
                _ => "Something broke!".to_string(),
            }
        };

        let detail = if status.is_server_error() {
            tracing::error!("{}", self);
            Some(self.to_string())
        } else {
            None
        };

        ErrorReport {
            status,
            message,
            detail,
            format,
            show_detail: false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report(ErrorFormat::Html).into_response()
    }
}

/// `AppError` rendered as `{"error": ...}` for the JSON API.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.report(ErrorFormat::Json).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFormat {
    Html,
    Json,
}

/// Everything needed to render an error response. A copy rides along in the
/// response extensions so `middleware::error_detail` can re-render it with the
/// internal detail visible.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
    pub format: ErrorFormat,
    pub show_detail: bool,
}

impl ErrorReport {
    pub fn with_detail_shown(mut self) -> Self {
        self.show_detail = true;
        self
    }

    fn visible_detail(&self) -> Option<&str> {
        if self.show_detail {
            self.detail.as_deref()
        } else {
            None
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    status: u16,
    message: &'a str,
    detail: Option<&'a str>,
    git_version: &'static str,
}

impl IntoResponse for ErrorReport {
    fn into_response(self) -> Response {
        let mut response = match self.format {
            ErrorFormat::Json => {
                let body = match self.visible_detail() {
                    Some(detail) => json!({ "error": self.message, "detail": detail }),
                    None => json!({ "error": self.message }),
                };
                (self.status, Json(body)).into_response()
            }
            ErrorFormat::Html => {
                let template = ErrorTemplate {
                    status: self.status.as_u16(),
                    message: &self.message,
                    detail: self.visible_detail(),
                    git_version: GIT_VERSION,
                };
                match template.render() {
                    Ok(html) => (self.status, Html(html)).into_response(),
                    Err(e) => {
                        tracing::error!("Template error: {:?}", e);
                        (self.status, self.message.clone()).into_response()
                    }
                }
            }
        };

        response.extensions_mut().insert(self);
        response
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
