//! Request extractors shared by the HTML and JSON routes.
//!
//! Both reject with `AppError`, which renders as an HTML page. JSON handlers take
//! `Result<E, AppError>` and convert with `?` into `ApiError`.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::Day;

/// The `{day}` path segment. Anything that is not one of the seven day names,
/// including segments that fail to decode, is a 404.
#[derive(Debug, Clone, Copy)]
pub struct DayPath(pub Day);

fn day_not_found() -> AppError {
    AppError::NotFound("Day not found".to_string())
}

impl<S> FromRequestParts<S> for DayPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected day path: {}", rejection.body_text());
                day_not_found()
            })?;

        Day::from_path_segment(&segment)
            .map(DayPath)
            .ok_or_else(day_not_found)
    }
}

/// Body extractor that takes `application/json` and falls back to urlencoded forms.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            Ok(Self(value))
        }
    }
}
