use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RuntimeMode;
use crate::error::ErrorReport;

/// Re-render server errors with their internal detail when running in development.
/// In production the generic message produced by `AppError` is left untouched.
pub async fn error_detail(
    State(mode): State<RuntimeMode>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !mode.exposes_error_detail() {
        return response;
    }

    let report = response
        .extensions()
        .get::<ErrorReport>()
        .filter(|report| report.detail.is_some() && !report.show_detail)
        .cloned();

    match report {
        Some(report) => report.with_detail_shown().into_response(),
        None => response,
    }
}
