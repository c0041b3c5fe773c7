use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use super::AppState;
use crate::version::GIT_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    storage: &'static str,
    backend: &'static str,
    git_version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            storage: status,
            backend: state.store.backend(),
            git_version: GIT_VERSION,
        }),
    )
}
