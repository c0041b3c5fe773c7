use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::RuntimeMode;
use crate::handlers::{api, days, health, home, AppState};
use crate::middleware::error_detail;

pub fn create_router(state: AppState, mode: RuntimeMode) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health_check))
        .route("/save-day", post(days::save))
        // JSON API
        .route("/api", get(api::index))
        .route("/api/workout", post(api::save))
        .route("/api/workout/{day}", get(api::show))
        // Day views; static paths above take precedence
        .route("/{day}", get(days::show))
        .fallback(home::not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(mode, error_detail))
        .layer(TraceLayer::new_for_http())
}
