pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::relay::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(form::upload_form_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/analyze-resume",
            post(handlers::handle_analyze_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
