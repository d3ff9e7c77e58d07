pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::skills::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::health_handler))
        .route("/extract-skills", post(handlers::handle_extract_skills))
        .route("/match-skills", post(handlers::handle_match_skills))
        .route("/bulk-match-skills", post(handlers::handle_bulk_match_skills))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
