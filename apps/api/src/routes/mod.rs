pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::intake::handlers;
use crate::stages;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/candidates/:id",
            get(handlers::handle_get_candidate),
        )
        .route(
            "/api/v1/candidates/:id/events",
            get(handlers::handle_candidate_events),
        )
        .route(
            "/api/v1/candidates/:id/resume",
            post(handlers::handle_resume_upload),
        )
        .route(
            "/api/v1/candidates/:id/stage",
            post(stages::handle_stage_change),
        )
        .with_state(state)
}
