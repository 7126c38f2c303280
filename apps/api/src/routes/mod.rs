pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::import::handlers as import_handlers;
use crate::scoring::handlers as scoring_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sheet import
        .route(
            "/api/v1/import/sheets",
            post(import_handlers::handle_import),
        )
        .route(
            "/api/v1/import/sheets/preview",
            post(import_handlers::handle_preview),
        )
        // Resume tools
        .route(
            "/api/v1/resumes/score",
            post(scoring_handlers::handle_score),
        )
        .route(
            "/api/v1/resumes/parse",
            post(scoring_handlers::handle_parse_resume),
        )
        .route(
            "/api/v1/resumes/enhance",
            post(scoring_handlers::handle_enhance),
        )
        .with_state(state)
}
