//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use timescope_engine::AssessmentEngine;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(engine: Arc<AssessmentEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/health", get(health))
        .route("/v1/questionnaire", get(questionnaire))
        .route("/v1/assess", post(assess))
        .route("/v1/result", get(result))
        .fallback(not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
