//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{RawQuery, State},
    http::Uri,
    Json,
};
use tracing::{info, warn};

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        instrument_version: state.engine.instrument().version.clone(),
    })
}

/// Questionnaire definition endpoint
pub(super) async fn questionnaire(State(state): State<AppState>) -> Json<QuestionnaireResponse> {
    Json(QuestionnaireResponse::from_instrument(
        state.engine.instrument(),
    ))
}

/// Assessment endpoint
#[axum::debug_handler]
pub(super) async fn assess(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<AssessRequestPayload>,
) -> Result<Json<AssessResponsePayload>, ServerError> {
    info!(
        "Received assessment with {} answers, consent={}",
        payload.answers.len(),
        payload.consent
    );

    let submission = payload.into_submission()?;
    let assessment = state.engine.assess(submission).await?;

    info!(
        "Assessment complete: {} recommendations, persistence {:?}",
        assessment.recommendations.len(),
        assessment.persistence
    );

    Ok(Json(assessment.into()))
}

/// Shared result endpoint
///
/// An invalid token is not an error for the visitor: the questionnaire is
/// returned instead, with a notice.
pub(super) async fn result(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ResultResponse>, ServerError> {
    let query = query.unwrap_or_default();

    match state.engine.from_query(&query).await {
        Ok(assessment) => Ok(Json(ResultResponse::Result(assessment.into()))),
        Err(e) if e.is_invalid_token() => {
            warn!("Falling back to questionnaire: {}", e);
            Ok(Json(ResultResponse::Questionnaire(FallbackPayload {
                notice: format!(
                    "The shared result could not be read ({}). Please take the questionnaire.",
                    e
                ),
                questionnaire: QuestionnaireResponse::from_instrument(
                    state.engine.instrument(),
                ),
            })))
        }
        Err(e) => Err(e.into()),
    }
}

/// Fallback for unknown routes
pub(super) async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_string())
}
