//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use timescope_engine::EngineError;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Malformed answer set
    InvalidInput(String),

    /// Malformed result token
    InvalidToken(String),

    /// Invalid request
    InvalidRequest(String),

    /// Assessment engine error
    EngineError(String),

    /// Not found
    NotFound(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidInput(msg) => write!(f, "{}", msg),
            ServerError::InvalidToken(msg) => write!(f, "{}", msg),
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::EngineError(msg) => write!(f, "Engine error: {}", msg),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::InvalidToken(_) | ServerError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::EngineError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(err: EngineError) -> Self {
        if err.is_invalid_input() {
            ServerError::InvalidInput(err.to_string())
        } else if err.is_invalid_token() {
            ServerError::InvalidToken(err.to_string())
        } else {
            ServerError::EngineError(err.to_string())
        }
    }
}
