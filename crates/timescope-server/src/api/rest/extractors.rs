//! Custom extractors

use crate::error::ServerError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body extractor that rejects with a [`ServerError`]
///
/// Malformed bodies get the same `{"error", "status"}` shape as every other
/// failure, with status 400.
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| ServerError::InvalidRequest(describe(&rejection)))
    }
}

fn describe(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
        JsonRejection::JsonDataError(err) => {
            format!("unexpected submission shape: {}", err.body_text())
        }
        JsonRejection::MissingJsonContentType(_) => {
            "expected 'Content-Type: application/json'".to_string()
        }
        other => other.body_text(),
    }
}
