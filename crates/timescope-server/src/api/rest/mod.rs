//! REST API implementation
//!
//! - types: request/response type definitions
//! - extractors: custom request extractors
//! - handlers: API endpoint handlers
//! - router: router creation and configuration
//! - tests: unit tests for the payload conversions

mod extractors;
mod handlers;
mod router;
mod tests;
pub mod types;

// Re-export public API
pub use extractors::JsonExtractor;
pub use router::create_router;
pub use types::{
    AppState, AssessRequestPayload, AssessResponsePayload, FallbackPayload, HealthResponse,
    QuestionPayload, QuestionnaireResponse, ResultResponse,
};
