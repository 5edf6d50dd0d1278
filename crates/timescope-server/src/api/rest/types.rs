//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use crate::error::ServerError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use timescope_core::{Instrument, Role, ScaleOption, Subscale};
use timescope_engine::{Assessment, AssessmentEngine, Submission};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AssessmentEngine>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub instrument_version: String,
}

/// Questionnaire submission
#[derive(Debug, Deserialize)]
pub struct AssessRequestPayload {
    /// Twenty answers between 1 and 5, in questionnaire order
    pub answers: Vec<i64>,

    #[serde(default)]
    pub nickname: Option<String>,

    /// One of the closed role list; blank means not given
    #[serde(default)]
    pub role: Option<String>,

    /// Whether the scores may be stored for ranking
    #[serde(default)]
    pub consent: bool,
}

impl AssessRequestPayload {
    pub fn into_submission(self) -> Result<Submission, ServerError> {
        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(role) => Some(
                role.parse::<Role>()
                    .map_err(|e| ServerError::InvalidRequest(e.to_string()))?,
            ),
        };

        let mut submission = Submission::new(self.answers).with_consent(self.consent);
        if let Some(nickname) = self.nickname {
            submission = submission.with_nickname(nickname);
        }
        if let Some(role) = role {
            submission = submission.with_role(role);
        }
        Ok(submission)
    }
}

/// A scored assessment with its share link and text report
#[derive(Debug, Serialize)]
pub struct AssessResponsePayload {
    pub assessment: Assessment,

    /// Query string for `GET /v1/result`
    pub share_query: String,

    pub report: String,
}

impl From<Assessment> for AssessResponsePayload {
    fn from(assessment: Assessment) -> Self {
        Self {
            share_query: assessment.share_query(),
            report: assessment.render_text(),
            assessment,
        }
    }
}

/// One numbered statement
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPayload {
    pub number: usize,
    pub subscale: Subscale,
    pub text: String,
}

/// Everything a client needs to present the questionnaire
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireResponse {
    pub version: String,
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    pub options: Vec<ScaleOption>,
    pub items: Vec<QuestionPayload>,
    pub roles: Vec<Role>,
}

impl QuestionnaireResponse {
    pub fn from_instrument(instrument: &Instrument) -> Self {
        Self {
            version: instrument.version.clone(),
            title: instrument.title.clone(),
            caption: instrument.caption.clone(),
            disclaimer: instrument.disclaimer.clone(),
            reference: instrument.reference.clone(),
            options: instrument.options.clone(),
            items: instrument
                .numbered_items()
                .into_iter()
                .map(|item| QuestionPayload {
                    number: item.number,
                    subscale: item.subscale,
                    text: item.text.to_string(),
                })
                .collect(),
            roles: Role::ALL.to_vec(),
        }
    }
}

/// Questionnaire returned in place of a result that could not be rebuilt
#[derive(Debug, Serialize)]
pub struct FallbackPayload {
    pub notice: String,
    pub questionnaire: QuestionnaireResponse,
}

/// Response of `GET /v1/result`
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultResponse {
    /// The shared result, rebuilt from the token
    Result(AssessResponsePayload),
    /// The token was invalid
    Questionnaire(FallbackPayload),
}
