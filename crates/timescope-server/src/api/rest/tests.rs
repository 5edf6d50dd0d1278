//! Tests for REST API payload conversions

#![cfg(test)]

use super::types::*;
use crate::error::ServerError;
use timescope_core::{Instrument, Role, Subscale};
use timescope_engine::{PersistenceStatus, ScoreProfile};

fn payload(role: Option<&str>) -> AssessRequestPayload {
    AssessRequestPayload {
        answers: vec![3; 20],
        nickname: Some("kai".to_string()),
        role: role.map(str::to_string),
        consent: true,
    }
}

#[test]
fn test_into_submission_parses_role() {
    let submission = payload(Some("Engineer")).into_submission().unwrap();

    assert_eq!(submission.role, Some(Role::Engineer));
    assert_eq!(submission.nickname.as_deref(), Some("kai"));
    assert!(submission.consent);
    assert_eq!(submission.answers.len(), 20);
}

#[test]
fn test_into_submission_blank_role_is_absent() {
    let submission = payload(Some("  ")).into_submission().unwrap();
    assert!(submission.role.is_none());

    let submission = payload(None).into_submission().unwrap();
    assert!(submission.role.is_none());
}

#[test]
fn test_into_submission_rejects_unknown_role() {
    let err = payload(Some("astronaut")).into_submission().unwrap_err();

    assert!(matches!(err, ServerError::InvalidRequest(_)));
    assert!(err.to_string().contains("astronaut"));
}

#[test]
fn test_payload_deserialize_defaults() {
    let payload: AssessRequestPayload =
        serde_json::from_value(serde_json::json!({ "answers": [1, 2, 3] })).unwrap();

    assert_eq!(payload.answers, vec![1, 2, 3]);
    assert!(payload.nickname.is_none());
    assert!(payload.role.is_none());
    assert!(!payload.consent);
}

#[test]
fn test_questionnaire_from_builtin_instrument() {
    let instrument = Instrument::builtin().unwrap();
    let questionnaire = QuestionnaireResponse::from_instrument(&instrument);

    assert_eq!(questionnaire.items.len(), 20);
    assert_eq!(questionnaire.options.len(), 5);
    assert_eq!(questionnaire.roles.len(), 7);
    assert_eq!(questionnaire.items[5].number, 6);
    assert_eq!(questionnaire.items[5].subscale, Subscale::Quantity);
    assert!(questionnaire.disclaimer.is_some());
}

#[test]
fn test_questionnaire_serializes_roles_as_keys() {
    let instrument = Instrument::builtin().unwrap();
    let json = serde_json::to_value(QuestionnaireResponse::from_instrument(&instrument)).unwrap();

    assert_eq!(json["roles"][0], "student");
    assert_eq!(json["roles"][6], "other");
    assert_eq!(json["options"][4]["value"], 5);
}

#[tokio::test]
async fn test_result_response_is_tagged() {
    let engine = timescope_engine::AssessmentEngineBuilder::new()
        .build()
        .await
        .unwrap();
    let assessment = engine.evaluate(ScoreProfile::new(14, 9, 18, 11));
    assert_eq!(assessment.persistence, PersistenceStatus::Skipped);

    let json = serde_json::to_value(ResultResponse::Result(assessment.into())).unwrap();

    assert_eq!(json["kind"], "result");
    assert_eq!(
        json["share_query"],
        "intensity=14&quantity=9&accuracy=18&positivity=11"
    );
    assert!(json["report"].as_str().unwrap().contains("Future Perspective"));
}
