//! Integration tests for the diagnostic engine.

use chrono::{TimeZone, Utc};
use diagnostic_engine::{
  capture_lead, compute_diagnostic_score, DiagnosticRequest, ErrorOutput, LeadSubmission,
  MaturityTier, ScoringError,
};
use serde_json::Value;

fn fixture_request() -> DiagnosticRequest {
  let json = r#"{
    "answers": {
      "crm": 2, "pipeline": 1, "cotacao": 2, "followup": 1, "histórico": 2,
      "indicadores": 1, "segmentacao": 1, "qualificacao": 2, "propostas": 1,
      "integração": 1
    }
  }"#;
  serde_json::from_str(json).unwrap()
}

#[test]
fn quiz_example_scores_basic() {
  let score = compute_diagnostic_score(&fixture_request().answers).unwrap();
  assert_eq!(score.total, 14);
  assert_eq!(score.max, 30);
  assert_eq!(score.percentage, 47);
  assert_eq!(score.tier, MaturityTier::Basic);
  assert_eq!(score.tier_label, "Básico");
  assert_eq!(score.categories.len(), 10);
  assert_eq!(score.weakest.len(), 6);
  // headline + one line per weak category
  assert_eq!(score.recommendations.len(), 7);
}

#[test]
fn score_json_shape() {
  let score = compute_diagnostic_score(&fixture_request().answers).unwrap();
  let json: Value = serde_json::to_value(&score).unwrap();
  assert_eq!(json["tier"], "basic");
  assert_eq!(json["percentage"], 47);
  assert_eq!(json["categories"][0]["category"], "crm");
  assert_eq!(json["categories"][0]["answer"], 2);
  assert_eq!(json["weakest"][0], "pipeline");
}

#[test]
fn incomplete_answers_render_structured_error() {
  let json = r#"{ "answers": { "crm": 3, "pipeline": 3 } }"#;
  let request: DiagnosticRequest = serde_json::from_str(json).unwrap();
  let err = compute_diagnostic_score(&request.answers).unwrap_err();
  match &err {
    ScoringError::IncompleteAnswers { missing } => assert_eq!(missing.len(), 8),
    other => panic!("unexpected error: {other:?}"),
  }

  let out = serde_json::to_value(ErrorOutput::from(&err)).unwrap();
  assert_eq!(out["error"], true);
  assert_eq!(out["code"], "incomplete_answers");
  assert_eq!(out["field"], "answers");
  assert!(out["message"].as_str().unwrap().contains("cotacao"));
}

#[test]
fn lead_submission_round() {
  let json = r#"{
    "name": "Carlos Lima",
    "email": "carlos@lima-log.com.br",
    "company": "Lima Logística",
    "phone": "(21) 3333-4444",
    "utm_source": "linkedin",
    "answers": {
      "crm": 3, "pipeline": 3, "cotacao": 3, "followup": 3, "historico": 3,
      "indicadores": 3, "segmentacao": 3, "qualificacao": 3, "propostas": 3,
      "integracao": 2
    }
  }"#;
  let submission: LeadSubmission = serde_json::from_str(json).unwrap();
  let captured_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
  let record = capture_lead(&submission, captured_at).unwrap();

  assert_eq!(record.phone.as_deref(), Some("2133334444"));
  assert_eq!(record.score.total, 29);
  assert_eq!(record.score.percentage, 97);
  assert_eq!(record.score.tier, MaturityTier::Advanced);
  assert_eq!(record.score.weakest.len(), 0);

  let again = capture_lead(&submission, captured_at).unwrap();
  assert_eq!(
    serde_json::to_string(&record).unwrap(),
    serde_json::to_string(&again).unwrap()
  );
}

#[test]
fn repeated_answer_key_is_rejected() {
  let json = r#"{
    "answers": {
      "crm": 0, "crm": 3, "pipeline": 3, "cotacao": 3, "followup": 3,
      "historico": 3, "indicadores": 3, "segmentacao": 3, "qualificacao": 3,
      "propostas": 3, "integracao": 3
    }
  }"#;
  let request: DiagnosticRequest = serde_json::from_str(json).unwrap();
  let err = compute_diagnostic_score(&request.answers).unwrap_err();
  assert_eq!(
    err,
    ScoringError::DuplicateAnswer {
      category: "crm".into()
    }
  );

  let out = serde_json::to_value(ErrorOutput::from(&err)).unwrap();
  assert_eq!(out["code"], "duplicate_answer");
  assert_eq!(out["field"], "answers.crm");
}

#[test]
fn fractional_and_string_answers_are_out_of_range() {
  for raw in ["2.5", "\"2\""] {
    let json = format!(
      r#"{{ "answers": {{
        "crm": {raw}, "pipeline": 1, "cotacao": 2, "followup": 1, "historico": 2,
        "indicadores": 1, "segmentacao": 1, "qualificacao": 2, "propostas": 1,
        "integracao": 1
      }} }}"#
    );
    let request: DiagnosticRequest = serde_json::from_str(&json).unwrap();
    let err = compute_diagnostic_score(&request.answers).unwrap_err();
    assert_eq!(err.code(), "out_of_range_answer", "{}", raw);
    assert_eq!(err.field(), "answers.crm");
  }
}
