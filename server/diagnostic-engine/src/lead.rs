//! Lead capture: validate the contact details sent with a quiz, score it,
//! and build the record the caller stores.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScoringError;
use crate::score::compute_diagnostic_score;
use crate::types::{Answers, DiagnosticScore};

/// A quiz submission with contact details. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadSubmission {
  pub name: String,
  pub email: String,
  pub company: String,
  #[serde(default)]
  pub phone: Option<String>,
  #[serde(default)]
  pub role: Option<String>,
  pub answers: Answers,
}

/// Normalized lead plus its diagnostic. Not persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
  pub lead_id: String,
  pub name: String,
  pub email: String,
  pub company: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role: Option<String>,
  pub captured_at: String,
  pub score: DiagnosticScore,
}

fn required(field: &str, value: &str) -> Result<String, ScoringError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(ScoringError::validation(field, "must not be empty"));
  }
  Ok(trimmed.to_string())
}

fn normalize_email(raw: &str) -> Result<String, ScoringError> {
  let email = raw.trim().to_lowercase();
  let invalid = || ScoringError::validation("email", "expected an address like name@company.com.br");

  if email.chars().any(char::is_whitespace) {
    return Err(invalid());
  }
  let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
  if local.is_empty() || domain.contains('@') {
    return Err(invalid());
  }
  if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') || domain.contains("..")
  {
    return Err(invalid());
  }
  Ok(email)
}

/// Keep digits only. Brazilian numbers have 10–11 digits, 12–13 with country code.
fn normalize_phone(raw: &str) -> Result<Option<String>, ScoringError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  let mut digits = String::with_capacity(trimmed.len());
  for c in trimmed.chars() {
    match c {
      '0'..='9' => digits.push(c),
      ' ' | '(' | ')' | '-' | '+' | '.' => {}
      _ => return Err(ScoringError::validation("phone", "must contain only digits and punctuation")),
    }
  }
  if !(10..=13).contains(&digits.len()) {
    return Err(ScoringError::validation("phone", "must have 10 to 13 digits"));
  }
  Ok(Some(digits))
}

/// Stable id: same email captured in the same minute yields the same id.
fn lead_id(email: &str, captured_at: &DateTime<Utc>) -> String {
  let mut hasher = blake3::Hasher::new();
  hasher.update(email.as_bytes());
  hasher.update(b"|");
  hasher.update(captured_at.format("%Y-%m-%dT%H:%M").to_string().as_bytes());
  let hex = hasher.finalize().to_hex();
  format!("lead-{}", &hex[..16])
}

/// Validate contact details, score the answers, and assemble the record.
///
/// Contact fields are checked before the answers, so a bad email is reported
/// even when the quiz is also incomplete.
pub fn capture_lead(
  submission: &LeadSubmission,
  captured_at: DateTime<Utc>,
) -> Result<LeadRecord, ScoringError> {
  let name = required("name", &submission.name)?;
  let email = normalize_email(&submission.email)?;
  let company = required("company", &submission.company)?;
  let phone = match &submission.phone {
    Some(raw) => normalize_phone(raw)?,
    None => None,
  };
  let role = submission
    .role
    .as_deref()
    .map(str::trim)
    .filter(|r| !r.is_empty())
    .map(str::to_string);

  let score = compute_diagnostic_score(&submission.answers)?;
  let lead_id = lead_id(&email, &captured_at);

  debug!(%lead_id, tier = score.tier.as_str(), "lead captured");

  Ok(LeadRecord {
    lead_id,
    name,
    email,
    company,
    phone,
    role,
    captured_at: captured_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    score,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{Category, MaturityTier};
  use chrono::TimeZone;

  fn at(minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, minute, second).unwrap()
  }

  fn submission() -> LeadSubmission {
    LeadSubmission {
      name: "  Ana Souza ".into(),
      email: "Ana.Souza@Transportes.com.br".into(),
      company: "Transportes Souza".into(),
      phone: Some("(11) 98765-4321".into()),
      role: Some(" Gerente comercial ".into()),
      answers: Category::ALL
        .iter()
        .map(|c| (c.key().to_string(), 2))
        .collect(),
    }
  }

  #[test]
  fn normalizes_contact_fields() {
    let record = capture_lead(&submission(), at(30, 0)).unwrap();
    assert_eq!(record.name, "Ana Souza");
    assert_eq!(record.email, "ana.souza@transportes.com.br");
    assert_eq!(record.phone.as_deref(), Some("11987654321"));
    assert_eq!(record.role.as_deref(), Some("Gerente comercial"));
    assert_eq!(record.captured_at, "2025-01-15T10:30:00Z");
    assert_eq!(record.score.percentage, 67);
    assert_eq!(record.score.tier, MaturityTier::Intermediate);
  }

  #[test]
  fn lead_id_is_stable_within_a_minute() {
    let a = capture_lead(&submission(), at(30, 5)).unwrap();
    let b = capture_lead(&submission(), at(30, 55)).unwrap();
    let c = capture_lead(&submission(), at(31, 0)).unwrap();
    assert!(a.lead_id.starts_with("lead-"));
    assert_eq!(a.lead_id.len(), "lead-".len() + 16);
    assert_eq!(a.lead_id, b.lead_id);
    assert_ne!(a.lead_id, c.lead_id);
  }

  #[test]
  fn rejects_bad_emails() {
    for bad in ["", "ana", "@x.com", "ana@", "ana@com", "ana@x..com", "a b@x.com", "a@b@c.com"] {
      let mut s = submission();
      s.email = bad.into();
      let err = capture_lead(&s, at(0, 0)).unwrap_err();
      assert_eq!(err.field(), "email", "{}", bad);
    }
  }

  #[test]
  fn rejects_blank_name_and_company() {
    let mut s = submission();
    s.name = "   ".into();
    assert_eq!(capture_lead(&s, at(0, 0)).unwrap_err().field(), "name");

    let mut s = submission();
    s.company = String::new();
    assert_eq!(capture_lead(&s, at(0, 0)).unwrap_err().field(), "company");
  }

  #[test]
  fn phone_rules() {
    let mut s = submission();
    s.phone = Some("+55 11 98765-4321".into());
    assert_eq!(
      capture_lead(&s, at(0, 0)).unwrap().phone.as_deref(),
      Some("5511987654321")
    );

    s.phone = Some("   ".into());
    assert_eq!(capture_lead(&s, at(0, 0)).unwrap().phone, None);

    s.phone = Some("1234".into());
    assert_eq!(capture_lead(&s, at(0, 0)).unwrap_err().field(), "phone");

    s.phone = Some("11 9876x4321".into());
    assert_eq!(capture_lead(&s, at(0, 0)).unwrap_err().field(), "phone");
  }

  #[test]
  fn contact_errors_win_over_answer_errors() {
    let mut s = submission();
    s.email = "nope".into();
    s.answers.clear();
    assert_eq!(capture_lead(&s, at(0, 0)).unwrap_err().code(), "validation");

    let mut s = submission();
    s.answers.remove("crm");
    assert_eq!(
      capture_lead(&s, at(0, 0)).unwrap_err().code(),
      "incomplete_answers"
    );
  }
}
