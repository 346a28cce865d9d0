//! Structured error types for the diagnostic engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
  #[error("incomplete answers: missing {}", .missing.join(", "))]
  IncompleteAnswers { missing: Vec<String> },

  #[error("out of range answer: {category} = {value} (expected an integer from 0 to 3)")]
  OutOfRangeAnswer { category: String, value: String },

  #[error("unknown category: '{key}'")]
  UnknownCategory { key: String },

  #[error("duplicate answer: {category} was answered more than once")]
  DuplicateAnswer { category: String },

  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },
}

impl ScoringError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Stable machine-readable code.
  pub fn code(&self) -> &'static str {
    match self {
      Self::IncompleteAnswers { .. } => "incomplete_answers",
      Self::OutOfRangeAnswer { .. } => "out_of_range_answer",
      Self::UnknownCategory { .. } => "unknown_category",
      Self::DuplicateAnswer { .. } => "duplicate_answer",
      Self::Validation { .. } => "validation",
    }
  }

  /// Path of the offending input field.
  pub fn field(&self) -> String {
    match self {
      Self::IncompleteAnswers { .. } => "answers".to_string(),
      Self::OutOfRangeAnswer { category, .. } | Self::DuplicateAnswer { category } => {
        format!("answers.{}", category)
      }
      Self::UnknownCategory { key } => format!("answers.{}", key),
      Self::Validation { field, .. } => field.clone(),
    }
  }
}
