//! Answer validation, weighted score, and maturity tier.

use serde_json::Value;
use tracing::debug;

use crate::error::ScoringError;
use crate::recommend;
use crate::types::*;

/// A validated answer set: exactly one value in 0..=3 for every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerSheet {
  values: [u8; 10],
}

impl AnswerSheet {
  /// Validate raw answers. Entries are checked in key order (repeats of a
  /// key in arrival order), then coverage.
  pub fn from_answers(answers: &Answers) -> Result<Self, ScoringError> {
    let mut values: [Option<u8>; 10] = [None; 10];

    let mut entries: Vec<(&str, &Value)> = answers.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (key, value) in entries {
      let category = Category::parse(key).ok_or_else(|| ScoringError::UnknownCategory {
        key: key.to_string(),
      })?;
      let slot = &mut values[category as usize];
      if slot.is_some() {
        return Err(ScoringError::DuplicateAnswer {
          category: category.key().to_string(),
        });
      }
      let answer = value
        .as_i64()
        .filter(|v| (0..=MAX_ANSWER as i64).contains(v))
        .ok_or_else(|| ScoringError::OutOfRangeAnswer {
          category: category.key().to_string(),
          value: value.to_string(),
        })?;
      *slot = Some(answer as u8);
    }

    let missing: Vec<String> = Category::ALL
      .iter()
      .filter(|c| values[**c as usize].is_none())
      .map(|c| c.key().to_string())
      .collect();
    if !missing.is_empty() {
      return Err(ScoringError::IncompleteAnswers { missing });
    }

    Ok(Self {
      values: values.map(|v| v.unwrap_or_default()),
    })
  }

  pub fn get(&self, category: Category) -> u8 {
    self.values[category as usize]
  }

  pub fn total(&self) -> u8 {
    self.values.iter().sum()
  }

  pub fn max(&self) -> u8 {
    MAX_ANSWER * self.values.len() as u8
  }
}

/// round-half-up(100 * total / max), in integers.
pub fn percentage(total: u8, max: u8) -> u8 {
  if max == 0 {
    return 0;
  }
  let (total, max) = (total as u32, max as u32);
  ((200 * total + max) / (2 * max)).min(100) as u8
}

/// Score a complete answer set. Pure and deterministic.
pub fn compute_diagnostic_score(answers: &Answers) -> Result<DiagnosticScore, ScoringError> {
  let sheet = AnswerSheet::from_answers(answers)?;
  Ok(score_sheet(&sheet))
}

pub fn score_sheet(sheet: &AnswerSheet) -> DiagnosticScore {
  let total = sheet.total();
  let max = sheet.max();
  let percentage = percentage(total, max);
  let tier = MaturityTier::from_percentage(percentage);

  let categories: Vec<CategoryScore> = Category::ALL
    .iter()
    .map(|&category| {
      let answer = sheet.get(category);
      CategoryScore {
        category,
        label: category.label().to_string(),
        answer,
        level: answer_level(answer).to_string(),
      }
    })
    .collect();

  let weakest: Vec<Category> = Category::ALL
    .iter()
    .copied()
    .filter(|&c| sheet.get(c) <= 1)
    .collect();

  let recommendations = recommend::compute_recommendations(tier, &weakest);

  debug!(total, percentage, tier = tier.as_str(), "diagnostic scored");

  DiagnosticScore {
    total,
    max,
    percentage,
    tier,
    tier_label: tier.label().to_string(),
    categories,
    weakest,
    recommendations,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn uniform(value: i64) -> Answers {
    Category::ALL
      .iter()
      .map(|c| (c.key().to_string(), value))
      .collect()
  }

  #[test]
  fn all_threes_is_advanced() {
    let score = compute_diagnostic_score(&uniform(3)).unwrap();
    assert_eq!(score.total, 30);
    assert_eq!(score.max, 30);
    assert_eq!(score.percentage, 100);
    assert_eq!(score.tier, MaturityTier::Advanced);
    assert!(score.weakest.is_empty());
    assert_eq!(score.recommendations.len(), 1);
  }

  #[test]
  fn all_zeros_is_beginner() {
    let score = compute_diagnostic_score(&uniform(0)).unwrap();
    assert_eq!(score.percentage, 0);
    assert_eq!(score.tier, MaturityTier::Beginner);
    assert_eq!(score.weakest.len(), 10);
    assert_eq!(score.recommendations.len(), 11);
  }

  #[test]
  fn percentage_rounds_half_up() {
    assert_eq!(percentage(14, 30), 47);
    assert_eq!(percentage(15, 30), 50);
    assert_eq!(percentage(22, 30), 73);
    assert_eq!(percentage(23, 30), 77);
    assert_eq!(percentage(7, 30), 23);
    assert_eq!(percentage(8, 30), 27);
    // 1/8 = 12.5% -> 13
    assert_eq!(percentage(1, 8), 13);
  }

  #[test]
  fn missing_categories_are_all_listed() {
    let mut answers = uniform(2);
    answers.remove("crm");
    answers.remove("propostas");
    let err = compute_diagnostic_score(&answers).unwrap_err();
    assert_eq!(
      err,
      ScoringError::IncompleteAnswers {
        missing: vec!["crm".into(), "propostas".into()],
      }
    );
    assert_eq!(err.field(), "answers");
  }

  #[test]
  fn out_of_range_values_are_rejected() {
    for bad in [-1, 4, 99] {
      let mut answers = uniform(1);
      answers.insert("pipeline", bad);
      let err = compute_diagnostic_score(&answers).unwrap_err();
      assert_eq!(
        err,
        ScoringError::OutOfRangeAnswer {
          category: "pipeline".into(),
          value: bad.to_string(),
        }
      );
    }
  }

  #[test]
  fn non_integer_values_are_out_of_range() {
    for (bad, shown) in [
      (Value::from(2.5), "2.5"),
      (Value::from("2"), "\"2\""),
      (Value::Null, "null"),
      (Value::Bool(true), "true"),
    ] {
      let mut answers = uniform(1);
      answers.insert("cotacao", bad);
      let err = compute_diagnostic_score(&answers).unwrap_err();
      assert_eq!(
        err,
        ScoringError::OutOfRangeAnswer {
          category: "cotacao".into(),
          value: shown.into(),
        }
      );
      assert_eq!(err.field(), "answers.cotacao");
    }
  }

  #[test]
  fn repeated_key_is_a_duplicate_not_last_wins() {
    let request: DiagnosticRequest = serde_json::from_str(
      r#"{"answers": {"crm": 0, "crm": 3, "pipeline": 3, "cotacao": 3, "followup": 3,
        "historico": 3, "indicadores": 3, "segmentacao": 3, "qualificacao": 3,
        "propostas": 3, "integracao": 3}}"#,
    )
    .unwrap();
    let err = compute_diagnostic_score(&request.answers).unwrap_err();
    assert_eq!(
      err,
      ScoringError::DuplicateAnswer {
        category: "crm".into(),
      }
    );
    assert_eq!(err.code(), "duplicate_answer");
  }

  #[test]
  fn unknown_keys_are_rejected() {
    let mut answers = uniform(1);
    answers.insert("marketing", 2);
    let err = compute_diagnostic_score(&answers).unwrap_err();
    assert_eq!(err.code(), "unknown_category");
    assert_eq!(err.field(), "answers.marketing");
  }

  #[test]
  fn two_spellings_of_one_category_are_a_duplicate() {
    let mut answers = uniform(1);
    answers.insert("histórico", 2);
    let err = compute_diagnostic_score(&answers).unwrap_err();
    assert_eq!(
      err,
      ScoringError::DuplicateAnswer {
        category: "historico".into(),
      }
    );
  }

  #[test]
  fn scoring_is_idempotent() {
    let answers = uniform(2);
    assert_eq!(
      compute_diagnostic_score(&answers).unwrap(),
      compute_diagnostic_score(&answers).unwrap()
    );
  }
}
