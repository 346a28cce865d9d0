//! Core types for the diagnostic engine (JSON contracts + quiz model).

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ScoringError;

/// Raw answers as sent by the quiz: category key → value, in arrival order.
///
/// Nothing is checked here. Repeated keys and non-integer values are kept as
/// received so that `AnswerSheet::from_answers` can report them as typed
/// errors instead of a JSON parse failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
  entries: Vec<(String, Value)>,
}

impl Answers {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append an entry, keeping any earlier entry under the same key.
  pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    self.entries.push((key.into(), value.into()));
  }

  /// Set `key` to `value`, replacing every earlier entry under that exact key.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    let key = key.into();
    self.entries.retain(|(k, _)| *k != key);
    self.entries.push((key, value.into()));
  }

  /// Drop every entry under `key`. Returns whether anything was removed.
  pub fn remove(&mut self, key: &str) -> bool {
    let before = self.entries.len();
    self.entries.retain(|(k, _)| k != key);
    self.entries.len() != before
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }
}

impl<K: Into<String>> FromIterator<(K, i64)> for Answers {
  fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
    Self {
      entries: iter
        .into_iter()
        .map(|(k, v)| (k.into(), Value::from(v)))
        .collect(),
    }
  }
}

impl Serialize for Answers {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (key, value) in &self.entries {
      map.serialize_entry(key, value)?;
    }
    map.end()
  }
}

struct AnswersVisitor;

impl<'de> Visitor<'de> for AnswersVisitor {
  type Value = Answers;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("an object of category keys to answers")
  }

  fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Answers, A::Error> {
    let mut answers = Answers::new();
    while let Some((key, value)) = access.next_entry::<String, Value>()? {
      answers.push(key, value);
    }
    Ok(answers)
  }
}

impl<'de> Deserialize<'de> for Answers {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_map(AnswersVisitor)
  }
}

/// Highest value a single answer can take.
pub const MAX_ANSWER: u8 = 3;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The ten areas the commercial-maturity quiz asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Crm,
  Pipeline,
  Cotacao,
  Followup,
  Historico,
  Indicadores,
  Segmentacao,
  Qualificacao,
  Propostas,
  Integracao,
}

impl Category {
  pub const ALL: [Category; 10] = [
    Category::Crm,
    Category::Pipeline,
    Category::Cotacao,
    Category::Followup,
    Category::Historico,
    Category::Indicadores,
    Category::Segmentacao,
    Category::Qualificacao,
    Category::Propostas,
    Category::Integracao,
  ];

  /// Canonical key used in JSON.
  pub fn key(self) -> &'static str {
    match self {
      Self::Crm => "crm",
      Self::Pipeline => "pipeline",
      Self::Cotacao => "cotacao",
      Self::Followup => "followup",
      Self::Historico => "historico",
      Self::Indicadores => "indicadores",
      Self::Segmentacao => "segmentacao",
      Self::Qualificacao => "qualificacao",
      Self::Propostas => "propostas",
      Self::Integracao => "integracao",
    }
  }

  /// Display label shown to the lead.
  pub fn label(self) -> &'static str {
    match self {
      Self::Crm => "CRM",
      Self::Pipeline => "Pipeline de vendas",
      Self::Cotacao => "Cotação de fretes",
      Self::Followup => "Follow-up",
      Self::Historico => "Histórico de clientes",
      Self::Indicadores => "Indicadores comerciais",
      Self::Segmentacao => "Segmentação de clientes",
      Self::Qualificacao => "Qualificação de leads",
      Self::Propostas => "Propostas comerciais",
      Self::Integracao => "Integração de sistemas",
    }
  }

  /// Lenient lookup: case, accents, and `_`/`-`/space separators are ignored,
  /// so `histórico`, `Integração` and `follow_up` all resolve.
  pub fn parse(raw: &str) -> Option<Category> {
    let folded = fold_key(raw);
    Self::ALL.iter().copied().find(|c| c.key() == folded)
  }
}

fn fold_key(raw: &str) -> String {
  raw
    .trim()
    .chars()
    .filter(|c| !matches!(c, '_' | '-' | ' '))
    .flat_map(char::to_lowercase)
    .map(|c| match c {
      'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
      'é' | 'è' | 'ê' | 'ë' => 'e',
      'í' | 'ì' | 'î' | 'ï' => 'i',
      'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
      'ú' | 'ù' | 'û' | 'ü' => 'u',
      'ç' => 'c',
      other => other,
    })
    .collect()
}

/// Human label for an answer value.
pub fn answer_level(value: u8) -> &'static str {
  match value {
    0 => "Inexistente",
    1 => "Inicial",
    2 => "Em desenvolvimento",
    _ => "Estruturado",
  }
}

// ---------------------------------------------------------------------------
// Maturity tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturityTier {
  Beginner,
  Basic,
  Intermediate,
  Advanced,
}

impl MaturityTier {
  /// Thresholds apply to the rounded percentage.
  pub fn from_percentage(percentage: u8) -> Self {
    match percentage {
      75.. => Self::Advanced,
      50..=74 => Self::Intermediate,
      25..=49 => Self::Basic,
      _ => Self::Beginner,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Basic => "basic",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Beginner => "Iniciante",
      Self::Basic => "Básico",
      Self::Intermediate => "Intermediário",
      Self::Advanced => "Avançado",
    }
  }
}

// ---------------------------------------------------------------------------
// Inbound types (JSON contract)
// ---------------------------------------------------------------------------

/// Score-only request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticRequest {
  pub answers: Answers,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
  pub category: Category,
  pub label: String,
  pub answer: u8,
  pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticScore {
  pub total: u8,
  pub max: u8,
  pub percentage: u8,
  pub tier: MaturityTier,
  pub tier_label: String,
  pub categories: Vec<CategoryScore>,
  /// Categories answered 0 or 1, in quiz order.
  pub weakest: Vec<Category>,
  pub recommendations: Vec<String>,
}

/// Structured error output for rejected input.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub code: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      error: true,
      code: code.into(),
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

impl From<&ScoringError> for ErrorOutput {
  fn from(err: &ScoringError) -> Self {
    ErrorOutput::new(err.code(), err.to_string()).with_field(err.field())
  }
}
