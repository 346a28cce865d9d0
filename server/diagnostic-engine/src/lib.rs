//! MCG Commercial Diagnostic Engine: rule-based scoring for the
//! commercial-maturity quiz, plus lead capture around it.
//!
//! No DB, no network; the caller stores lead records.

pub mod error;
pub mod lead;
pub mod recommend;
pub mod score;
pub mod types;

pub use error::ScoringError;
pub use lead::{capture_lead, LeadRecord, LeadSubmission};
pub use score::{compute_diagnostic_score, AnswerSheet};
pub use types::{Answers, Category, DiagnosticRequest, DiagnosticScore, ErrorOutput, MaturityTier};
