//! Error types for interview scoring

use thiserror::Error;

/// Errors that can occur while scoring an interview
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Failed to parse interview input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// `E_total` was zero, so coverage has no denominator
    #[error("Question {question} has no expected solution elements (E_total = 0)")]
    MissingCoverage { question: usize },

    #[error("Category weights sum to zero")]
    ZeroWeightSum,

    #[error("Invalid weight for {category}: {value}")]
    InvalidWeight { category: &'static str, value: f64 },

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
