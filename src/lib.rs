//! Interview Score - scoring engine for technical-interview telemetry
//!
//! Turns per-question behavioral telemetry (timing splits, coverage, code
//! convergence, keystrokes, lint and sentiment signals, hints, difficulty)
//! into 0-10 competency scores and a difficulty-weighted overall score,
//! through a deterministic pipeline: per-question scoring → aggregation →
//! autonomy → overall combination.
//!
//! ## Modules
//!
//! - **Scoring stages**: `question`, `aggregate`, `autonomy`, `overall`
//! - **Orchestration**: `pipeline` (`ScoreCalculator`, one-shot helpers)
//! - **Surfaces**: `validate` (pre-flight checks), `encoder` (payload and text output), `ffi`

pub mod aggregate;
pub mod autonomy;
pub mod config;
pub mod encoder;
pub mod error;
pub mod overall;
pub mod pipeline;
pub mod question;
pub mod types;
pub mod validate;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::ScoringParams;
pub use error::ScoreError;
pub use pipeline::{parse_input, score_interview, score_interview_json, ScoreCalculator};
pub use types::{
    Category, CategoryWeights, InterviewConfig, InterviewInput, InterviewScores, QuestionMetrics,
    QuestionScores, ScoreDetails, ScoreReport,
};
pub use validate::{validate_input, IssueSeverity, ValidationIssue};

/// Crate version embedded in every payload
pub const SCORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for score payloads
pub const PRODUCER_NAME: &str = "interview-score";
