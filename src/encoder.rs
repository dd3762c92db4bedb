//! Report encoding
//!
//! Wraps a `ScoreReport` with producer and provenance metadata for transport,
//! and renders the labeled plain-text form printed by the CLI.

use crate::error::ScoreError;
use crate::types::{Category, ScoreReport};
use crate::{PRODUCER_NAME, SCORE_VERSION};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Producer metadata attached to every payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Transport envelope for an interview report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePayload {
    pub producer: ScoreProducer,
    /// When the report was computed (RFC3339)
    pub computed_at_utc: String,
    /// Number of questions that were scored
    pub question_count: usize,
    pub report: ScoreReport,
}

/// Encoder for score payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Wrap a report in a payload
    pub fn encode(&self, report: &ScoreReport, question_count: usize) -> ScorePayload {
        ScorePayload {
            producer: ScoreProducer {
                name: PRODUCER_NAME.to_string(),
                version: SCORE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            question_count,
            report: *report,
        }
    }

    /// Encode to a pretty JSON string
    pub fn encode_to_json(
        &self,
        report: &ScoreReport,
        question_count: usize,
    ) -> Result<String, ScoreError> {
        let payload = self.encode(report, question_count);
        serde_json::to_string_pretty(&payload).map_err(ScoreError::JsonError)
    }
}

/// Labeled plain-text view of a report
///
/// Values use `Debug` formatting so whole numbers keep their `.0`.
pub struct TextReport<'a>(pub &'a ScoreReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "--- Candidate Final Scores ---")?;
        for category in Category::ALL {
            writeln!(f, "{}: {:?}", category.label(), report.get(category))?;
        }
        writeln!(f, "Overall Score: {:?}", report.overall)?;
        writeln!(f)?;
        writeln!(f, "--- Details ---")?;
        writeln!(f, "Base Score: {:?}", report.details.base_score)?;
        writeln!(f, "Difficulty Factor: {:?}", report.details.difficulty_factor)
    }
}

/// Render a report as labeled plain text
pub fn render_text(report: &ScoreReport) -> String {
    TextReport(report).to_string()
}
