//! Pre-flight input validation
//!
//! The scorer applies only the arithmetic guards of the model. Callers that
//! want to reject bad telemetry before scoring run these checks first.

use crate::types::{Category, InterviewInput, QuestionMetrics};
use serde::{Deserialize, Serialize};

/// How serious a validation finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Scoring will fail on this input
    Error,
    /// Scoring succeeds but the telemetry is outside its expected range
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    /// Question index, or `None` for interview-level findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<usize>,
    /// Wire name of the offending field
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn error(question: Option<usize>, field: &str, message: String) -> Self {
        Self {
            severity: IssueSeverity::Error,
            question,
            field: field.to_string(),
            message,
        }
    }

    fn warning(question: Option<usize>, field: &str, message: String) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            question,
            field: field.to_string(),
            message,
        }
    }
}

/// Check an interview against the scoring input contract
pub fn validate_input(input: &InterviewInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (index, question) in input.questions.iter().enumerate() {
        validate_question(index, question, &mut issues);
    }

    let weights = &input.config.weights;
    for category in Category::ALL {
        let value = weights.get(category);
        if !value.is_finite() || value < 0.0 {
            issues.push(ValidationIssue::error(
                None,
                &format!("weights.{}", category.key()),
                format!("weight must be a non-negative number, got {value}"),
            ));
        }
    }
    if weights.sum() <= 0.0 {
        issues.push(ValidationIssue::error(
            None,
            "weights",
            "weights must not all be zero".to_string(),
        ));
    }

    if input.config.hint_budget <= 0.0 {
        issues.push(ValidationIssue::warning(
            None,
            "hint_budget",
            format!(
                "hint budget {} disables the autonomy penalty",
                input.config.hint_budget
            ),
        ));
    }

    issues
}

/// Count findings at error severity
pub fn error_count(issues: &[ValidationIssue]) -> usize {
    issues
        .iter()
        .filter(|i| i.severity == IssueSeverity::Error)
        .count()
}

fn validate_question(index: usize, q: &QuestionMetrics, issues: &mut Vec<ValidationIssue>) {
    let at = Some(index);

    if q.elements_total <= 0.0 {
        issues.push(ValidationIssue::error(
            at,
            "E_total",
            "expected solution elements must be non-zero".to_string(),
        ));
    }
    if q.elements_covered > q.elements_total {
        issues.push(ValidationIssue::warning(
            at,
            "E_covered",
            format!(
                "covered elements {} exceed expected {}",
                q.elements_covered, q.elements_total
            ),
        ));
    }

    for (field, value) in [
        ("T_think", q.think_time),
        ("T_total", q.total_time),
        ("T_stuck", q.stuck_time),
    ] {
        if value < 0.0 {
            issues.push(ValidationIssue::warning(
                at,
                field,
                format!("duration must be non-negative, got {value}"),
            ));
        }
    }
    if q.think_time > q.total_time {
        issues.push(ValidationIssue::warning(
            at,
            "T_think",
            "think time exceeds total time".to_string(),
        ));
    }
    if q.stuck_time > q.total_time {
        issues.push(ValidationIssue::warning(
            at,
            "T_stuck",
            "stuck time exceeds total time".to_string(),
        ));
    }

    if q.useful_keystrokes > q.total_keystrokes {
        issues.push(ValidationIssue::warning(
            at,
            "K_useful",
            format!(
                "useful keystrokes {} exceed total {}",
                q.useful_keystrokes, q.total_keystrokes
            ),
        ));
    }

    for (field, value) in [("S_lint", q.lint_score), ("S_sentiment", q.sentiment)] {
        if !(0.0..=1.0).contains(&value) {
            issues.push(ValidationIssue::warning(
                at,
                field,
                format!("signal must be within 0-1, got {value}"),
            ));
        }
    }

    if q.hints.iter().any(|&h| h < 0.0) {
        issues.push(ValidationIssue::warning(
            at,
            "H_types",
            "hint weights must be non-negative".to_string(),
        ));
    }

    if q.difficulty <= 0.0 {
        issues.push(ValidationIssue::warning(
            at,
            "Q_difficulty",
            format!("difficulty must be positive, got {}", q.difficulty),
        ));
    }
}
