//! Scoring pipeline orchestration
//!
//! Runs the four scoring stages in order over one interview:
//! per-question scoring → aggregation → autonomy → overall combination.

use crate::aggregate::InterviewAggregator;
use crate::autonomy::AutonomyScorer;
use crate::config::ScoringParams;
use crate::error::ScoreError;
use crate::overall::OverallCombiner;
use crate::question::QuestionScorer;
use crate::types::{
    InterviewConfig, InterviewInput, InterviewScores, QuestionMetrics, QuestionScores,
    ScoreDetails, ScoreReport,
};
use tracing::debug;

/// Score an interview with the reference model (stateless, one-shot).
///
/// # Example
/// ```ignore
/// let report = score_interview(&questions, &config)?;
/// println!("overall: {}", report.overall);
/// ```
pub fn score_interview(
    questions: &[QuestionMetrics],
    config: &InterviewConfig,
) -> Result<ScoreReport, ScoreError> {
    ScoreCalculator::new().calculate(questions, config)
}

/// Score an interview JSON document and return the report as JSON.
///
/// # Arguments
/// * `input_json` - `{"questions": [...], "config": {...}}`
///
/// # Returns
/// Pretty-printed `ScoreReport` JSON
pub fn score_interview_json(input_json: &str) -> Result<String, ScoreError> {
    let input = parse_input(input_json)?;
    let report = score_interview(&input.questions, &input.config)?;
    serde_json::to_string_pretty(&report).map_err(ScoreError::JsonError)
}

/// Parse an interview JSON document
pub fn parse_input(input_json: &str) -> Result<InterviewInput, ScoreError> {
    serde_json::from_str(input_json)
        .map_err(|e| ScoreError::ParseError(format!("Failed to parse interview: {}", e)))
}

/// Interview score calculator
///
/// Holds the model parameters; every call is independent and the calculator
/// can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    params: ScoringParams,
}

impl ScoreCalculator {
    /// Create a calculator using the reference model parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom model parameters
    pub fn with_params(params: ScoringParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score an interview and return the rounded report
    pub fn calculate(
        &self,
        questions: &[QuestionMetrics],
        config: &InterviewConfig,
    ) -> Result<ScoreReport, ScoreError> {
        let scores = self.calculate_detailed(questions, config)?;
        Ok(self.report(&scores))
    }

    /// Score an interview and return every unrounded stage result
    pub fn calculate_detailed(
        &self,
        questions: &[QuestionMetrics],
        config: &InterviewConfig,
    ) -> Result<InterviewScores, ScoreError> {
        debug!(questions = questions.len(), "scoring interview");

        // Stage 1: Per-question scores and interview totals
        let question_scores = self.score_questions(questions)?;
        let totals = QuestionScorer::totals(questions);

        // Stage 2: Aggregate
        let aggregate = InterviewAggregator::aggregate(&question_scores, totals);

        // Stage 3: Autonomy
        let autonomy = AutonomyScorer::score(&aggregate.totals, config.hint_budget);

        // Stage 4: Overall
        let overall = OverallCombiner::combine(&aggregate, autonomy, &config.weights, &self.params)?;

        Ok(InterviewScores {
            questions: question_scores,
            aggregate,
            autonomy,
            overall,
        })
    }

    /// Score each question independently
    pub fn score_questions(
        &self,
        questions: &[QuestionMetrics],
    ) -> Result<Vec<QuestionScores>, ScoreError> {
        QuestionScorer::score_all(questions, &self.params)
    }

    /// Round stage results into the presentation report
    pub fn report(&self, scores: &InterviewScores) -> ScoreReport {
        let p = &self.params;
        ScoreReport {
            ps: p.round(scores.aggregate.avg_ps),
            code: p.round(scores.aggregate.avg_code),
            resilience: p.round(scores.aggregate.avg_resilience),
            autonomy: p.round(scores.autonomy),
            overall: p.round(scores.overall.overall),
            details: ScoreDetails {
                base_score: p.round(scores.overall.base_score),
                difficulty_factor: p.round(scores.overall.difficulty_factor),
            },
        }
    }
}
