//! Interview aggregation
//!
//! Averages the per-question score series and carries the interview totals
//! forward to the autonomy and overall stages.

use crate::types::{InterviewAggregate, InterviewTotals, QuestionScores};
use tracing::debug;

/// Aggregator for per-question scores
pub struct InterviewAggregator;

impl InterviewAggregator {
    /// Average each competency across all questions
    ///
    /// An interview without questions averages to 0 in every category.
    pub fn aggregate(scores: &[QuestionScores], totals: InterviewTotals) -> InterviewAggregate {
        let avg_ps = mean(scores.iter().map(|s| s.ps));
        let avg_code = mean(scores.iter().map(|s| s.code));
        let avg_resilience = mean(scores.iter().map(|s| s.resilience));

        debug!(
            questions = scores.len(),
            avg_ps,
            avg_code,
            avg_resilience,
            total_hints = totals.total_hints,
            total_difficulty = totals.total_difficulty,
            "aggregated interview"
        );

        InterviewAggregate {
            avg_ps,
            avg_code,
            avg_resilience,
            totals,
        }
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}
