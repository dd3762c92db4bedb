//! Autonomy scoring
//!
//! Autonomy is computed once per interview from the total hint weight the
//! candidate consumed against the budget earned by the questions' difficulty.

use crate::types::InterviewTotals;
use tracing::debug;

/// Scorer for interview-wide autonomy
pub struct AutonomyScorer;

impl AutonomyScorer {
    /// Autonomy score (0-10)
    ///
    /// Formula: `10 * max(0, 1 - total_hints / (total_difficulty * hint_budget))`.
    /// With no budget accrued (no difficulty, or a zero multiplier) the candidate
    /// receives full credit.
    pub fn score(totals: &InterviewTotals, hint_budget: f64) -> f64 {
        let budget = totals.total_difficulty * hint_budget;
        let autonomy_term = if budget > 0.0 {
            1.0 - totals.total_hints / budget
        } else {
            1.0
        };
        let score = 10.0 * autonomy_term.max(0.0);

        debug!(
            budget,
            total_hints = totals.total_hints,
            score,
            "scored autonomy"
        );

        score
    }
}
