//! Overall score combination
//!
//! Weights the four competency scores into a base score, then scales it by a
//! linear band around the baseline difficulty.

use crate::config::ScoringParams;
use crate::error::ScoreError;
use crate::types::{Category, CategoryWeights, InterviewAggregate, OverallScore};
use tracing::debug;

/// Combiner for the overall interview score
pub struct OverallCombiner;

impl OverallCombiner {
    /// Combine the competency scores into the overall score
    ///
    /// The result is not clamped: decks harder than the baseline can push
    /// the overall score above 10.
    pub fn combine(
        aggregate: &InterviewAggregate,
        autonomy: f64,
        weights: &CategoryWeights,
        params: &ScoringParams,
    ) -> Result<OverallScore, ScoreError> {
        let base_score = compute_base_score(aggregate, autonomy, weights)?;
        let difficulty_factor = compute_difficulty_factor(
            aggregate.totals.total_difficulty,
            aggregate.totals.question_count,
            params.baseline_difficulty,
        );
        let overall =
            base_score * (params.difficulty_floor + params.difficulty_slope * difficulty_factor);

        debug!(base_score, difficulty_factor, overall, "combined overall score");

        Ok(OverallScore {
            base_score,
            difficulty_factor,
            overall,
        })
    }
}

/// Weighted mean of the four competency scores
///
/// Formula: `Σ w_c * score_c / Σ w_c`
fn compute_base_score(
    aggregate: &InterviewAggregate,
    autonomy: f64,
    weights: &CategoryWeights,
) -> Result<f64, ScoreError> {
    for category in Category::ALL {
        let value = weights.get(category);
        if !value.is_finite() || value < 0.0 {
            return Err(ScoreError::InvalidWeight {
                category: category.key(),
                value,
            });
        }
    }

    let weight_sum = weights.sum();
    if weight_sum <= 0.0 {
        return Err(ScoreError::ZeroWeightSum);
    }

    let weighted = weights.ps * aggregate.avg_ps
        + weights.code * aggregate.avg_code
        + weights.resilience * aggregate.avg_resilience
        + weights.autonomy * autonomy;

    Ok(weighted / weight_sum)
}

/// Mean difficulty normalized against the baseline rating
///
/// Formula: `total_difficulty / (baseline * N)`, or 1 when no questions were asked
fn compute_difficulty_factor(total_difficulty: f64, question_count: usize, baseline: f64) -> f64 {
    if question_count == 0 {
        return 1.0;
    }
    total_difficulty / (baseline * question_count as f64)
}
