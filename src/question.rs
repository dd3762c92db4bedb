//! Per-question scoring
//!
//! Computes the problem-solving, coding-proficiency and resilience scores of a
//! single question. Each question is scored independently; the interview-wide
//! totals are a separate reduction over the same records.

use crate::config::ScoringParams;
use crate::error::ScoreError;
use crate::types::{InterviewTotals, QuestionMetrics, QuestionScores};
use tracing::trace;

/// Scorer for individual interview questions
pub struct QuestionScorer;

impl QuestionScorer {
    /// Score one question
    ///
    /// `index` is the position of the question in the interview and is only
    /// used to identify it in errors.
    pub fn score(
        index: usize,
        question: &QuestionMetrics,
        params: &ScoringParams,
    ) -> Result<QuestionScores, ScoreError> {
        if question.elements_total == 0.0 {
            return Err(ScoreError::MissingCoverage { question: index });
        }

        let coverage = question.elements_covered / question.elements_total;
        let think_term = compute_think_term(question.think_time, question.total_time, params);
        let ps = compute_problem_solving(coverage, think_term, params);

        let improvement = compute_improvement_factor(
            question.complexity_initial,
            question.complexity_final,
            question.complexity_target,
            params.epsilon,
        );
        let keystroke_efficiency =
            compute_keystroke_efficiency(question.useful_keystrokes, question.total_keystrokes);
        let code = compute_coding_proficiency(
            improvement,
            question.lint_score,
            keystroke_efficiency,
            params,
        );

        let stuck_ratio = compute_stuck_ratio(question.stuck_time, question.total_time);
        let resilience = compute_resilience(stuck_ratio, question.sentiment);

        trace!(
            question = index,
            coverage,
            think_term,
            improvement,
            keystroke_efficiency,
            stuck_ratio,
            ps,
            code,
            resilience,
            "scored question"
        );

        Ok(QuestionScores {
            ps,
            code,
            resilience,
        })
    }

    /// Score every question in order
    pub fn score_all(
        questions: &[QuestionMetrics],
        params: &ScoringParams,
    ) -> Result<Vec<QuestionScores>, ScoreError> {
        questions
            .iter()
            .enumerate()
            .map(|(index, question)| Self::score(index, question, params))
            .collect()
    }

    /// Sum hint weights and difficulty across all questions
    pub fn totals(questions: &[QuestionMetrics]) -> InterviewTotals {
        InterviewTotals {
            total_hints: questions.iter().map(QuestionMetrics::hint_weight).sum(),
            total_difficulty: questions.iter().map(|q| q.difficulty).sum(),
            question_count: questions.len(),
        }
    }
}

/// Gaussian preference for deliberation time
///
/// Formula: `exp(-(T_think / T_total - target)^2)`, capped at 1.
/// The ratio is undefined when `T_total <= 0`; that is degenerate telemetry,
/// and 0 is the defined fallback for it rather than a value of the formula.
fn compute_think_term(think_time: f64, total_time: f64, params: &ScoringParams) -> f64 {
    if total_time <= 0.0 {
        return 0.0;
    }
    let think_ratio = think_time / total_time;
    (-(think_ratio - params.target_think_ratio).powi(2))
        .exp()
        .min(1.0)
}

/// Problem-solving score (0-10)
///
/// Formula: `10 * (0.6 * coverage + 0.4 * think_term)`
fn compute_problem_solving(coverage: f64, think_term: f64, params: &ScoringParams) -> f64 {
    10.0 * (params.ps_coverage_weight * coverage + params.ps_think_weight * think_term)
}

/// How far the code moved from its initial complexity toward the target
///
/// Formula: `(C_initial - C_final) / (C_initial - C_target + ε)`, clamped to 0-1.
/// Regressions clamp to 0 and overshooting the target clamps to 1.
fn compute_improvement_factor(initial: f64, final_: f64, target: f64, epsilon: f64) -> f64 {
    ((initial - final_) / (initial - target + epsilon)).clamp(0.0, 1.0)
}

/// Fraction of keystrokes that survived into the final code (0 when none were recorded)
fn compute_keystroke_efficiency(useful: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    useful / total
}

/// Coding-proficiency score (0-10)
///
/// Formula: `10 * (0.5 * improvement + 0.3 * S_lint + 0.2 * keystroke_efficiency)`
fn compute_coding_proficiency(
    improvement: f64,
    lint_score: f64,
    keystroke_efficiency: f64,
    params: &ScoringParams,
) -> f64 {
    10.0 * (params.code_improvement_weight * improvement
        + params.code_lint_weight * lint_score
        + params.code_keystroke_weight * keystroke_efficiency)
}

/// Fraction of the question spent stalled
///
/// A question with no recorded time is treated as fully stuck.
fn compute_stuck_ratio(stuck_time: f64, total_time: f64) -> f64 {
    if total_time <= 0.0 {
        return 1.0;
    }
    stuck_time / total_time
}

/// Resilience score (0-10)
///
/// Formula: `10 * (1 - stuck_ratio) * S_sentiment`
fn compute_resilience(stuck_ratio: f64, sentiment: f64) -> f64 {
    10.0 * (1.0 - stuck_ratio) * sentiment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_question() -> QuestionMetrics {
        QuestionMetrics {
            think_time: 120.0,
            total_time: 600.0,
            stuck_time: 45.0,
            elements_covered: 3.0,
            elements_total: 4.0,
            complexity_initial: 2.0,
            complexity_final: 1.0,
            complexity_target: 1.0,
            lint_score: 0.85,
            useful_keystrokes: 400.0,
            total_keystrokes: 550.0,
            sentiment: 0.8,
            hints: vec![1.0],
            difficulty: 2.0,
        }
    }

    #[test]
    fn test_reference_question_scores() {
        let params = ScoringParams::default();
        let scores = QuestionScorer::score(0, &make_test_question(), &params).unwrap();

        // coverage 0.75, think ratio 0.2 -> exp(-0.01)
        assert!((scores.ps - 8.460199334996672).abs() < 1e-9);
        // improvement ~1, lint 0.85, keystrokes 400/550
        assert!((scores.code - 9.004540454550456).abs() < 1e-9);
        // stuck 45/600, sentiment 0.8
        assert!((scores.resilience - 7.4).abs() < 1e-9);
    }

    #[test]
    fn test_think_term_peaks_at_target() {
        let params = ScoringParams::default();
        assert!((compute_think_term(30.0, 100.0, &params) - 1.0).abs() < 1e-12);

        // Symmetric decay around the target
        let below = compute_think_term(10.0, 100.0, &params);
        let above = compute_think_term(50.0, 100.0, &params);
        assert!((below - above).abs() < 1e-12);
        assert!(below < 1.0);

        // All thinking, no coding
        let all_think = compute_think_term(100.0, 100.0, &params);
        assert!((all_think - (-0.49f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_think_term_zero_time() {
        let params = ScoringParams::default();
        assert_eq!(compute_think_term(0.0, 0.0, &params), 0.0);
    }

    #[test]
    fn test_improvement_factor_bounds() {
        let eps = 1e-6;

        // No change
        assert_eq!(compute_improvement_factor(2.0, 2.0, 1.0, eps), 0.0);

        // Target reached (1 - O(eps))
        let reached = compute_improvement_factor(2.0, 1.0, 1.0, eps);
        assert!((reached - 1.0).abs() < 1e-5);

        // Code got worse clamps to 0
        assert_eq!(compute_improvement_factor(2.0, 3.0, 1.0, eps), 0.0);

        // Overshooting the target clamps to 1
        assert_eq!(compute_improvement_factor(2.0, 0.0, 1.0, eps), 1.0);

        // Halfway
        let half = compute_improvement_factor(3.0, 2.0, 1.0, eps);
        assert!((half - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_improvement_factor_initial_equals_target() {
        // Denominator is epsilon; any movement saturates, no movement is 0
        assert_eq!(compute_improvement_factor(1.0, 1.0, 1.0, 1e-6), 0.0);
        assert_eq!(compute_improvement_factor(1.0, 0.5, 1.0, 1e-6), 1.0);
        assert_eq!(compute_improvement_factor(1.0, 1.5, 1.0, 1e-6), 0.0);
    }

    #[test]
    fn test_keystroke_efficiency() {
        assert!((compute_keystroke_efficiency(400.0, 550.0) - 400.0 / 550.0).abs() < 1e-12);
        assert_eq!(compute_keystroke_efficiency(0.0, 0.0), 0.0);
        assert_eq!(compute_keystroke_efficiency(10.0, 10.0), 1.0);
    }

    #[test]
    fn test_stuck_ratio_zero_time_is_worst_case() {
        assert_eq!(compute_stuck_ratio(0.0, 0.0), 1.0);
        assert!((compute_stuck_ratio(150.0, 1200.0) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_resilience_zero_sentiment() {
        assert_eq!(compute_resilience(0.0, 0.0), 0.0);
        assert_eq!(compute_resilience(0.5, 0.0), 0.0);
        assert_eq!(compute_resilience(1.0, 0.0), 0.0);

        let mut question = make_test_question();
        question.sentiment = 0.0;
        let scores = QuestionScorer::score(0, &question, &ScoringParams::default()).unwrap();
        assert_eq!(scores.resilience, 0.0);
    }

    #[test]
    fn test_zero_time_question_is_scored() {
        let mut question = make_test_question();
        question.think_time = 0.0;
        question.total_time = 0.0;
        question.stuck_time = 0.0;

        let scores = QuestionScorer::score(0, &question, &ScoringParams::default()).unwrap();
        // Only coverage survives in problem solving
        assert!((scores.ps - 4.5).abs() < 1e-9);
        assert_eq!(scores.resilience, 0.0);
    }

    #[test]
    fn test_zero_expected_elements_is_rejected() {
        let mut question = make_test_question();
        question.elements_total = 0.0;

        let result = QuestionScorer::score(3, &question, &ScoringParams::default());
        assert!(matches!(result, Err(ScoreError::MissingCoverage { question: 3 })));
    }

    #[test]
    fn test_score_all_reports_failing_index() {
        let good = make_test_question();
        let mut bad = make_test_question();
        bad.elements_total = 0.0;

        let result = QuestionScorer::score_all(&[good.clone(), good, bad], &ScoringParams::default());
        assert!(matches!(result, Err(ScoreError::MissingCoverage { question: 2 })));
    }

    #[test]
    fn test_scores_within_range() {
        let params = ScoringParams::default();
        let mut question = make_test_question();
        question.elements_covered = 4.0;
        question.lint_score = 1.0;
        question.useful_keystrokes = 550.0;
        question.sentiment = 1.0;
        question.stuck_time = 0.0;
        question.think_time = 180.0;

        let scores = QuestionScorer::score(0, &question, &params).unwrap();
        for value in [scores.ps, scores.code, scores.resilience] {
            assert!((0.0..=10.0).contains(&value), "{value} out of range");
        }
        assert!((scores.ps - 10.0).abs() < 1e-9);
        assert!((scores.resilience - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals() {
        let first = make_test_question();
        let mut second = make_test_question();
        second.hints = vec![1.0, 2.0];
        second.difficulty = 3.0;

        let totals = QuestionScorer::totals(&[first, second]);
        assert_eq!(totals.total_hints, 4.0);
        assert_eq!(totals.total_difficulty, 5.0);
        assert_eq!(totals.question_count, 2);

        assert_eq!(QuestionScorer::totals(&[]), InterviewTotals::default());
    }
}
