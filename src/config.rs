//! Scoring model parameters
//!
//! Every constant the formulas use lives here and is handed to the stages
//! explicitly. `ScoringParams::default()` is the reference model.

use serde::{Deserialize, Serialize};

/// Offset added to the complexity-improvement denominator
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Difficulty rating treated as neutral
pub const DEFAULT_BASELINE_DIFFICULTY: f64 = 3.0;

/// Constants of the scoring model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Keeps the improvement denominator off zero when initial and target coincide
    pub epsilon: f64,

    /// Think ratio at which the problem-solving Gaussian peaks
    pub target_think_ratio: f64,
    /// Share of problem-solving carried by solution coverage
    pub ps_coverage_weight: f64,
    /// Share of problem-solving carried by the think-ratio term
    pub ps_think_weight: f64,

    /// Share of coding proficiency carried by complexity improvement
    pub code_improvement_weight: f64,
    /// Share of coding proficiency carried by lint quality
    pub code_lint_weight: f64,
    /// Share of coding proficiency carried by keystroke efficiency
    pub code_keystroke_weight: f64,

    /// Mean difficulty that yields a difficulty factor of 1
    pub baseline_difficulty: f64,
    /// Overall multiplier at zero difficulty
    pub difficulty_floor: f64,
    /// Overall multiplier gained per unit of difficulty factor
    pub difficulty_slope: f64,

    /// Decimal places kept in the report
    pub precision: u32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            target_think_ratio: 0.3,
            ps_coverage_weight: 0.6,
            ps_think_weight: 0.4,
            code_improvement_weight: 0.5,
            code_lint_weight: 0.3,
            code_keystroke_weight: 0.2,
            baseline_difficulty: DEFAULT_BASELINE_DIFFICULTY,
            difficulty_floor: 0.8,
            difficulty_slope: 0.4,
            precision: 2,
        }
    }
}

impl ScoringParams {
    /// Round a value to the configured number of decimal places
    ///
    /// Ties go to the even neighbor, so 0.125 reports as 0.12.
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.precision as i32);
        (value * scale).round_ties_even() / scale
    }
}
