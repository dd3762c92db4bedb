//! Interview scoring data types
//!
//! Inputs are keyed the way the interview telemetry collector emits them
//! (`T_think`, `E_total`, `H_types`, ...). Outputs are keyed by the fixed
//! category names `ps`, `code`, `resilience`, `autonomy` and `overall`.

use serde::{Deserialize, Serialize};

/// Competency categories that carry a configured weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ps,
    Code,
    Resilience,
    Autonomy,
}

impl Category {
    /// All weighted categories, in report order
    pub const ALL: [Category; 4] = [
        Category::Ps,
        Category::Code,
        Category::Resilience,
        Category::Autonomy,
    ];

    /// Wire key for this category
    pub fn key(self) -> &'static str {
        match self {
            Category::Ps => "ps",
            Category::Code => "code",
            Category::Resilience => "resilience",
            Category::Autonomy => "autonomy",
        }
    }

    /// Human-readable label used by the text printer
    pub fn label(self) -> &'static str {
        match self {
            Category::Ps => "Problem-Solving Score",
            Category::Code => "Coding Proficiency Score",
            Category::Resilience => "Resilience Score",
            Category::Autonomy => "Autonomy Score",
        }
    }
}

/// Telemetry captured for a single interview question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMetrics {
    /// Time spent deliberating before active coding (seconds)
    #[serde(rename = "T_think")]
    pub think_time: f64,
    /// Total time spent on the question (seconds)
    #[serde(rename = "T_total")]
    pub total_time: f64,
    /// Time spent stalled without progress (seconds)
    #[serde(rename = "T_stuck")]
    pub stuck_time: f64,

    /// Solution-element categories the candidate addressed
    #[serde(rename = "E_covered")]
    pub elements_covered: f64,
    /// Solution-element categories expected; must be non-zero
    #[serde(rename = "E_total")]
    pub elements_total: f64,

    /// Complexity/distance metric of the first working draft
    #[serde(rename = "C_initial")]
    pub complexity_initial: f64,
    /// Complexity/distance metric of the submitted code
    #[serde(rename = "C_final")]
    pub complexity_final: f64,
    /// Complexity/distance metric of the reference solution
    #[serde(rename = "C_target")]
    pub complexity_target: f64,

    /// Static-analysis quality signal (0-1)
    #[serde(rename = "S_lint")]
    pub lint_score: f64,

    /// Keystrokes that survived into the final code
    #[serde(rename = "K_useful")]
    pub useful_keystrokes: f64,
    /// All keystrokes recorded
    #[serde(rename = "K_total")]
    pub total_keystrokes: f64,

    /// Affect signal (0-1, 1 = positive)
    #[serde(rename = "S_sentiment")]
    pub sentiment: f64,

    /// Severity weights of the hints consumed, in reveal order
    #[serde(rename = "H_types", default)]
    pub hints: Vec<f64>,

    /// Difficulty rating (3 = medium)
    #[serde(rename = "Q_difficulty")]
    pub difficulty: f64,
}

impl QuestionMetrics {
    /// Sum of the severity weights of all hints consumed on this question
    pub fn hint_weight(&self) -> f64 {
        self.hints.iter().sum()
    }
}

/// Weight per competency category; need not sum to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryWeights {
    pub ps: f64,
    pub code: f64,
    pub resilience: f64,
    pub autonomy: f64,
}

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Ps => self.ps,
            Category::Code => self.code,
            Category::Resilience => self.resilience,
            Category::Autonomy => self.autonomy,
        }
    }

    /// Sum of all configured weights
    pub fn sum(&self) -> f64 {
        Category::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// Interview-wide scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewConfig {
    pub weights: CategoryWeights,
    /// Allowed cumulative hint weight per unit of difficulty
    #[serde(default = "default_hint_budget")]
    pub hint_budget: f64,
}

fn default_hint_budget() -> f64 {
    1.0
}

/// A complete interview as handed over by the data collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewInput {
    /// Questions in the order they were asked
    #[serde(alias = "questions_data")]
    pub questions: Vec<QuestionMetrics>,
    /// Weights and hint budget
    #[serde(alias = "interview_config")]
    pub config: InterviewConfig,
}

/// Per-question competency scores (0-10, unrounded)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuestionScores {
    pub ps: f64,
    pub code: f64,
    pub resilience: f64,
}

/// Interview-wide totals accumulated across all questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewTotals {
    /// Sum of every hint weight consumed
    pub total_hints: f64,
    /// Sum of every question difficulty
    pub total_difficulty: f64,
    /// Number of questions scored
    pub question_count: usize,
}

/// Averaged competency scores plus the pass-through totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterviewAggregate {
    pub avg_ps: f64,
    pub avg_code: f64,
    pub avg_resilience: f64,
    pub totals: InterviewTotals,
}

/// Result of the weighted combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    /// Weighted mean of the four competency scores (0-10)
    pub base_score: f64,
    /// Mean difficulty normalized against the baseline rating
    pub difficulty_factor: f64,
    /// Difficulty-adjusted score; may exceed 10
    pub overall: f64,
}

/// Every stage result of one interview, before rounding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewScores {
    pub questions: Vec<QuestionScores>,
    pub aggregate: InterviewAggregate,
    pub autonomy: f64,
    pub overall: OverallScore,
}

/// Supporting values behind the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub base_score: f64,
    pub difficulty_factor: f64,
}

/// Rounded interview scores for presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub ps: f64,
    pub code: f64,
    pub resilience: f64,
    pub autonomy: f64,
    pub overall: f64,
    pub details: ScoreDetails,
}

impl ScoreReport {
    /// Score reported for a weighted category
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Ps => self.ps,
            Category::Code => self.code,
            Category::Resilience => self.resilience,
            Category::Autonomy => self.autonomy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_metrics_deserialization() {
        let json = r#"{
            "T_think": 120, "T_total": 600, "T_stuck": 45,
            "E_covered": 3, "E_total": 4,
            "C_initial": 2.0, "C_final": 1.0, "C_target": 1.0,
            "S_lint": 0.85, "K_useful": 400, "K_total": 550,
            "S_sentiment": 0.8,
            "H_types": [1],
            "Q_difficulty": 2
        }"#;

        let q: QuestionMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(q.think_time, 120.0);
        assert_eq!(q.elements_total, 4.0);
        assert_eq!(q.useful_keystrokes, 400.0);
        assert_eq!(q.hints, vec![1.0]);
        assert_eq!(q.difficulty, 2.0);
    }

    #[test]
    fn test_float_valued_counts_deserialize() {
        let json = r#"{
            "T_think": 120, "T_total": 600, "T_stuck": 45,
            "E_covered": 3.0, "E_total": 4.0,
            "C_initial": 2.0, "C_final": 1.0, "C_target": 1.0,
            "S_lint": 0.85, "K_useful": 400.0, "K_total": 550.0,
            "S_sentiment": 0.8,
            "H_types": [1.0],
            "Q_difficulty": 2.0
        }"#;

        let q: QuestionMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(q.elements_covered, 3.0);
        assert_eq!(q.elements_total, 4.0);
        assert_eq!(q.useful_keystrokes, 400.0);
        assert_eq!(q.total_keystrokes, 550.0);
    }

    #[test]
    fn test_hints_default_to_empty() {
        let json = r#"{
            "T_think": 0, "T_total": 60, "T_stuck": 0,
            "E_covered": 1, "E_total": 1,
            "C_initial": 1.0, "C_final": 1.0, "C_target": 1.0,
            "S_lint": 1.0, "K_useful": 0, "K_total": 0,
            "S_sentiment": 1.0,
            "Q_difficulty": 3
        }"#;

        let q: QuestionMetrics = serde_json::from_str(json).unwrap();
        assert!(q.hints.is_empty());
        assert_eq!(q.hint_weight(), 0.0);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{ "T_think": 10, "T_total": 60 }"#;
        let result: Result<QuestionMetrics, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_defaults_hint_budget() {
        let json = r#"{ "weights": { "ps": 0.4, "code": 0.3, "resilience": 0.1, "autonomy": 0.2 } }"#;
        let config: InterviewConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.hint_budget, 1.0);
        assert!((config.weights.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_weight_category_is_rejected() {
        let json = r#"{ "weights": { "ps": 1, "code": 1, "resilience": 1, "autonomy": 1, "style": 1 } }"#;
        let result: Result<InterviewConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_keys() {
        let keys: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["ps", "code", "resilience", "autonomy"]);

        let json = serde_json::to_string(&Category::Resilience).unwrap();
        assert_eq!(json, "\"resilience\"");
    }

    #[test]
    fn test_report_serialization_keys() {
        let report = ScoreReport {
            ps: 8.23,
            code: 8.78,
            resilience: 6.76,
            autonomy: 2.0,
            overall: 7.93,
            details: ScoreDetails {
                base_score: 7.0,
                difficulty_factor: 0.83,
            },
        };

        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value["ps"], 8.23);
        assert_eq!(value["overall"], 7.93);
        assert_eq!(value["details"]["difficulty_factor"], 0.83);
        assert_eq!(report.get(Category::Autonomy), 2.0);
    }
}
