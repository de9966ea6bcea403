//! Grade computation engine.
//!
//! Turns the recorded exam components of a module (two written exams, a
//! final exam "MSP", optional weights, and a calculation policy) into an
//! entry grade ("EN") and a final average. Every input and output is
//! optional: missing data yields missing results, never an error.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Policy used to combine exam components into a final grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcType {
    /// EN = (K1 + K2) / 2, final = (EN + MSP) / 2.
    Equal,
    /// EN = K1 / 3 + 2 * K2 / 3, final = (EN + MSP) / 2.
    OneThirdTwoThirds,
    /// EN as in `Equal`; final = (EN + MSP) / 2 only if EN > MSP, else MSP.
    FinalExamOverride,
    /// Explicit per-component weights.
    Weighted,
}

impl CalcType {
    /// All policies in tag order.
    pub const ALL: [CalcType; 4] = [
        CalcType::Equal,
        CalcType::OneThirdTwoThirds,
        CalcType::FinalExamOverride,
        CalcType::Weighted,
    ];

    /// Resolve a stored integer tag. An absent tag means `Equal`; unknown
    /// tags resolve to `None`.
    pub fn from_tag(tag: Option<i64>) -> Option<Self> {
        match tag.unwrap_or(0) {
            0 => Some(CalcType::Equal),
            1 => Some(CalcType::OneThirdTwoThirds),
            2 => Some(CalcType::FinalExamOverride),
            3 => Some(CalcType::Weighted),
            _ => None,
        }
    }

    /// The integer tag this policy is stored as.
    pub fn tag(self) -> i64 {
        match self {
            CalcType::Equal => 0,
            CalcType::OneThirdTwoThirds => 1,
            CalcType::FinalExamOverride => 2,
            CalcType::Weighted => 3,
        }
    }

    /// Whether the weight fields are read by this policy.
    pub fn uses_weights(self) -> bool {
        matches!(self, CalcType::Weighted)
    }

    /// Short human description, as shown when choosing a policy.
    pub fn describe(self) -> &'static str {
        match self {
            CalcType::Equal => "25 - 25 - 50 (K1:K2 1:1, EN:MSP 1:1)",
            CalcType::OneThirdTwoThirds => "1/3 - 2/3 - 50 (K1:K2 1:2, EN:MSP 1:1)",
            CalcType::FinalExamOverride => {
                "(25 - 25) - 50 (K1:K2 1:1, EN:MSP 1:1 if EN > MSP, else MSP)"
            }
            CalcType::Weighted => "explicit weights",
        }
    }
}

impl fmt::Display for CalcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Recorded exam components of one module evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeInput {
    #[serde(default)]
    pub k1: Option<f64>,
    #[serde(default)]
    pub k2: Option<f64>,
    #[serde(default)]
    pub k1_weight: Option<f64>,
    #[serde(default)]
    pub k2_weight: Option<f64>,
    /// Final exam score.
    #[serde(default)]
    pub msp: Option<f64>,
    #[serde(default)]
    pub msp_weight: Option<f64>,
    /// Stored policy tag; absent means `CalcType::Equal`.
    #[serde(default)]
    pub calc_type: Option<i64>,
}

impl GradeInput {
    /// Run the engine on these inputs.
    pub fn compute(&self) -> GradeResult {
        compute_final_grade(
            self.k1,
            self.k2,
            self.k1_weight,
            self.k2_weight,
            self.msp,
            self.msp_weight,
            self.calc_type,
        )
    }
}

/// Output of the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    /// Entry grade ("EN"), the combination of K1 and K2.
    pub entry_grade: Option<f64>,
    /// Combination of the entry grade and the final exam.
    pub final_average: Option<f64>,
}

/// Compute the entry grade and final average for a module.
///
/// `calc_type` is the stored policy tag: absent means `0`, and any value
/// outside `0..=3` produces no result at all.
pub fn compute_final_grade(
    k1: Option<f64>,
    k2: Option<f64>,
    k1_weight: Option<f64>,
    k2_weight: Option<f64>,
    msp: Option<f64>,
    msp_weight: Option<f64>,
    calc_type: Option<i64>,
) -> GradeResult {
    let Some(policy) = CalcType::from_tag(calc_type) else {
        return GradeResult::default();
    };

    match policy {
        CalcType::Equal => {
            let entry_grade = combine_written(k1, k2, |a, b| (a + b) / 2.0);
            GradeResult {
                entry_grade,
                final_average: combine_final(entry_grade, msp, |en, m| (en + m) / 2.0),
            }
        }
        CalcType::OneThirdTwoThirds => {
            let entry_grade = combine_written(k1, k2, |a, b| (a / 3.0) + (2.0 * b / 3.0));
            GradeResult {
                entry_grade,
                final_average: combine_final(entry_grade, msp, |en, m| (en + m) / 2.0),
            }
        }
        CalcType::FinalExamOverride => {
            let entry_grade = combine_written(k1, k2, |a, b| (a + b) / 2.0);
            GradeResult {
                entry_grade,
                final_average: combine_final(entry_grade, msp, |en, m| {
                    if en > m {
                        (en + m) / 2.0
                    } else {
                        m
                    }
                }),
            }
        }
        CalcType::Weighted => {
            let mut numerator = 0.0;
            let mut total_weight = 0.0;
            for (score, weight) in [(k1, k1_weight), (k2, k2_weight)] {
                if let (Some(score), Some(weight)) = (score, weight) {
                    numerator += score * weight;
                    total_weight += weight;
                }
            }
            let entry_grade = (total_weight > 0.0).then(|| numerator / total_weight);

            let final_average = match (entry_grade, msp, msp_weight) {
                (Some(en), Some(m), Some(w)) => Some(en * (1.0 - w) + m * w),
                _ => entry_grade.or(msp),
            };
            GradeResult {
                entry_grade,
                final_average,
            }
        }
    }
}

/// Both written exams combine via `both`; a single one stands alone.
fn combine_written(
    k1: Option<f64>,
    k2: Option<f64>,
    both: impl Fn(f64, f64) -> f64,
) -> Option<f64> {
    match (k1, k2) {
        (Some(a), Some(b)) => Some(both(a, b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Entry grade and final exam combine via `both`; a single one stands alone.
fn combine_final(
    entry_grade: Option<f64>,
    msp: Option<f64>,
    both: impl Fn(f64, f64) -> f64,
) -> Option<f64> {
    match (entry_grade, msp) {
        (Some(en), Some(m)) => Some(both(en, m)),
        _ => entry_grade.or(msp),
    }
}
