//! Weight table and score aggregation.
//!
//! Category scores are already bounded by their own `max_score`; the overall score is
//! their rounded sum, clamped to the 0–100 scale. Weights must sum to exactly 100.

use chrono::{DateTime, Utc};

use crate::grading::error::GradingError;
use crate::models::analysis::{CategoryId, CategoryResult, ResumeAnalysis};

pub const OVERALL_SCALE: u32 = 100;

/// Six-category breakdown used when no weights are configured.
pub const DEFAULT_WEIGHTS: &[(CategoryId, u32)] = &[
    (CategoryId::Contact, 10),
    (CategoryId::Experience, 25),
    (CategoryId::Education, 15),
    (CategoryId::Skills, 15),
    (CategoryId::Summary, 15),
    (CategoryId::Format, 20),
];

/// Ordered mapping of category → max score. Order is the canonical output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    entries: Vec<(CategoryId, u32)>,
}

impl WeightTable {
    pub fn new(entries: Vec<(CategoryId, u32)>) -> Result<Self, GradingError> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), GradingError> {
        if self.entries.is_empty() {
            return Err(GradingError::InvalidWeightTable(
                "no categories registered".to_string(),
            ));
        }
        for (index, (category, weight)) in self.entries.iter().enumerate() {
            if *weight == 0 {
                return Err(GradingError::InvalidWeightTable(format!(
                    "category '{category}' has a zero weight"
                )));
            }
            if self.entries[..index].iter().any(|(c, _)| c == category) {
                return Err(GradingError::InvalidWeightTable(format!(
                    "category '{category}' is registered more than once"
                )));
            }
        }
        let total = self.total();
        if total != OVERALL_SCALE {
            return Err(GradingError::InvalidWeightTable(format!(
                "weights sum to {total}, expected {OVERALL_SCALE}"
            )));
        }
        Ok(())
    }

    pub fn max_score(&self, category: CategoryId) -> Option<u32> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, w)| *w)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_WEIGHTS.to_vec(),
        }
    }
}

/// Default category scoring: share of pros among all findings, scaled to `max_score`.
/// A category with no findings at all scores half marks.
pub fn default_category_score(max_score: u32, pros: usize, cons: usize) -> f64 {
    let max = f64::from(max_score);
    let total = pros + cons;
    if total == 0 {
        return max / 2.0;
    }
    (max * pros as f64 / total as f64).round()
}

/// Sums category scores into the overall 0–100 score.
///
/// Each score is re-bounded by the weight table; categories absent from the table
/// contribute nothing.
pub fn aggregate(results: &[CategoryResult], weights: &WeightTable) -> u32 {
    let sum: f64 = results
        .iter()
        .map(|result| {
            let max = weights.max_score(result.category).unwrap_or(0);
            if result.score.is_nan() {
                0.0
            } else {
                result.score.clamp(0.0, f64::from(max))
            }
        })
        .sum();
    sum.round().clamp(0.0, f64::from(OVERALL_SCALE)) as u32
}

pub fn build_analysis(
    categories: Vec<CategoryResult>,
    weights: &WeightTable,
    completed_at: DateTime<Utc>,
) -> ResumeAnalysis {
    let overall_score = aggregate(&categories, weights);
    ResumeAnalysis {
        overall_score,
        categories,
        completed_at,
    }
}
