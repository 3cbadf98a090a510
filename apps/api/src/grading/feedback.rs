#![allow(dead_code)]

//! Read-only projections over a finished [`ResumeAnalysis`] for presentation layers.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::models::analysis::{CategoryId, CategoryResult, CategoryStatus, Finding, ResumeAnalysis};

const GOOD_RATIO: f64 = 0.85;
const WARNING_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Pro,
    Con,
}

/// Addresses one finding inside an analysis. Renders as `pro-<i>` / `con-<i>`,
/// which is unique within its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FindingId {
    pub category: CategoryId,
    pub side: Side,
    pub index: usize,
}

impl FindingId {
    pub fn pro(category: CategoryId, index: usize) -> Self {
        Self { category, side: Side::Pro, index }
    }

    pub fn con(category: CategoryId, index: usize) -> Self {
        Self { category, side: Side::Con, index }
    }

    pub fn resolve<'a>(&self, analysis: &'a ResumeAnalysis) -> Option<&'a Finding> {
        let result = analysis.category(self.category)?;
        match self.side {
            Side::Pro => result.pros.get(self.index),
            Side::Con => result.cons.get(self.index),
        }
    }
}

impl fmt::Display for FindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Pro => "pro",
            Side::Con => "con",
        };
        write!(f, "{side}-{}", self.index)
    }
}

/// Flips one finding's tips between expanded and collapsed.
pub fn toggle_tip(id: FindingId, expanded: &BTreeSet<FindingId>) -> BTreeSet<FindingId> {
    let mut next = expanded.clone();
    if !next.remove(&id) {
        next.insert(id);
    }
    next
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Warning,
    Error,
}

impl ScoreBand {
    pub fn for_result(result: &CategoryResult) -> Option<Self> {
        if result.status == CategoryStatus::Unavailable || result.max_score == 0 {
            return None;
        }
        let ratio = result.score / f64::from(result.max_score);
        Some(if ratio >= GOOD_RATIO {
            ScoreBand::Good
        } else if ratio >= WARNING_RATIO {
            ScoreBand::Warning
        } else {
            ScoreBand::Error
        })
    }
}

/// Points a candidate could still earn across the categories that were scored.
pub fn points_available(analysis: &ResumeAnalysis) -> u32 {
    let missing: f64 = analysis
        .categories
        .iter()
        .filter(|c| c.status == CategoryStatus::Complete)
        .map(|c| (f64::from(c.max_score) - c.score).max(0.0))
        .sum();
    missing.round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: CategoryId,
    pub label: &'static str,
    pub score: f64,
    pub max_score: u32,
    pub status: CategoryStatus,
    pub band: Option<ScoreBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub overall_score: u32,
    pub categories: Vec<CategorySummary>,
    pub points_available: u32,
}

impl ScoreSummary {
    pub fn from_analysis(analysis: &ResumeAnalysis) -> Self {
        let categories = analysis
            .categories
            .iter()
            .map(|c| CategorySummary {
                category: c.category,
                label: c.category.label(),
                score: c.score,
                max_score: c.max_score,
                status: c.status,
                band: ScoreBand::for_result(c),
            })
            .collect();
        Self {
            overall_score: analysis.overall_score,
            categories,
            points_available: points_available(analysis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(category: CategoryId, score: f64, max: u32) -> CategoryResult {
        CategoryResult::from_findings(category, max, vec![Finding::new("ok")], vec![])
            .with_score(score)
    }

    fn analysis() -> ResumeAnalysis {
        ResumeAnalysis {
            overall_score: 57,
            categories: vec![
                result(CategoryId::Contact, 10.0, 10),
                result(CategoryId::Experience, 13.0, 25),
                result(CategoryId::Education, 8.0, 15),
                result(CategoryId::Skills, 6.0, 15),
                CategoryResult::unavailable(CategoryId::Summary, 15),
                result(CategoryId::Format, 20.0, 20),
            ],
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_finding_id_rendering() {
        assert_eq!(FindingId::pro(CategoryId::Skills, 0).to_string(), "pro-0");
        assert_eq!(FindingId::con(CategoryId::Skills, 3).to_string(), "con-3");
    }

    #[test]
    fn test_toggle_tip_is_pure() {
        let id = FindingId::con(CategoryId::Experience, 1);
        let empty = BTreeSet::new();

        let opened = toggle_tip(id, &empty);
        assert!(opened.contains(&id));
        assert!(empty.is_empty());

        let closed = toggle_tip(id, &opened);
        assert!(closed.is_empty());
        assert!(opened.contains(&id));
    }

    #[test]
    fn test_resolve() {
        let analysis = analysis();
        let id = FindingId::pro(CategoryId::Contact, 0);
        assert_eq!(id.resolve(&analysis).map(|f| f.text.as_str()), Some("ok"));
        assert!(FindingId::con(CategoryId::Contact, 0).resolve(&analysis).is_none());
        assert!(FindingId::pro(CategoryId::Specifics, 0).resolve(&analysis).is_none());
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(
            ScoreBand::for_result(&result(CategoryId::Contact, 10.0, 10)),
            Some(ScoreBand::Good)
        );
        assert_eq!(
            ScoreBand::for_result(&result(CategoryId::Experience, 13.0, 25)),
            Some(ScoreBand::Warning)
        );
        assert_eq!(
            ScoreBand::for_result(&result(CategoryId::Skills, 6.0, 15)),
            Some(ScoreBand::Error)
        );
        assert_eq!(
            ScoreBand::for_result(&CategoryResult::unavailable(CategoryId::Summary, 15)),
            None
        );
    }

    #[test]
    fn test_points_available_skips_unavailable() {
        // 0 + 12 + 7 + 9 + 0, the unavailable summary contributes nothing.
        assert_eq!(points_available(&analysis()), 28);
    }

    #[test]
    fn test_summary_shape() {
        let summary = ScoreSummary::from_analysis(&analysis());
        assert_eq!(summary.overall_score, 57);
        assert_eq!(summary.categories.len(), 6);
        assert_eq!(summary.categories[4].band, None);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["pointsAvailable"], 28);
        assert_eq!(json["categories"][0]["maxScore"], 10);
        assert_eq!(json["categories"][0]["band"], "good");
    }
}
