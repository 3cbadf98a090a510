//! Result payload shared by the grading engine and every consumer of it.
//!
//! Field names serialize in camelCase; the shape is the stable wire contract for
//! presentation layers (`overallScore`, `categories[]`, `completedAt`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grading::scoring::default_category_score;

/// One named dimension of résumé quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Contact,
    Experience,
    Education,
    Skills,
    Summary,
    Format,
    ActionOriented,
    Specifics,
    Overusage,
    AvoidedWords,
}

impl CategoryId {
    pub const ALL: [CategoryId; 10] = [
        CategoryId::Contact,
        CategoryId::Experience,
        CategoryId::Education,
        CategoryId::Skills,
        CategoryId::Summary,
        CategoryId::Format,
        CategoryId::ActionOriented,
        CategoryId::Specifics,
        CategoryId::Overusage,
        CategoryId::AvoidedWords,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Contact => "contact",
            CategoryId::Experience => "experience",
            CategoryId::Education => "education",
            CategoryId::Skills => "skills",
            CategoryId::Summary => "summary",
            CategoryId::Format => "format",
            CategoryId::ActionOriented => "action_oriented",
            CategoryId::Specifics => "specifics",
            CategoryId::Overusage => "overusage",
            CategoryId::AvoidedWords => "avoided_words",
        }
    }

    /// Human-readable label for cards and section headers.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryId::Contact => "Contact",
            CategoryId::Experience => "Experiences",
            CategoryId::Education => "Education",
            CategoryId::Skills => "Skills",
            CategoryId::Summary => "Summary",
            CategoryId::Format => "Format",
            CategoryId::ActionOriented => "Action Oriented",
            CategoryId::Specifics => "Specifics",
            CategoryId::Overusage => "Overusage",
            CategoryId::AvoidedWords => "Avoided Words",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(&['-', ' '][..], "_");
        CategoryId::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// A single strength or weakness, optionally carrying improvement tips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub text: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Finding {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tips: Vec::new(),
        }
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tips.push(tip.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    Complete,
    /// The analyzer failed or ran past its deadline. Neutral-absent, never a session failure.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub category: CategoryId,
    pub pros: Vec<Finding>,
    pub cons: Vec<Finding>,
    pub pros_count: usize,
    pub cons_count: usize,
    pub score: f64,
    pub max_score: u32,
    pub status: CategoryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_content: Option<String>,
}

impl CategoryResult {
    /// Builds a complete result scored with the default pros/cons policy.
    pub fn from_findings(
        category: CategoryId,
        max_score: u32,
        pros: Vec<Finding>,
        cons: Vec<Finding>,
    ) -> Self {
        let score = default_category_score(max_score, pros.len(), cons.len());
        Self {
            category,
            pros_count: pros.len(),
            cons_count: cons.len(),
            pros,
            cons,
            score,
            max_score,
            status: CategoryStatus::Complete,
            suggested_content: None,
        }
    }

    /// Placeholder for a category whose analyzer errored, timed out or never reported.
    pub fn unavailable(category: CategoryId, max_score: u32) -> Self {
        Self {
            category,
            pros: Vec::new(),
            cons: Vec::new(),
            pros_count: 0,
            cons_count: 0,
            score: 0.0,
            max_score,
            status: CategoryStatus::Unavailable,
            suggested_content: None,
        }
    }

    /// Replaces the default-policy score with an analyzer's own, clamped to `[0, max_score]`.
    #[cfg(test)]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = clamp_score(score, self.max_score);
        self
    }

    pub fn with_suggested_content(mut self, content: impl Into<String>) -> Self {
        self.suggested_content = Some(content.into());
        self
    }

    /// Re-derives every invariant from the lists instead of trusting what the analyzer reported.
    ///
    /// Category and max score come from the registry entry the result was produced for.
    /// A score the analyzer set itself is only clamped.
    pub fn normalized(mut self, category: CategoryId, max_score: u32) -> Self {
        if self.status == CategoryStatus::Unavailable {
            return Self::unavailable(category, max_score);
        }
        let follows_default_policy = self.score
            == default_category_score(self.max_score, self.pros.len(), self.cons.len());
        self.category = category;
        self.max_score = max_score;
        self.pros.retain(Finding::is_valid);
        self.cons.retain(Finding::is_valid);
        self.pros_count = self.pros.len();
        self.cons_count = self.cons.len();
        // A default-policy score is recomputed from the surviving findings.
        self.score = if follows_default_policy {
            default_category_score(max_score, self.pros_count, self.cons_count)
        } else {
            clamp_score(self.score, max_score)
        };
        self.suggested_content = self
            .suggested_content
            .filter(|content| !content.trim().is_empty());
        self
    }

    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        let counts_match = self.pros_count == self.pros.len() && self.cons_count == self.cons.len();
        let bounded = self.score >= 0.0 && self.score <= f64::from(self.max_score);
        let unavailable_is_empty = self.status != CategoryStatus::Unavailable
            || (self.pros.is_empty() && self.cons.is_empty() && self.score == 0.0);
        counts_match && bounded && unavailable_is_empty
    }
}

fn clamp_score(score: f64, max_score: u32) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, f64::from(max_score))
}

/// The single externally visible result of one analysis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub overall_score: u32,
    /// One entry per registered category, in registry order.
    pub categories: Vec<CategoryResult>,
    pub completed_at: DateTime<Utc>,
}

impl ResumeAnalysis {
    pub fn category(&self, category: CategoryId) -> Option<&CategoryResult> {
        self.categories.iter().find(|c| c.category == category)
    }
}
