use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::grading::analyzer::{AnalyzerError, CategoryAnalyzer};
use crate::models::analysis::{CategoryId, CategoryResult, Finding};
use crate::models::document::{bullet_marker, ResumeDocument};

const MIN_WORDS: usize = 100;
const MAX_WORDS: usize = 900;
const MAX_BULLET_WORDS: usize = 35;
const MIN_HEADINGS: usize = 3;

/// Layout-level checks: length, headings, bullet consistency and bullet length.
pub struct FormatAnalyzer;

#[async_trait]
impl CategoryAnalyzer for FormatAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::Format
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_format(document, max_score))
    }
}

fn assess_format(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    let words = document.word_count();
    if words < MIN_WORDS {
        cons.push(
            Finding::new(format!("Résumé is short ({words} words)"))
                .with_tip("Add detail to your experience until the page is comfortably filled."),
        );
    } else if words > MAX_WORDS {
        cons.push(
            Finding::new(format!("Résumé is long ({words} words)"))
                .with_tip("Aim for one page early in your career and at most two later on."),
        );
    } else {
        pros.push(Finding::new("Length fits on one to two pages"));
    }

    let headings = document.heading_count();
    if headings >= MIN_HEADINGS {
        pros.push(Finding::new("Uses clear section headings"));
    } else {
        cons.push(
            Finding::new("Few recognizable section headings")
                .with_tip("Use standard headings such as Summary, Experience, Education and Skills."),
        );
    }

    let markers: BTreeSet<char> = document
        .sections()
        .iter()
        .flat_map(|s| s.lines.iter())
        .filter_map(|line| bullet_marker(line))
        .collect();
    if markers.len() > 1 {
        cons.push(
            Finding::new("Bullet styles are mixed")
                .with_tip("Use a single bullet character throughout."),
        );
    } else if markers.len() == 1 {
        pros.push(Finding::new("Bullet style is consistent"));
    }

    let bullets = document.bullets();
    let long = bullets
        .iter()
        .filter(|b| b.split_whitespace().count() > MAX_BULLET_WORDS)
        .count();
    if long > 0 {
        cons.push(
            Finding::new(format!(
                "{long} bullet points run longer than {MAX_BULLET_WORDS} words"
            ))
            .with_tip("Keep each bullet to one or two lines."),
        );
    } else if !bullets.is_empty() {
        pros.push(Finding::new("Bullet points are concise"));
    }

    CategoryResult::from_findings(CategoryId::Format, max_score, pros, cons)
}
