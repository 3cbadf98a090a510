use async_trait::async_trait;

use crate::grading::analyzer::{AnalyzerError, CategoryAnalyzer};
use crate::grading::analyzers::lexicon::contains_phrase;
use crate::models::analysis::{CategoryId, CategoryResult, Finding};
use crate::models::document::{ResumeDocument, SectionKind};

const DEGREE_MARKERS: &[&str] = &[
    "bachelor", "master", "b.s.", "b.sc", "bsc", "b.a.", "m.s.", "m.sc", "msc", "mba", "phd",
    "ph.d", "associate", "diploma", "degree", "doctorate", "beng", "meng",
];

const INSTITUTION_MARKERS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "polytechnic",
];

pub struct EducationAnalyzer;

#[async_trait]
impl CategoryAnalyzer for EducationAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::Education
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_education(document, max_score))
    }
}

fn assess_education(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let lines = document.section_lines(SectionKind::Education);
    if lines.is_empty() {
        return CategoryResult::from_findings(
            CategoryId::Education,
            max_score,
            vec![],
            vec![Finding::new("No education section found")
                .with_tip("Add an 'Education' heading with your degree, institution and year.")],
        );
    }

    let text = lines.join("\n");
    let lower = text.to_lowercase();
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    if DEGREE_MARKERS.iter().any(|m| lower.contains(m)) {
        pros.push(Finding::new("Degree or qualification is listed"));
    } else {
        cons.push(
            Finding::new("No degree or qualification named")
                .with_tip("Spell out the qualification, e.g. 'B.S. Computer Science'."),
        );
    }

    if INSTITUTION_MARKERS.iter().any(|m| contains_phrase(&text, m)) {
        pros.push(Finding::new("Institution is named"));
    } else {
        cons.push(
            Finding::new("Institution name is unclear")
                .with_tip("Use the institution's full official name."),
        );
    }

    let has_year = text
        .split(|c: char| !c.is_ascii_digit())
        .any(|token| token.len() == 4 && token.starts_with(|c: char| c == '1' || c == '2'));
    if has_year {
        pros.push(Finding::new("Graduation year is included"));
    } else {
        cons.push(
            Finding::new("Graduation year is missing")
                .with_tip("Add the graduation year, or 'Expected 2026' if you are still studying."),
        );
    }

    CategoryResult::from_findings(CategoryId::Education, max_score, pros, cons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::test_support::sample_document;
    use crate::models::document::DocumentHandle;

    #[test]
    fn test_sample_education_is_complete() {
        let result = assess_education(&sample_document(), 15);
        assert_eq!(result.pros_count, 3);
        assert_eq!(result.cons_count, 0);
    }

    #[test]
    fn test_partial_education() {
        let doc = ResumeDocument::new(
            DocumentHandle::new("d"),
            "Education\nState College, coursework in statistics",
        );
        let result = assess_education(&doc, 15);
        assert_eq!(result.pros_count, 1);
        assert_eq!(result.cons_count, 2);
        assert_eq!(result.score, 5.0);
    }

    #[test]
    fn test_missing_section_scores_zero() {
        let doc = ResumeDocument::new(DocumentHandle::new("d"), "Jane Doe");
        let result = assess_education(&doc, 15);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.cons_count, 1);
    }
}
