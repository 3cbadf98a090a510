use async_trait::async_trait;

use crate::grading::analyzer::{AnalyzerError, CategoryAnalyzer};
use crate::grading::analyzers::lexicon::is_quantified;
use crate::models::analysis::{CategoryId, CategoryResult, Finding};
use crate::models::document::{bullet_text, ResumeDocument, SectionKind};

const MIN_BULLETS: usize = 3;

pub struct ExperienceAnalyzer;

#[async_trait]
impl CategoryAnalyzer for ExperienceAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::Experience
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_experience(document, max_score))
    }
}

fn assess_experience(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let lines = document.section_lines(SectionKind::Experience);
    if lines.is_empty() {
        return CategoryResult::from_findings(
            CategoryId::Experience,
            max_score,
            vec![],
            vec![Finding::new("No experience section found")
                .with_tip("Add an 'Experience' heading listing your roles, most recent first.")
                .with_tip("Internships, freelance work and volunteering count too.")],
        );
    }

    let mut pros = Vec::new();
    let mut cons = Vec::new();

    let bullets: Vec<&str> = lines.iter().filter_map(|l| bullet_text(l)).collect();
    let role_lines: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| bullet_text(l).is_none())
        .collect();

    if !role_lines.is_empty() && role_lines.iter().all(|l| has_year(l)) {
        pros.push(Finding::new("Every role lists its dates"));
    } else {
        cons.push(
            Finding::new("Some roles are missing dates")
                .with_tip("Give each role a start and end year, e.g. '2019 – Present'."),
        );
    }

    if bullets.len() >= MIN_BULLETS {
        pros.push(Finding::new(format!(
            "Experience is described with {} bullet points",
            bullets.len()
        )));
    } else {
        cons.push(
            Finding::new(format!(
                "Only {} bullet points describe your experience",
                bullets.len()
            ))
            .with_tip("Describe each role with 2–5 bullet points focused on outcomes."),
        );
    }

    let quantified = bullets.iter().filter(|b| is_quantified(b)).count();
    if !bullets.is_empty() && quantified * 2 >= bullets.len() {
        pros.push(Finding::new(format!(
            "{quantified} of {} bullet points include measurable results",
            bullets.len()
        )));
    } else if !bullets.is_empty() {
        cons.push(
            Finding::new(format!(
                "Only {quantified} of {} bullet points include measurable results",
                bullets.len()
            ))
            .with_tip("Add a specific number, percentage, or time metric. If data is unavailable, append [LOW_METRICS]."),
        );
    }

    CategoryResult::from_findings(CategoryId::Experience, max_score, pros, cons)
}

/// True when the line mentions a plausible year (1950–2099) or "present".
fn has_year(line: &str) -> bool {
    if line.to_lowercase().contains("present") {
        return true;
    }
    line.split(|c: char| !c.is_ascii_digit())
        .filter(|token| token.len() == 4)
        .filter_map(|token| token.parse::<u32>().ok())
        .any(|year| (1950..=2099).contains(&year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::test_support::sample_document;
    use crate::models::document::DocumentHandle;

    #[test]
    fn test_sample_experience_is_strong() {
        let result = assess_experience(&sample_document(), 25);
        assert_eq!(result.cons_count, 0, "{:?}", result.cons);
        assert_eq!(result.pros_count, 3);
        assert_eq!(result.score, 25.0);
    }

    #[test]
    fn test_missing_section() {
        let doc = ResumeDocument::new(DocumentHandle::new("d"), "Jane Doe\nSkills\nRust");
        let result = assess_experience(&doc, 25);
        assert_eq!(result.cons_count, 1);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_undated_roles_and_thin_bullets() {
        let doc = ResumeDocument::new(
            DocumentHandle::new("d"),
            "Experience\nAcme Corp, Engineer\n- Worked on the backend",
        );
        let result = assess_experience(&doc, 25);
        assert_eq!(result.pros_count, 0);
        assert_eq!(result.cons_count, 3);
    }

    #[test]
    fn test_has_year() {
        assert!(has_year("Acme, 2019 - 2021"));
        assert!(has_year("Globex (Jan 2020 – Present)"));
        assert!(!has_year("Team of 12345 users"));
        assert!(!has_year("Acme Corp"));
    }
}
