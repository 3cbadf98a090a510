use async_trait::async_trait;

use crate::grading::analyzer::{AnalyzerError, CategoryAnalyzer};
use crate::grading::analyzers::lexicon::contains_phrase;
use crate::models::analysis::{CategoryId, CategoryResult, Finding};
use crate::models::document::{ResumeDocument, SectionKind};

const MIN_WORDS: usize = 25;
const MAX_WORDS: usize = 80;
const FIRST_PERSON: &[&str] = &["i", "me", "my", "i'm", "i've"];

pub struct SummaryAnalyzer;

#[async_trait]
impl CategoryAnalyzer for SummaryAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::Summary
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_summary(document, max_score))
    }
}

fn assess_summary(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let lines = document.section_lines(SectionKind::Summary);
    if lines.is_empty() {
        return CategoryResult::from_findings(
            CategoryId::Summary,
            max_score,
            vec![],
            vec![Finding::new("No professional summary found")
                .with_tip("Open with 2–4 sentences on who you are, what you do best and what you want next.")],
        )
        .with_suggested_content(suggest_summary(document));
    }

    let text = lines.join(" ");
    let words = text.split_whitespace().count();
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    if words < MIN_WORDS {
        cons.push(
            Finding::new(format!("Summary is only {words} words"))
                .with_tip("Expand to 2–4 sentences covering your focus area and a headline achievement."),
        );
    } else if words > MAX_WORDS {
        cons.push(
            Finding::new(format!("Summary runs to {words} words"))
                .with_tip(format!("Trim the summary below {MAX_WORDS} words; move detail into Experience.")),
        );
    } else {
        pros.push(Finding::new("Summary length is concise"));
    }

    if FIRST_PERSON.iter().any(|p| contains_phrase(&text, p)) {
        cons.push(
            Finding::new("Summary is written in the first person")
                .with_tip("Drop 'I' and 'my': 'Backend engineer with…' instead of 'I am a backend engineer…'."),
        );
    } else {
        pros.push(Finding::new("Written in a professional, impersonal voice"));
    }

    CategoryResult::from_findings(CategoryId::Summary, max_score, pros, cons)
}

/// Deterministic starter summary assembled from the skills section.
fn suggest_summary(document: &ResumeDocument) -> String {
    let skills: Vec<String> = document
        .section_lines(SectionKind::Skills)
        .iter()
        .map(|line| line.split_once(':').map_or(*line, |(_, rest)| rest))
        .flat_map(|line| line.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(3)
        .collect();

    if skills.is_empty() {
        "Motivated professional with hands-on experience delivering measurable results. \
         Known for ownership, clear communication and steady execution."
            .to_string()
    } else {
        format!(
            "Professional experienced in {}, with a track record of delivering measurable results. \
             Known for ownership, clear communication and steady execution.",
            join_list(&skills)
        )
    }
}

fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    }
}
