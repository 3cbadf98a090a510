use std::collections::HashSet;

use async_trait::async_trait;

use crate::grading::analyzer::{AnalyzerError, CategoryAnalyzer};
use crate::models::analysis::{CategoryId, CategoryResult, Finding};
use crate::models::document::{bullet_text, ResumeDocument, SectionKind};

const MIN_SKILLS: usize = 6;
const MAX_SKILLS: usize = 30;

pub struct SkillsAnalyzer;

#[async_trait]
impl CategoryAnalyzer for SkillsAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::Skills
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_skills(document, max_score))
    }
}

fn assess_skills(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let lines = document.section_lines(SectionKind::Skills);
    if lines.is_empty() {
        return CategoryResult::from_findings(
            CategoryId::Skills,
            max_score,
            vec![],
            vec![Finding::new("No skills section found")
                .with_tip("Add a 'Skills' heading listing the tools and technologies you use.")],
        );
    }

    let mut pros = Vec::new();
    let mut cons = Vec::new();
    let items = skill_items(&lines);

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for item in &items {
        let key = item.to_lowercase();
        if !seen.insert(key.clone()) && !duplicates.contains(&key) {
            duplicates.push(key);
        }
    }
    let distinct = seen.len();

    if distinct < MIN_SKILLS {
        cons.push(
            Finding::new(format!("Only {distinct} skills listed"))
                .with_tip(format!("List at least {MIN_SKILLS} relevant skills.")),
        );
    } else if distinct > MAX_SKILLS {
        cons.push(
            Finding::new(format!("{distinct} skills listed; the list is hard to scan"))
                .with_tip("Keep the skills that match the roles you target and drop the rest."),
        );
    } else {
        pros.push(Finding::new(format!("Lists {distinct} skills")));
    }

    if lines.iter().any(|line| line.contains(':')) {
        pros.push(Finding::new("Skills are grouped into categories"));
    } else if distinct >= MIN_SKILLS {
        cons.push(
            Finding::new("Skills are not grouped")
                .with_tip("Group skills by type, e.g. 'Languages:', 'Tools:', 'Cloud:'."),
        );
    }

    for duplicate in duplicates {
        cons.push(
            Finding::new(format!("'{duplicate}' is listed more than once"))
                .with_tip("Remove repeated skills."),
        );
    }

    CategoryResult::from_findings(CategoryId::Skills, max_score, pros, cons)
}

/// Splits skill lines into individual items, dropping group labels like "Languages:".
fn skill_items(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .copied()
        .map(|line| bullet_text(line).unwrap_or(line))
        .map(|line| line.split_once(':').map_or(line, |(_, rest)| rest))
        .flat_map(|line| line.split(&[',', ';', '|', '•', '/'][..]))
        .map(|item| item.trim().trim_end_matches('.').to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
