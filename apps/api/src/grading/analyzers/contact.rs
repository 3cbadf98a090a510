use async_trait::async_trait;

use crate::grading::analyzer::{AnalyzerError, CategoryAnalyzer};
use crate::models::analysis::{CategoryId, CategoryResult, Finding};
use crate::models::document::{ResumeDocument, SectionKind};

const PROFILE_HOSTS: &[&str] = &["linkedin.com", "github.com", "gitlab.com", "behance.net"];

/// Checks the header block for the details a recruiter needs to reach the candidate.
pub struct ContactAnalyzer;

#[async_trait]
impl CategoryAnalyzer for ContactAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::Contact
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_contact(document, max_score))
    }
}

fn assess_contact(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let header = document.section_lines(SectionKind::Header);
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    match header.first() {
        Some(first) if looks_like_name(first) => {
            pros.push(Finding::new("Your name is clearly displayed at the top"));
        }
        _ => cons.push(
            Finding::new("Your name is not the first line of the résumé")
                .with_tip("Put your full name on its own line at the very top."),
        ),
    }

    if header.iter().any(|line| has_email(line)) {
        pros.push(Finding::new("Email address is present"));
    } else {
        cons.push(
            Finding::new("No email address found in the header")
                .with_tip("Add a professional email address next to your name."),
        );
    }

    if header.iter().any(|line| has_phone(line)) {
        pros.push(Finding::new("Phone number is present"));
    } else {
        cons.push(
            Finding::new("No phone number found in the header")
                .with_tip("Add a phone number, including the country code if you apply abroad."),
        );
    }

    if header.iter().any(|line| has_profile_link(line)) {
        pros.push(Finding::new("Includes an online profile link"));
    } else {
        cons.push(
            Finding::new("No LinkedIn or portfolio link")
                .with_tip("Link a LinkedIn profile, GitHub or portfolio so reviewers can learn more.")
                .with_tip("Shorten the URL, e.g. linkedin.com/in/your-name."),
        );
    }

    CategoryResult::from_findings(CategoryId::Contact, max_score, pros, cons)
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '.')))
}

fn has_email(line: &str) -> bool {
    line.split(|c: char| c.is_whitespace() || matches!(c, '|' | ',' | ';'))
        .any(|token| match token.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.ends_with('.')
            }
            None => false,
        })
}

/// A run of at least seven digits, allowing the usual separators in between.
fn has_phone(line: &str) -> bool {
    let mut digits = 0;
    for c in line.chars() {
        if c.is_ascii_digit() {
            digits += 1;
            if digits >= 7 {
                return true;
            }
        } else if !matches!(c, ' ' | '+' | '-' | '(' | ')' | '.') {
            digits = 0;
        }
    }
    false
}

fn has_profile_link(line: &str) -> bool {
    let lower = line.to_lowercase();
    PROFILE_HOSTS.iter().any(|host| lower.contains(host)) || lower.contains("http")
}
