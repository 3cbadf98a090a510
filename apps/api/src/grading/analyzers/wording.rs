//! Bullet-level wording analyzers: action verbs, quantified specifics, repeated
//! verbs, and clichés. All of them read only the bullet points and the raw text.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::grading::analyzer::{AnalyzerError, CategoryAnalyzer};
use crate::grading::analyzers::lexicon::{
    alternatives_for, contains_phrase, first_match, is_quantified, leading_word, truncate,
    BUZZWORDS, STRONG_VERBS, VAGUE_SCALE_WORDS, VAGUE_VERBS, WEAK_OPENERS,
};
use crate::models::analysis::{CategoryId, CategoryResult, Finding};
use crate::models::document::ResumeDocument;

const QUOTE_CHARS: usize = 60;
const MAX_VERB_REPEATS: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Action oriented
// ────────────────────────────────────────────────────────────────────────────

pub struct ActionOrientedAnalyzer;

#[async_trait]
impl CategoryAnalyzer for ActionOrientedAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::ActionOriented
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_action_oriented(document, max_score))
    }
}

fn assess_action_oriented(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    for bullet in document.bullets() {
        let quote = truncate(bullet, QUOTE_CHARS);
        let lower = bullet.to_lowercase();
        if let Some(opener) = WEAK_OPENERS.iter().find(|o| lower.starts_with(*o)) {
            cons.push(
                Finding::new(format!("\"{quote}\" opens with \"{opener}\""))
                    .with_tip("Lead with what you did, e.g. 'Built…', 'Reduced…', 'Launched…'."),
            );
            continue;
        }
        match leading_word(bullet) {
            Some(verb) if is_action_verb(&verb) => {
                pros.push(Finding::new(format!("\"{quote}\" starts with \"{verb}\"")));
            }
            _ => cons.push(
                Finding::new(format!("\"{quote}\" does not start with an action verb"))
                    .with_tip("Start every bullet with a past-tense action verb."),
            ),
        }
    }

    CategoryResult::from_findings(CategoryId::ActionOriented, max_score, pros, cons)
}

fn is_action_verb(word: &str) -> bool {
    if VAGUE_VERBS.contains(&word) {
        return false;
    }
    STRONG_VERBS.contains(&word) || (word.len() > 4 && word.ends_with("ed"))
}

// ────────────────────────────────────────────────────────────────────────────
// Specifics
// ────────────────────────────────────────────────────────────────────────────

pub struct SpecificsAnalyzer;

#[async_trait]
impl CategoryAnalyzer for SpecificsAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::Specifics
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_specifics(document, max_score))
    }
}

fn assess_specifics(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    for bullet in document.bullets() {
        let quote = truncate(bullet, QUOTE_CHARS);
        if is_quantified(bullet) {
            pros.push(Finding::new(format!("\"{quote}\" quantifies its impact")));
        } else {
            cons.push(unquantified_finding(bullet, &quote));
        }
    }

    CategoryResult::from_findings(CategoryId::Specifics, max_score, pros, cons)
}

fn unquantified_finding(bullet: &str, quote: &str) -> Finding {
    if let Some(vague) = first_match(bullet, VAGUE_VERBS) {
        return Finding::new(format!(
            "\"{quote}\" uses the vague verb '{vague}' without a measurable result"
        ))
        .with_tip(format!(
            "Quantify '{vague}': how much? Add a number, percentage, or time saved."
        ));
    }
    if let Some(scale) = first_match(bullet, VAGUE_SCALE_WORDS) {
        return Finding::new(format!("\"{quote}\" says '{scale}' without a number"))
            .with_tip(format!(
                "Replace '{scale}' with a specific number: e.g., '5x', '40%', '3 weeks'."
            ));
    }
    Finding::new(format!("\"{quote}\" has no measurable outcome"))
        .with_tip("Add a metric (number, %, time), or append [LOW_METRICS] if none exists.")
}

// ────────────────────────────────────────────────────────────────────────────
// Overusage
// ────────────────────────────────────────────────────────────────────────────

pub struct OverusageAnalyzer;

#[async_trait]
impl CategoryAnalyzer for OverusageAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::Overusage
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_overusage(document, max_score))
    }
}

fn assess_overusage(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let bullets = document.bullets();
    let mut openers: BTreeMap<String, usize> = BTreeMap::new();
    for word in bullets.iter().filter_map(|b| leading_word(b)) {
        *openers.entry(word).or_default() += 1;
    }

    let mut pros = Vec::new();
    let mut cons = Vec::new();

    for (verb, count) in openers.iter().filter(|(_, n)| **n > MAX_VERB_REPEATS) {
        let mut finding = Finding::new(format!("\"{verb}\" starts {count} bullet points"));
        finding = match alternatives_for(verb) {
            Some(alts) => finding.with_tip(format!("Vary your verbs: try {}.", alts.join(", "))),
            None => finding.with_tip("Vary the verbs that open your bullet points."),
        };
        cons.push(finding);
    }

    if cons.is_empty() && !bullets.is_empty() {
        pros.push(Finding::new(format!(
            "{} different verbs open your {} bullet points",
            openers.len(),
            bullets.len()
        )));
    }

    CategoryResult::from_findings(CategoryId::Overusage, max_score, pros, cons)
}

// ────────────────────────────────────────────────────────────────────────────
// Avoided words
// ────────────────────────────────────────────────────────────────────────────

pub struct AvoidedWordsAnalyzer;

#[async_trait]
impl CategoryAnalyzer for AvoidedWordsAnalyzer {
    fn category(&self) -> CategoryId {
        CategoryId::AvoidedWords
    }

    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        Ok(assess_avoided_words(document, max_score))
    }
}

fn assess_avoided_words(document: &ResumeDocument, max_score: u32) -> CategoryResult {
    let text = document.text();
    let mut cons = Vec::new();

    for word in BUZZWORDS.iter().filter(|w| contains_phrase(text, w)) {
        cons.push(
            Finding::new(format!("Avoid the cliché \"{word}\""))
                .with_tip("Show the trait through an achievement instead of claiming it."),
        );
    }
    for word in VAGUE_SCALE_WORDS.iter().filter(|w| contains_phrase(text, w)) {
        cons.push(
            Finding::new(format!("Avoid the filler word \"{word}\""))
                .with_tip(format!("Replace '{word}' with a concrete number or drop it.")),
        );
    }

    let pros = if cons.is_empty() {
        vec![Finding::new("No clichés or filler words found")]
    } else {
        Vec::new()
    };

    CategoryResult::from_findings(CategoryId::AvoidedWords, max_score, pros, cons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::test_support::sample_document;
    use crate::models::document::DocumentHandle;

    fn doc(text: &str) -> ResumeDocument {
        ResumeDocument::new(DocumentHandle::new("d"), text)
    }

    #[test]
    fn test_action_oriented_sample() {
        let result = assess_action_oriented(&sample_document(), 30);
        // "Helped with various projects" is the only weak opener.
        assert_eq!(result.pros_count, 4);
        assert_eq!(result.cons_count, 1);
        assert!(result.cons[0].text.contains("opens with \"helped\""));
        assert_eq!(result.score, 24.0);
    }

    #[test]
    fn test_action_oriented_flags_nouns_and_duties() {
        let result = assess_action_oriented(
            &doc("Experience\n- Responsible for the API\n- Team lead for 3 people\n- Automated deploys"),
            10,
        );
        assert_eq!(result.pros_count, 1);
        assert_eq!(result.cons_count, 2);
    }

    #[test]
    fn test_no_bullets_is_neutral() {
        let result = assess_action_oriented(&doc("Jane Doe\nSummary\nEngineer"), 10);
        assert_eq!(result.pros_count + result.cons_count, 0);
        assert_eq!(result.score, 5.0);
    }

    #[test]
    fn test_specifics_sample() {
        let result = assess_specifics(&sample_document(), 30);
        assert_eq!(result.pros_count, 4);
        assert_eq!(result.cons_count, 1);
        assert!(result.cons[0].text.contains("vague verb 'helped'"));
    }

    #[test]
    fn test_specifics_vague_scale_word() {
        let result = assess_specifics(&doc("Experience\n- Led major improvements to the codebase"), 10);
        assert_eq!(result.cons_count, 1);
        assert!(result.cons[0].text.contains("says 'major'"));
        assert!(result.cons[0].tips[0].contains("specific number"));
    }

    #[test]
    fn test_specifics_generic_gap() {
        let result = assess_specifics(&doc("Experience\n- Architected the authentication system"), 10);
        assert!(result.cons[0].text.contains("no measurable outcome"));
    }

    #[test]
    fn test_overusage_flags_repeated_openers() {
        let result = assess_overusage(
            &doc("Experience\n- Led A\n- Led B\n- Led C\n- Built D"),
            20,
        );
        assert_eq!(result.cons_count, 1);
        assert_eq!(result.cons[0].text, "\"led\" starts 3 bullet points");
        assert!(result.cons[0].tips[0].contains("directed"));
        assert_eq!(result.pros_count, 0);
    }

    #[test]
    fn test_overusage_sample_is_varied() {
        let result = assess_overusage(&sample_document(), 20);
        assert_eq!(result.cons_count, 0);
        assert_eq!(result.pros_count, 1);
    }

    #[test]
    fn test_avoided_words() {
        let result = assess_avoided_words(
            &doc("Summary\nHard-working team player with great energy"),
            20,
        );
        let cons: Vec<_> = result.cons.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            cons,
            vec![
                "Avoid the cliché \"team player\"",
                "Avoid the cliché \"hard-working\"",
                "Avoid the filler word \"great\"",
            ]
        );
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_avoided_words_clean_text() {
        let result = assess_avoided_words(&doc("Experience\n- Shipped 3 releases"), 20);
        assert_eq!(result.pros_count, 1);
        assert_eq!(result.score, 20.0);
    }
}
