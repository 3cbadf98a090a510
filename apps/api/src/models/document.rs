//! Résumé document as handed over by the intake layer: an opaque handle plus the
//! text extracted from it, split into sections by recognized headings.

use serde::{Deserialize, Serialize};

/// Opaque reference to the uploaded document. The engine never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentHandle(String);

impl DocumentHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Everything above the first heading: name, email, phone, links.
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: Option<String>,
    /// Trimmed, non-empty lines.
    pub lines: Vec<String>,
}

const BULLET_MARKERS: &[char] = &['-', '*', '•', '▪', '◦', '‣', '–', '·'];

const HEADINGS: &[(&str, SectionKind)] = &[
    ("contact", SectionKind::Header),
    ("contact information", SectionKind::Header),
    ("contact details", SectionKind::Header),
    ("summary", SectionKind::Summary),
    ("professional summary", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("professional profile", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("career objective", SectionKind::Summary),
    ("about", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("experience", SectionKind::Experience),
    ("experiences", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("education", SectionKind::Education),
    ("academic background", SectionKind::Education),
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("competencies", SectionKind::Skills),
    ("projects", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("certifications", SectionKind::Other),
    ("awards", SectionKind::Other),
    ("publications", SectionKind::Other),
    ("languages", SectionKind::Other),
    ("interests", SectionKind::Other),
    ("volunteering", SectionKind::Other),
    ("volunteer experience", SectionKind::Other),
];

/// Read-only résumé content shared by every analyzer of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    handle: DocumentHandle,
    text: String,
    sections: Vec<Section>,
}

impl ResumeDocument {
    pub fn new(handle: DocumentHandle, text: impl Into<String>) -> Self {
        let text = text.into();
        let sections = split_sections(&text);
        Self {
            handle,
            text,
            sections,
        }
    }

    pub fn handle(&self) -> &DocumentHandle {
        &self.handle
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Lines of every section of the given kind, in document order.
    pub fn section_lines(&self, kind: SectionKind) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.kind == kind)
            .flat_map(|s| s.lines.iter().map(String::as_str))
            .collect()
    }

    /// Headed sections, i.e. everything except the header block.
    pub fn heading_count(&self) -> usize {
        self.sections.iter().filter(|s| s.heading.is_some()).count()
    }

    /// Bullet points under experience and project headings, marker stripped.
    pub fn bullets(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| matches!(s.kind, SectionKind::Experience | SectionKind::Projects))
            .flat_map(|s| s.lines.iter())
            .filter_map(|line| bullet_text(line))
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Describes what is wrong with text that came out of a failed extraction.
    pub fn extraction_defect(&self) -> Option<String> {
        let garbage = self
            .text
            .chars()
            .filter(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
            .count();
        if garbage > 0 {
            return Some(format!(
                "extracted text contains {garbage} control characters"
            ));
        }
        if !self.text.chars().any(char::is_alphabetic) {
            return Some("extracted text contains no readable words".to_string());
        }
        None
    }
}

/// Returns the bullet marker a line starts with, if any.
pub fn bullet_marker(line: &str) -> Option<char> {
    let first = line.trim_start().chars().next()?;
    BULLET_MARKERS.contains(&first).then_some(first)
}

/// Strips a leading bullet marker; `None` when the line is not a bullet.
pub fn bullet_text(line: &str) -> Option<&str> {
    let marker = bullet_marker(line)?;
    let text = line.trim_start().strip_prefix(marker)?.trim();
    (!text.is_empty()).then_some(text)
}

fn classify_heading(line: &str) -> Option<SectionKind> {
    let candidate = line.trim().trim_end_matches(':').trim().to_lowercase();
    if candidate.is_empty() || candidate.len() > 40 {
        return None;
    }
    HEADINGS
        .iter()
        .find(|(heading, _)| *heading == candidate)
        .map(|(_, kind)| *kind)
}

fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        kind: SectionKind::Header,
        heading: None,
        lines: Vec::new(),
    };

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(kind) = classify_heading(line) {
            let finished = std::mem::replace(
                &mut current,
                Section {
                    kind,
                    heading: Some(line.trim_end_matches(':').trim().to_string()),
                    lines: Vec::new(),
                },
            );
            if finished.heading.is_some() || !finished.lines.is_empty() {
                sections.push(finished);
            }
        } else {
            current.lines.push(line.to_string());
        }
    }

    if current.heading.is_some() || !current.lines.is_empty() {
        sections.push(current);
    }
    sections
}
