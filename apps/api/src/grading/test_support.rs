//! Scriptable analyzers and fixtures for engine tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::grading::analyzer::{AnalyzerError, CategoryAnalyzer};
use crate::grading::registry::AnalyzerRegistry;
use crate::grading::scoring::DEFAULT_WEIGHTS;
use crate::models::analysis::{CategoryId, CategoryResult, Finding};
use crate::models::document::{DocumentHandle, ResumeDocument};

#[derive(Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
}

/// Analyzer returning a fixed number of pros/cons after an optional delay.
pub struct ScriptedAnalyzer {
    category: CategoryId,
    pros: usize,
    cons: usize,
    delay: Duration,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl ScriptedAnalyzer {
    pub fn new(category: CategoryId) -> Self {
        Self {
            category,
            pros: 1,
            cons: 0,
            delay: Duration::ZERO,
            behavior: Behavior::Succeed,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn findings(mut self, pros: usize, cons: usize) -> Self {
        self.pros = pros;
        self.cons = cons;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn shared(self) -> Arc<dyn CategoryAnalyzer> {
        Arc::new(self)
    }
}

#[async_trait]
impl CategoryAnalyzer for ScriptedAnalyzer {
    fn category(&self) -> CategoryId {
        self.category
    }

    async fn analyze(
        &self,
        _document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.behavior {
            Behavior::Succeed => {}
            Behavior::Fail => return Err(AnalyzerError::Failed("scripted failure".to_string())),
            Behavior::Panic => panic!("scripted panic in {} analyzer", self.category),
        }
        let pros = (0..self.pros)
            .map(|i| Finding::new(format!("{} pro {i}", self.category)))
            .collect();
        let cons = (0..self.cons)
            .map(|i| Finding::new(format!("{} con {i}", self.category)).with_tip("tip"))
            .collect();
        Ok(CategoryResult::from_findings(
            self.category,
            max_score,
            pros,
            cons,
        ))
    }
}

/// Default six-category registry built from scripted analyzers.
pub fn scripted_registry(analyzers: Vec<ScriptedAnalyzer>) -> AnalyzerRegistry {
    analyzers
        .into_iter()
        .fold(AnalyzerRegistry::builder(), |builder, analyzer| {
            let weight = default_weight(analyzer.category);
            builder.register(analyzer.category, weight, analyzer.shared())
        })
        .build()
        .expect("scripted registry is valid")
}

/// The reference scenario: Contact 3/2, Experience 4/1, Education 3/1,
/// Skills 0/1, Summary 0/1, Format 4/0.
pub fn reference_analyzers() -> Vec<ScriptedAnalyzer> {
    vec![
        ScriptedAnalyzer::new(CategoryId::Contact).findings(3, 2),
        ScriptedAnalyzer::new(CategoryId::Experience).findings(4, 1),
        ScriptedAnalyzer::new(CategoryId::Education).findings(3, 1),
        ScriptedAnalyzer::new(CategoryId::Skills).findings(0, 1),
        ScriptedAnalyzer::new(CategoryId::Summary).findings(0, 1),
        ScriptedAnalyzer::new(CategoryId::Format).findings(4, 0),
    ]
}

pub fn sample_document() -> ResumeDocument {
    ResumeDocument::new(DocumentHandle::new("uploads/sample.pdf"), SAMPLE_RESUME)
}

fn default_weight(category: CategoryId) -> u32 {
    DEFAULT_WEIGHTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, w)| *w)
        .unwrap_or_else(|| panic!("no default weight for {category}"))
}

pub const SAMPLE_RESUME: &str = "\
Jane Doe
jane.doe@example.com | +1 (555) 123-4567 | linkedin.com/in/janedoe

Summary
Backend engineer with eight years building payment and billing platforms in Rust and Go.
Focused on reliability, observability and mentoring small teams through large migrations.

Experience
Acme Payments, Senior Engineer, 2019 - Present
- Led migration of the billing service to Rust, cutting p99 latency by 45%
- Designed an idempotent ledger API processing 2M transactions per day
- Mentored 4 engineers through promotion to senior level
Globex, Software Engineer, 2015 - 2019
- Built reconciliation jobs that saved $120k per year in manual review
- Helped with various projects across the platform team

Education
University of Somewhere, B.S. Computer Science, 2015

Skills
Languages: Rust, Go, Python, SQL
Infrastructure: Kubernetes, Terraform, PostgreSQL, Kafka
";
