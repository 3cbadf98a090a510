//! Category analyzer contract.
//!
//! An analyzer is a pure function of the document: same text in, same result out.
//! It must not block the executor; the orchestrator enforces a per-analyzer deadline
//! and treats an overrun as a failure of that category only.
//!
//! The registry carries analyzers as `Arc<dyn CategoryAnalyzer>`, so replacing the
//! built-in heuristics never touches the orchestrator or session code.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::analysis::{CategoryId, CategoryResult};
use crate::models::document::ResumeDocument;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analyzer failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait CategoryAnalyzer: Send + Sync {
    /// The category this analyzer reports on.
    fn category(&self) -> CategoryId;

    /// Produces the category result, scored out of `max_score`.
    ///
    /// Counts and bounds are re-derived by the orchestrator, so an analyzer only has
    /// to get the findings right.
    async fn analyze(
        &self,
        document: &ResumeDocument,
        max_score: u32,
    ) -> Result<CategoryResult, AnalyzerError>;
}
