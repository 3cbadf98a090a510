// Grading engine: independent category analyzers, a registry that owns their
// weights, a concurrent orchestrator that tolerates per-analyzer failure, and the
// session state machine callers observe.
// Analyzers never see each other's output; the orchestrator join is the only barrier.

pub mod analyzer;
pub mod analyzers;
pub mod error;
pub mod feedback;
pub mod handlers;
pub mod orchestrator;
pub mod registry;
pub mod scoring;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ErrorKind, GradingError};
pub use orchestrator::Deadlines;
pub use registry::AnalyzerRegistry;
pub use session::SessionManager;
