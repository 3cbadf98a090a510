//! Fans one document out to every registered analyzer and joins the results.
//!
//! # Deadlines
//! - Each analyzer runs under `analyzer_timeout`; an overrun degrades only its category.
//! - The join as a whole runs under `session_timeout`; when it expires every category
//!   still pending is degraded and the join proceeds. Analyzers that finish on the
//!   deadline itself still count. Analyzers run in parallel, so the session deadline
//!   only needs to sit slightly above the analyzer deadline.
//!
//! # Failures
//! An analyzer error or panic degrades only that analyzer's category.
//!
//! # Cancellation
//! Cancelling the session token stops the join, aborts in-flight analyzer tasks and
//! returns `JoinOutcome::Cancelled` with no results at all.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::grading::analyzer::AnalyzerError;
use crate::grading::error::ErrorKind;
use crate::grading::registry::AnalyzerRegistry;
use crate::models::analysis::{CategoryId, CategoryResult};
use crate::models::document::ResumeDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub analyzer_timeout: Duration,
    pub session_timeout: Duration,
}

#[derive(Debug)]
pub enum JoinOutcome {
    /// One result per registered category, in registry order.
    Completed(Vec<CategoryResult>),
    Cancelled,
}

/// How a single analyzer unit ended.
enum UnitOutcome {
    Finished(CategoryResult),
    Failed(AnalyzerError),
    TimedOut,
    Stopped,
}

type AnalysisFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CategoryResult, AnalyzerError>> + Send + 'a>>;

/// Turns a panic inside an analyzer poll into an `AnalyzerError` for that analyzer.
struct CatchPanic<'a>(AnalysisFuture<'a>);

impl Future for CatchPanic<'_> {
    type Output = Result<CategoryResult, AnalyzerError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let analysis = self.0.as_mut();
        match std::panic::catch_unwind(AssertUnwindSafe(|| analysis.poll(cx))) {
            Ok(poll) => poll,
            Err(payload) => Poll::Ready(Err(AnalyzerError::Failed(format!(
                "panicked: {}",
                panic_message(payload.as_ref())
            )))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub async fn run_analyzers(
    registry: &AnalyzerRegistry,
    document: Arc<ResumeDocument>,
    deadlines: Deadlines,
    cancel: &CancellationToken,
) -> JoinOutcome {
    let session_deadline = Instant::now() + deadlines.session_timeout;
    let mut units = JoinSet::new();

    for (slot, entry) in registry.entries().iter().enumerate() {
        let analyzer = Arc::clone(&entry.analyzer);
        let document = Arc::clone(&document);
        let stop = cancel.child_token();
        let max_score = entry.max_score;
        let timeout = deadlines.analyzer_timeout;

        units.spawn(async move {
            let analysis = CatchPanic(analyzer.analyze(&document, max_score));
            let outcome = tokio::select! {
                _ = stop.cancelled() => UnitOutcome::Stopped,
                finished = tokio::time::timeout(timeout, analysis) => {
                    match finished {
                        Ok(Ok(result)) => UnitOutcome::Finished(result),
                        Ok(Err(err)) => UnitOutcome::Failed(err),
                        Err(_) => UnitOutcome::TimedOut,
                    }
                }
            };
            (slot, outcome)
        });
    }

    let mut collected: Vec<Option<CategoryResult>> = vec![None; registry.len()];
    let mut record = |joined: Result<(usize, UnitOutcome), tokio::task::JoinError>| match joined {
        Ok((slot, outcome)) => {
            let entry = &registry.entries()[slot];
            collected[slot] = settle(entry.category, entry.max_score, outcome);
        }
        // Only reachable if the unit wrapper itself dies; the slot stays empty and is
        // filled as unavailable below.
        Err(join_err) => warn!(
            code = ErrorKind::AnalyzerError.code(),
            "Analyzer task did not complete: {join_err}"
        ),
    };

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                units.abort_all();
                info!("Analysis of {} cancelled mid-join", document.handle().as_str());
                return JoinOutcome::Cancelled;
            }
            joined = units.join_next() => {
                let Some(joined) = joined else { break };
                record(joined);
            }
            _ = tokio::time::sleep_until(session_deadline) => {
                // Units that came due at the deadline get one turn to report.
                tokio::task::yield_now().await;
                while let Some(joined) = units.try_join_next() {
                    record(joined);
                }
                if !units.is_empty() {
                    warn!(
                        code = ErrorKind::SessionTimeout.code(),
                        "Session deadline of {}ms reached with {} analyzers pending",
                        deadlines.session_timeout.as_millis(),
                        units.len()
                    );
                }
                units.abort_all();
                break;
            }
        }
    }

    let results = registry
        .entries()
        .iter()
        .zip(collected)
        .map(|(entry, result)| {
            result.unwrap_or_else(|| CategoryResult::unavailable(entry.category, entry.max_score))
        })
        .collect();

    JoinOutcome::Completed(results)
}

fn settle(category: CategoryId, max_score: u32, outcome: UnitOutcome) -> Option<CategoryResult> {
    match outcome {
        UnitOutcome::Finished(result) => {
            debug!("Analyzer {category} finished");
            Some(result.normalized(category, max_score))
        }
        UnitOutcome::Failed(err) => {
            warn!(code = ErrorKind::AnalyzerError.code(), "Analyzer {category} failed: {err}");
            None
        }
        UnitOutcome::TimedOut => {
            warn!(code = ErrorKind::AnalyzerTimeout.code(), "Analyzer {category} timed out");
            None
        }
        UnitOutcome::Stopped => None,
    }
}
