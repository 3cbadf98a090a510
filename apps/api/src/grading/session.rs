//! Session state machine: one analysis request from submission to a terminal state.
//!
//! `Idle -> Running -> {Results, Failed, Cancelled}`. A session leaves `Running`
//! exactly once; terminal records are never mutated again. Callers only hold the
//! session id and read cloned snapshots.
//!
//! `Failed` is reserved for problems found before any analyzer runs (bad document,
//! bad weight table). Analyzer failures degrade single categories inside `Results`.
//!
//! Records are kept only for a retention window: terminal sessions are purged once
//! they have been finished for longer than it, and so are sessions that were never
//! started. Running sessions are never purged.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::grading::error::{ErrorKind, GradingError};
use crate::grading::orchestrator::{run_analyzers, Deadlines, JoinOutcome};
use crate::grading::registry::AnalyzerRegistry;
use crate::grading::scoring::build_analysis;
use crate::models::analysis::ResumeAnalysis;
use crate::models::document::{DocumentHandle, ResumeDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    Results,
    Failed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Results | SessionState::Failed | SessionState::Cancelled
        )
    }
}

/// How a session ends.
#[derive(Debug)]
pub enum Termination {
    Results(ResumeAnalysis),
    Failed(ErrorKind),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSession {
    pub id: Uuid,
    pub document_handle: DocumentHandle,
    pub state: SessionState,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResumeAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl AnalysisSession {
    fn new(document_handle: DocumentHandle, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_handle,
            state: SessionState::Idle,
            started_at: now,
            ended_at: None,
            result: None,
            error: None,
        }
    }

    fn begin(&mut self) -> Result<(), GradingError> {
        if self.state != SessionState::Idle {
            return Err(GradingError::InvalidSessionState {
                id: self.id,
                expected: SessionState::Idle,
                actual: self.state,
            });
        }
        self.state = SessionState::Running;
        Ok(())
    }

    /// Applies a terminal transition. Returns `false` when the session is already
    /// terminal or the transition is not allowed from its current state; only
    /// cancellation may end an `Idle` session.
    fn finish(&mut self, termination: Termination, now: DateTime<Utc>) -> bool {
        let allowed = match (&self.state, &termination) {
            (SessionState::Running, _) => true,
            (SessionState::Idle, Termination::Cancelled) => true,
            _ => false,
        };
        if !allowed {
            return false;
        }
        match termination {
            Termination::Results(analysis) => {
                self.state = SessionState::Results;
                self.result = Some(analysis);
            }
            Termination::Failed(kind) => {
                self.state = SessionState::Failed;
                self.error = Some(kind);
            }
            Termination::Cancelled => self.state = SessionState::Cancelled,
        }
        self.ended_at = Some(now);
        true
    }
}

const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(100);

struct SessionEntry {
    session: AnalysisSession,
    document: Arc<ResumeDocument>,
    cancel: CancellationToken,
    state_tx: watch::Sender<SessionState>,
    created: Instant,
    finished: Option<Instant>,
}

impl SessionEntry {
    fn expired(&self, retention: Duration) -> bool {
        match (self.session.state, self.finished) {
            (SessionState::Idle, _) => self.created.elapsed() >= retention,
            (_, Some(finished)) => finished.elapsed() >= retention,
            _ => false,
        }
    }
}

struct Inner {
    registry: Arc<AnalyzerRegistry>,
    deadlines: Deadlines,
    sessions: DashMap<Uuid, SessionEntry>,
}

/// Owns every session record and is the only code that mutates one.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    pub fn new(registry: Arc<AnalyzerRegistry>, deadlines: Deadlines) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry,
                deadlines,
                sessions: DashMap::new(),
            }),
        }
    }

    /// Registers a new `Idle` session. Only blank handles or blank text are rejected
    /// here; deeper document checks belong to the intake layer.
    pub fn create_session(
        &self,
        handle: DocumentHandle,
        text: impl Into<String>,
    ) -> Result<Uuid, GradingError> {
        let text = text.into();
        if handle.is_blank() {
            return Err(GradingError::InvalidDocument(
                "document handle is empty".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(GradingError::InvalidDocument(format!(
                "document {} has no extracted text",
                handle.as_str()
            )));
        }

        let session = AnalysisSession::new(handle.clone(), Utc::now());
        let id = session.id;
        let (state_tx, _) = watch::channel(SessionState::Idle);
        self.inner.sessions.insert(
            id,
            SessionEntry {
                session,
                document: Arc::new(ResumeDocument::new(handle, text)),
                cancel: CancellationToken::new(),
                state_tx,
                created: Instant::now(),
                finished: None,
            },
        );
        info!("Created session {id}");
        Ok(id)
    }

    /// Moves an `Idle` session to `Running` and launches the orchestrator in the
    /// background. Must be called from within a Tokio runtime.
    pub fn start(&self, id: Uuid) -> Result<(), GradingError> {
        let (document, cancel) = {
            let mut entry = self
                .inner
                .sessions
                .get_mut(&id)
                .ok_or(GradingError::SessionNotFound(id))?;
            entry.session.begin()?;
            entry.state_tx.send_replace(SessionState::Running);
            (Arc::clone(&entry.document), entry.cancel.clone())
        };
        info!(
            "Session {id} running {} analyzers on {}",
            self.inner.registry.len(),
            document.handle().as_str()
        );

        if let Err(err) = self.preflight(&document) {
            warn!("Session {id} failed before analysis: {err}");
            let kind = err.kind().unwrap_or(ErrorKind::InvalidDocument);
            self.transition(id, Termination::Failed(kind));
            return Ok(());
        }

        let manager = self.clone();
        tokio::spawn(async move {
            manager.run(id, document, cancel).await;
        });
        Ok(())
    }

    /// Read-only snapshot of the session.
    pub fn status(&self, id: Uuid) -> Result<AnalysisSession, GradingError> {
        self.inner
            .sessions
            .get(&id)
            .map(|entry| entry.session.clone())
            .ok_or(GradingError::SessionNotFound(id))
    }

    /// Cancels a session that has not finished. No-op on terminal sessions.
    pub fn cancel(&self, id: Uuid) -> Result<(), GradingError> {
        let token = {
            let entry = self
                .inner
                .sessions
                .get(&id)
                .ok_or(GradingError::SessionNotFound(id))?;
            if entry.session.state.is_terminal() {
                return Ok(());
            }
            entry.cancel.clone()
        };
        // Mark terminal before signalling so a late join can never publish results.
        if self.transition(id, Termination::Cancelled) {
            info!("Session {id} cancelled");
        }
        token.cancel();
        Ok(())
    }

    /// Resolves once the session is no longer `Running` and returns its snapshot.
    /// An `Idle` session resolves immediately.
    pub async fn wait(&self, id: Uuid) -> Result<AnalysisSession, GradingError> {
        let mut state_rx = self
            .inner
            .sessions
            .get(&id)
            .map(|entry| entry.state_tx.subscribe())
            .ok_or(GradingError::SessionNotFound(id))?;
        // Sender lives as long as the session entry; an error means it is gone.
        let _ = state_rx
            .wait_for(|state| *state != SessionState::Running)
            .await;
        self.status(id)
    }

    /// Drops sessions past the retention window and returns how many went.
    pub fn purge_expired(&self, retention: Duration) -> usize {
        let mut purged = 0;
        self.inner.sessions.retain(|_, entry| {
            let keep = !entry.expired(retention);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    /// Sweeps expired sessions in the background until the manager is dropped.
    pub fn spawn_reaper(&self, retention: Duration) -> JoinHandle<()> {
        let inner = Arc::downgrade(&self.inner);
        let period = (retention / 4).max(MIN_SWEEP_PERIOD);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(inner) = inner.upgrade() else { break };
                let purged = SessionManager { inner }.purge_expired(retention);
                if purged > 0 {
                    debug!("Purged {purged} expired sessions");
                }
            }
        })
    }

    fn preflight(&self, document: &ResumeDocument) -> Result<(), GradingError> {
        self.inner.registry.weight_table().validate()?;
        if let Some(defect) = document.extraction_defect() {
            return Err(GradingError::InvalidDocument(defect));
        }
        Ok(())
    }

    async fn run(&self, id: Uuid, document: Arc<ResumeDocument>, cancel: CancellationToken) {
        let registry = &self.inner.registry;
        match run_analyzers(registry, document, self.inner.deadlines, &cancel).await {
            JoinOutcome::Completed(categories) => {
                let analysis = build_analysis(categories, registry.weight_table(), Utc::now());
                let overall = analysis.overall_score;
                if self.transition(id, Termination::Results(analysis)) {
                    info!("Session {id} completed with overall score {overall}/100");
                }
            }
            JoinOutcome::Cancelled => {
                self.transition(id, Termination::Cancelled);
            }
        }
    }

    fn transition(&self, id: Uuid, termination: Termination) -> bool {
        let Some(mut entry) = self.inner.sessions.get_mut(&id) else {
            return false;
        };
        let changed = entry.session.finish(termination, Utc::now());
        if changed {
            entry.finished = Some(Instant::now());
            let state = entry.session.state;
            entry.state_tx.send_replace(state);
        }
        changed
    }
}
