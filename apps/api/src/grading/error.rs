use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::grading::session::SessionState;

/// Machine-readable error codes exposed on session snapshots and API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidDocument,
    InvalidWeightTable,
    AnalyzerTimeout,
    AnalyzerError,
    SessionTimeout,
    InvalidSessionState,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidDocument => "INVALID_DOCUMENT",
            ErrorKind::InvalidWeightTable => "INVALID_WEIGHT_TABLE",
            ErrorKind::AnalyzerTimeout => "ANALYZER_TIMEOUT",
            ErrorKind::AnalyzerError => "ANALYZER_ERROR",
            ErrorKind::SessionTimeout => "SESSION_TIMEOUT",
            ErrorKind::InvalidSessionState => "INVALID_SESSION_STATE",
        }
    }
}

/// Errors surfaced to callers of the grading engine.
///
/// Analyzer failures and deadline overruns are absorbed by the orchestrator and never
/// appear here.
#[derive(Debug, Error)]
pub enum GradingError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid weight table: {0}")]
    InvalidWeightTable(String),

    #[error("Session {id} is {actual:?}, expected {expected:?}")]
    InvalidSessionState {
        id: Uuid,
        expected: SessionState,
        actual: SessionState,
    },

    #[error("Session {0} not found")]
    SessionNotFound(Uuid),
}

impl GradingError {
    /// `None` for lookups of unknown sessions, which are not part of the taxonomy.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            GradingError::InvalidDocument(_) => Some(ErrorKind::InvalidDocument),
            GradingError::InvalidWeightTable(_) => Some(ErrorKind::InvalidWeightTable),
            GradingError::InvalidSessionState { .. } => Some(ErrorKind::InvalidSessionState),
            GradingError::SessionNotFound(_) => None,
        }
    }
}
