use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::grading::{ErrorKind, GradingError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Conflict: {0}")]
    InvalidSessionState(String),

    #[error("Invalid weight table: {0}")]
    InvalidWeightTable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GradingError> for AppError {
    fn from(err: GradingError) -> Self {
        let message = err.to_string();
        match err {
            GradingError::SessionNotFound(_) => AppError::NotFound(message),
            GradingError::InvalidDocument(_) => AppError::InvalidDocument(message),
            GradingError::InvalidSessionState { .. } => AppError::InvalidSessionState(message),
            GradingError::InvalidWeightTable(_) => AppError::InvalidWeightTable(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidDocument(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorKind::InvalidDocument.code(),
                msg.clone(),
            ),
            AppError::InvalidSessionState(msg) => (
                StatusCode::CONFLICT,
                ErrorKind::InvalidSessionState.code(),
                msg.clone(),
            ),
            AppError::InvalidWeightTable(msg) => {
                tracing::error!("Weight table misconfigured: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorKind::InvalidWeightTable.code(),
                    "The grading configuration is invalid".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
