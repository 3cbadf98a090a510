use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::grading::feedback::ScoreSummary;
use crate::grading::session::{AnalysisSession, SessionState};
use crate::models::document::DocumentHandle;
use crate::state::AppState;

/// Slack on top of the session deadline for the final transition to be published.
const WAIT_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub document_handle: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let session_id = state
        .sessions
        .create_session(DocumentHandle::new(req.document_handle), req.text)?;
    Ok((StatusCode::CREATED, Json(CreateSessionResponse { session_id })))
}

/// POST /api/v1/sessions/:id/start
pub async fn handle_start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.start(id)?;
    Ok(StatusCode::ACCEPTED)
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisSession>, AppError> {
    Ok(Json(state.sessions.status(id)?))
}

/// GET /api/v1/sessions/:id/wait
pub async fn handle_wait(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisSession>, AppError> {
    let limit = state.config.grading.session_timeout + WAIT_GRACE;
    match tokio::time::timeout(limit, state.sessions.wait(id)).await {
        Ok(session) => Ok(Json(session?)),
        // Still running past the grace window; hand back whatever is current.
        Err(_) => Ok(Json(state.sessions.status(id)?)),
    }
}

/// GET /api/v1/sessions/:id/summary
pub async fn handle_get_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScoreSummary>, AppError> {
    let session = state.sessions.status(id)?;
    match (&session.state, &session.result) {
        (SessionState::Results, Some(analysis)) => Ok(Json(ScoreSummary::from_analysis(analysis))),
        _ => Err(AppError::InvalidSessionState(format!(
            "Session {id} is {:?}, no results to summarize",
            session.state
        ))),
    }
}

/// POST /api/v1/sessions/:id/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.cancel(id)?;
    Ok(StatusCode::NO_CONTENT)
}
