use crate::config::Config;
use crate::grading::SessionManager;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub config: Config,
}
