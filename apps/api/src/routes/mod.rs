pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::grading::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_status))
        .route("/api/v1/sessions/:id/start", post(handlers::handle_start))
        .route("/api/v1/sessions/:id/wait", get(handlers::handle_wait))
        .route("/api/v1/sessions/:id/summary", get(handlers::handle_get_summary))
        .route("/api/v1/sessions/:id/cancel", post(handlers::handle_cancel))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::{Config, GradingConfig};
    use crate::grading::scoring::DEFAULT_WEIGHTS;
    use crate::grading::test_support::SAMPLE_RESUME;
    use crate::grading::{AnalyzerRegistry, SessionManager};

    fn router() -> Router {
        let grading = GradingConfig {
            weights: DEFAULT_WEIGHTS.to_vec(),
            analyzer_timeout: Duration::from_millis(500),
            session_timeout: Duration::from_millis(1_000),
            session_retention: Duration::from_secs(60),
        };
        let registry = Arc::new(AnalyzerRegistry::builtin(&grading.weights).unwrap());
        let sessions = SessionManager::new(registry, grading.deadlines());
        build_router(AppState {
            sessions,
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                grading,
            },
        })
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        router.clone().oneshot(request).await.expect("route executes")
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(router: &Router, text: &str) -> String {
        let response = send(
            router,
            "POST",
            "/api/v1/sessions",
            Some(json!({ "documentHandle": "uploads/cv.pdf", "text": text })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await["sessionId"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn health_reports_service() {
        let response = send(&router(), "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["service"], "grader");
    }

    #[tokio::test]
    async fn full_session_lifecycle() {
        let router = router();
        let id = create(&router, SAMPLE_RESUME).await;

        let status = read_json(send(&router, "GET", &format!("/api/v1/sessions/{id}"), None).await).await;
        assert_eq!(status["state"], "idle");
        assert!(status.get("result").is_none());

        let started = send(&router, "POST", &format!("/api/v1/sessions/{id}/start"), None).await;
        assert_eq!(started.status(), StatusCode::ACCEPTED);

        let waited = read_json(send(&router, "GET", &format!("/api/v1/sessions/{id}/wait"), None).await).await;
        assert_eq!(waited["state"], "results");
        assert_eq!(waited["result"]["categories"].as_array().unwrap().len(), 6);
        assert!(waited["endedAt"].is_string());

        let summary = send(&router, "GET", &format!("/api/v1/sessions/{id}/summary"), None).await;
        assert_eq!(summary.status(), StatusCode::OK);
        let summary = read_json(summary).await;
        assert_eq!(summary["overallScore"], waited["result"]["overallScore"]);
        assert_eq!(summary["categories"][0]["category"], "contact");
    }

    #[tokio::test]
    async fn second_start_conflicts() {
        let router = router();
        let id = create(&router, SAMPLE_RESUME).await;
        send(&router, "POST", &format!("/api/v1/sessions/{id}/start"), None).await;

        let again = send(&router, "POST", &format!("/api/v1/sessions/{id}/start"), None).await;
        assert_eq!(again.status(), StatusCode::CONFLICT);
        assert_eq!(read_json(again).await["error"]["code"], "INVALID_SESSION_STATE");
    }

    #[tokio::test]
    async fn summary_requires_results() {
        let router = router();
        let id = create(&router, SAMPLE_RESUME).await;
        let response = send(&router, "GET", &format!("/api/v1/sessions/{id}/summary"), None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let response = send(
            &router(),
            "POST",
            "/api/v1/sessions",
            Some(json!({ "documentHandle": "uploads/cv.pdf", "text": "   " })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "INVALID_DOCUMENT");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let response = send(
            &router(),
            "POST",
            "/api/v1/sessions",
            Some(json!({ "documentHandle": "uploads/cv.pdf" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let id = Uuid::new_v4();
        let router = router();
        for (method, uri) in [
            ("GET", format!("/api/v1/sessions/{id}")),
            ("POST", format!("/api/v1/sessions/{id}/start")),
            ("POST", format!("/api/v1/sessions/{id}/cancel")),
            ("GET", format!("/api/v1/sessions/{id}/wait")),
        ] {
            let response = send(&router, method, &uri, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn cancel_idle_session() {
        let router = router();
        let id = create(&router, SAMPLE_RESUME).await;

        let response = send(&router, "POST", &format!("/api/v1/sessions/{id}/cancel"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let status = read_json(send(&router, "GET", &format!("/api/v1/sessions/{id}"), None).await).await;
        assert_eq!(status["state"], "cancelled");

        let start = send(&router, "POST", &format!("/api/v1/sessions/{id}/start"), None).await;
        assert_eq!(start.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn garbled_document_fails_session() {
        let router = router();
        let id = create(&router, "Jane\u{0}\u{1}Doe").await;
        send(&router, "POST", &format!("/api/v1/sessions/{id}/start"), None).await;

        let status = read_json(send(&router, "GET", &format!("/api/v1/sessions/{id}/wait"), None).await).await;
        assert_eq!(status["state"], "failed");
        assert_eq!(status["error"], "invalid_document");
    }
}
