//! HTTP route handlers for the DSCPL guide API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::guide::core::errors::AssistantError;
use crate::guide::session::event::SessionEvent;
use crate::guide::session::machine::DispatchOutcome;
use crate::guide::session::snapshot::{SessionSnapshot, render_snapshot};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/session", get(current_session))
        .route("/api/session/events", post(session_event))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "dscpl-guide",
        "version": env!("CARGO_PKG_VERSION"),
        "passages": state.context.index().len(),
    }))
}

/// Response to an applied event.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// What the event produced.
    pub outcome: DispatchOutcome,
    /// Session view after the event.
    pub snapshot: SessionSnapshot,
}

/// Map a guide error to an HTTP status and message.
fn error_response(err: &AssistantError) -> (StatusCode, String) {
    let status = if err.is_recoverable() {
        StatusCode::BAD_GATEWAY
    } else {
        match err {
            AssistantError::InvalidTransition { .. } | AssistantError::InvalidCategory(_) => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    };
    warn!("Request failed with {status}: {err}");
    (status, err.to_string())
}

/// Render the current session, generating program content if it is due.
async fn current_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionSnapshot>, (StatusCode, String)> {
    let mut session = state.session.lock().await;
    let snapshot = state
        .machine
        .render(&mut session)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(snapshot))
}

/// Apply one event and return the resulting view.
///
/// The snapshot is a pure projection; program content is generated by the
/// next `GET /api/session`, so a committed event is never reported as failed.
async fn session_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<SessionEvent>,
) -> Result<Json<EventResponse>, (StatusCode, String)> {
    let mut session = state.session.lock().await;
    let outcome = state
        .machine
        .dispatch(&mut session, event)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(EventResponse {
        outcome,
        snapshot: render_snapshot(&session),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::guide::core::config::AssistantConfig;
    use crate::guide::corpus::chunker::ChunkerSettings;
    use crate::guide::corpus::index::CorpusIndex;
    use crate::guide::engine::context::AssistantContext;
    use crate::guide::testing::{FakeEmbedder, FakeGenerator};

    async fn app(generator: FakeGenerator) -> Router {
        let embedder = Arc::new(FakeEmbedder::default());
        let settings = ChunkerSettings {
            chunk_size: 80,
            overlap: 10,
        };
        let index = CorpusIndex::build(
            "Peace I leave with you, my peace I give unto you.",
            settings,
            embedder.as_ref(),
            8,
        )
        .await
        .unwrap();
        let context = AssistantContext::new(
            AssistantConfig::default(),
            Arc::new(index),
            embedder,
            Arc::new(generator),
        );
        create_router(AppState::new(context))
    }

    async fn get_session(app: &Router) -> (StatusCode, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(Request::get("/api/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn post_event(app: &Router, body: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(
                Request::post("/api/session/events")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health_reports_passages() {
        let app = app(FakeGenerator::echo()).await;
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value =
            serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap())
                .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["passages"], 1);
    }

    #[tokio::test]
    async fn test_initial_session_snapshot() {
        let app = app(FakeGenerator::echo()).await;
        let (status, body) = get_session(&app).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["stage"], "initial_selection");
        assert_eq!(body["header"], "What do you need today?");
    }

    #[tokio::test]
    async fn test_event_flow_and_conflict() {
        let app = app(FakeGenerator::replying("Scripture: John 14:27")).await;

        let (status, body) =
            post_event(&app, r#"{"type":"select_category","value":"Devotion"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["snapshot"]["stage"], "topic_selection");

        let (status, _) = post_event(&app, r#"{"type":"sos"}"#).await;
        assert_eq!(status, StatusCode::CONFLICT);

        post_event(&app, r#"{"type":"select_topic","value":"Peace"}"#).await;
        let (status, body) = post_event(&app, r#"{"type":"confirm"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["outcome"]["kind"], "moved");
        assert_eq!(body["snapshot"]["stage"], "program_delivery");
        assert!(body["snapshot"]["pending_content"].is_null());

        let (status, body) = get_session(&app).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["pending_content"], "Scripture: John 14:27");
    }

    #[tokio::test]
    async fn test_confirm_succeeds_when_content_generation_fails() {
        let app = app(FakeGenerator::failing()).await;
        post_event(&app, r#"{"type":"select_category","value":"Accountability"}"#).await;
        post_event(&app, r#"{"type":"select_topic","value":"Anger"}"#).await;

        let (status, body) = post_event(&app, r#"{"type":"confirm"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["snapshot"]["stage"], "program_delivery");

        let (status, _) = get_session(&app).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, body) = post_event(&app, r#"{"type":"sos"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["outcome"]["kind"], "alert");
        assert_eq!(body["snapshot"]["stage"], "program_delivery");
    }

    #[tokio::test]
    async fn test_provider_failure_is_bad_gateway() {
        let app = app(FakeGenerator::failing()).await;
        post_event(&app, r#"{"type":"select_category","value":"Chat"}"#).await;
        let (status, _) =
            post_event(&app, r#"{"type":"submit_message","value":"Pray for me"}"#).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
