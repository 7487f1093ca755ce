//! HTTP surface for the presentation layer.
//!
//! The UI polls status and insights on its own timer; these routes are
//! that polling contract plus start/stop control. Start is idempotent,
//! so both control routes always answer 200.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::insights::model::Insight;
use crate::orchestrator::Orchestrator;
use crate::profile::UserProfile;
use crate::status::StatusSnapshot;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    pilot: Arc<Orchestrator>,
}

/// Build the Axum router for the autopilot surface.
pub fn autopilot_routes(pilot: Arc<Orchestrator>) -> Router {
    let state = AppState { pilot };

    Router::new()
        .route("/health", get(health))
        .route("/api/autopilot/status", get(status))
        .route("/api/autopilot/insights", get(insights))
        .route("/api/autopilot/start", post(start))
        .route("/api/autopilot/stop", post(stop))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "career-pilot",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.pilot.status().await)
}

#[derive(Debug, Deserialize)]
struct InsightParams {
    limit: Option<usize>,
}

async fn insights(
    State(state): State<AppState>,
    Query(params): Query<InsightParams>,
) -> Json<Vec<Insight>> {
    Json(state.pilot.recent_insights(params.limit).await)
}

async fn start(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Json<serde_json::Value> {
    info!("Autopilot start requested");
    state.pilot.start(profile).await;
    Json(serde_json::json!({ "running": true }))
}

async fn stop(State(state): State<AppState>) -> Json<serde_json::Value> {
    info!("Autopilot stop requested");
    state.pilot.stop().await;
    Json(serde_json::json!({ "running": false }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    use crate::config::PilotConfig;
    use crate::workers::WorkerRegistry;

    fn app() -> (Arc<Orchestrator>, Router) {
        let config = PilotConfig {
            cycle_interval: Duration::from_secs(3600),
            stagger: Duration::ZERO,
            worker_latency: Duration::ZERO,
            ..Default::default()
        };
        let pilot = Arc::new(Orchestrator::new(
            config,
            Arc::new(WorkerRegistry::with_defaults(Duration::ZERO)),
        ));
        let router = autopilot_routes(Arc::clone(&pilot));
        (pilot, router)
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let (_pilot, router) = app();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["service"], "career-pilot");
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn status_reflects_seeded_tasks() {
        let (pilot, router) = app();
        pilot.start(UserProfile::default()).await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/autopilot/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let status: StatusSnapshot = serde_json::from_slice(&body).unwrap();
        assert_eq!(status.total, 5);
        assert_eq!(status.pending, 5);
        assert_eq!(status.completed, 0);

        pilot.stop().await;
    }

    #[tokio::test]
    async fn insights_endpoint_honors_limit() {
        let (pilot, router) = app();
        pilot.start(UserProfile::default()).await;
        pilot.run_cycle(chrono::Utc::now()).await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/autopilot/insights?limit=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let insights: Vec<Insight> = serde_json::from_slice(&body).unwrap();
        assert!(insights.len() <= 2);

        pilot.stop().await;
    }
}
