use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use rbs_engine::error::AppError;
use rbs_engine::oversight::{
    oversight_router, score_legacy, LegacyAssessment, OperatorRepository, OperatorSnapshot,
    OversightService, ScoreResult,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Stateless assessment payload: both pipelines run against the posted
/// snapshot, nothing is stored.
#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) score: ScoreResult,
    pub(crate) legacy: LegacyAssessment,
}

pub(crate) fn with_oversight_routes<R>(service: Arc<OversightService<R>>) -> axum::Router
where
    R: OperatorRepository + 'static,
{
    let assess = axum::Router::new()
        .route(
            "/api/v1/rbs/assess",
            axum::routing::post(assess_endpoint::<R>),
        )
        .with_state(service.clone());

    oversight_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .merge(assess)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn assess_endpoint<R>(
    State(service): State<Arc<OversightService<R>>>,
    Json(snapshot): Json<OperatorSnapshot>,
) -> Result<Json<AssessmentResponse>, AppError>
where
    R: OperatorRepository + 'static,
{
    let engine = service.engine();
    let score = engine.score(&snapshot)?;
    let legacy = score_legacy(&snapshot.legacy, &engine.config().legacy_weights)?;

    Ok(Json(AssessmentResponse { score, legacy }))
}
