use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{OperatorId, OperatorSnapshot};
use super::findings::{FindingCategory, FindingError, FindingId, FindingNarrative};
use super::repository::{OperatorRepository, RepositoryError};
use super::service::{NewFinding, OversightService, ServiceError};

/// Router builder exposing HTTP endpoints for registration, scoring, and
/// the finding lifecycle.
pub fn oversight_router<R>(service: Arc<OversightService<R>>) -> Router
where
    R: OperatorRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/operators",
            post(register_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/operators/:operator_id", get(status_handler::<R>))
        .route(
            "/api/v1/operators/:operator_id/rescore",
            post(rescore_handler::<R>),
        )
        .route(
            "/api/v1/operators/:operator_id/findings",
            post(open_finding_handler::<R>),
        )
        .route(
            "/api/v1/operators/:operator_id/findings/:finding_id/complete",
            post(complete_finding_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenFindingRequest {
    pub(crate) category: FindingCategory,
    #[serde(default)]
    pub(crate) created_on: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) narrative: FindingNarrative,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompleteFindingRequest {
    #[serde(default)]
    pub(crate) completed_on: Option<NaiveDate>,
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<OversightService<R>>>,
    axum::Json(snapshot): axum::Json<OperatorSnapshot>,
) -> Response
where
    R: OperatorRepository + 'static,
{
    match service.register(snapshot) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<OversightService<R>>>,
) -> Response
where
    R: OperatorRepository + 'static,
{
    match service.list() {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<OversightService<R>>>,
    Path(operator_id): Path<String>,
) -> Response
where
    R: OperatorRepository + 'static,
{
    let id = OperatorId(operator_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rescore_handler<R>(
    State(service): State<Arc<OversightService<R>>>,
    Path(operator_id): Path<String>,
) -> Response
where
    R: OperatorRepository + 'static,
{
    let id = OperatorId(operator_id);
    match service.rescore(&id) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_finding_handler<R>(
    State(service): State<Arc<OversightService<R>>>,
    Path(operator_id): Path<String>,
    axum::Json(request): axum::Json<OpenFindingRequest>,
) -> Response
where
    R: OperatorRepository + 'static,
{
    let id = OperatorId(operator_id);
    let created_on = request
        .created_on
        .unwrap_or_else(|| Local::now().date_naive());
    let new_finding = NewFinding {
        category: request.category,
        created_on,
        narrative: request.narrative,
    };

    match service.open_finding(&id, new_finding) {
        Ok(finding) => (StatusCode::CREATED, axum::Json(finding)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_finding_handler<R>(
    State(service): State<Arc<OversightService<R>>>,
    Path((operator_id, finding_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<CompleteFindingRequest>,
) -> Response
where
    R: OperatorRepository + 'static,
{
    let id = OperatorId(operator_id);
    let finding_id = FindingId(finding_id);
    let completed_on = request
        .completed_on
        .unwrap_or_else(|| Local::now().date_naive());

    match service.complete_finding(&id, &finding_id, completed_on) {
        Ok(finding) => (StatusCode::OK, axum::Json(finding)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::UnknownFinding(_) => StatusCode::NOT_FOUND,
        ServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ServiceError::Finding(FindingError::AlreadyCompleted(_)) => StatusCode::CONFLICT,
        ServiceError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
