use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::ModifierId;
use super::scorecard::{ScorecardEngine, ScorecardError};
use super::scoring::ScoringError;

/// Body of a scorecard request. An absent list means no modifiers.
#[derive(Debug, Default, Deserialize)]
pub struct ScorecardRequest {
    #[serde(default)]
    pub modifiers: Vec<ModifierId>,
}

/// Read-only endpoints over the methodology dataset.
pub fn methodology_router(engine: ScorecardEngine) -> Router {
    Router::new()
        .route("/api/v1/factors", get(list_factors_handler))
        .route("/api/v1/factors/:factor_id", get(factor_handler))
        .route("/api/v1/policies", get(list_policies_handler))
        .route("/api/v1/policies/:policy_id", get(methodology_handler))
        .route(
            "/api/v1/policies/:policy_id/scorecard",
            post(scorecard_handler),
        )
        .route(
            "/api/v1/policies/:policy_id/modifiers/impact",
            get(modifier_impact_handler),
        )
        .route("/api/v1/rankings", get(rankings_handler))
        .with_state(engine)
}

pub(crate) async fn list_factors_handler(State(engine): State<ScorecardEngine>) -> Response {
    let factors = engine.store().registry().list();
    (StatusCode::OK, Json(factors)).into_response()
}

pub(crate) async fn factor_handler(
    State(engine): State<ScorecardEngine>,
    Path(factor_id): Path<String>,
) -> Response {
    match engine.store().registry().get(&factor_id) {
        Ok(definition) => (StatusCode::OK, Json(definition)).into_response(),
        Err(err) => error_response(StatusCode::NOT_FOUND, err.to_string()),
    }
}

pub(crate) async fn list_policies_handler(State(engine): State<ScorecardEngine>) -> Response {
    match engine.summaries() {
        Ok(summaries) => (StatusCode::OK, Json(summaries)).into_response(),
        Err(err) => scorecard_error_response(err),
    }
}

pub(crate) async fn methodology_handler(
    State(engine): State<ScorecardEngine>,
    Path(policy_id): Path<String>,
) -> Response {
    match engine.store().get(&policy_id) {
        Some(methodology) => (StatusCode::OK, Json(methodology)).into_response(),
        None => scorecard_error_response(ScorecardError::PolicyNotFound(policy_id.as_str().into())),
    }
}

pub(crate) async fn scorecard_handler(
    State(engine): State<ScorecardEngine>,
    Path(policy_id): Path<String>,
    Json(request): Json<ScorecardRequest>,
) -> Response {
    match engine.scorecard(&policy_id, &request.modifiers) {
        Ok(scorecard) => (StatusCode::OK, Json(scorecard)).into_response(),
        Err(err) => scorecard_error_response(err),
    }
}

pub(crate) async fn modifier_impact_handler(
    State(engine): State<ScorecardEngine>,
    Path(policy_id): Path<String>,
) -> Response {
    match engine.modifier_impacts(&policy_id) {
        Ok(impacts) => (StatusCode::OK, Json(impacts)).into_response(),
        Err(err) => scorecard_error_response(err),
    }
}

pub(crate) async fn rankings_handler(State(engine): State<ScorecardEngine>) -> Response {
    match engine.rankings() {
        Ok(rankings) => (StatusCode::OK, Json(rankings)).into_response(),
        Err(err) => scorecard_error_response(err),
    }
}

fn scorecard_error_response(err: ScorecardError) -> Response {
    let status = match &err {
        ScorecardError::PolicyNotFound(_) => StatusCode::NOT_FOUND,
        ScorecardError::Scoring(ScoringError::UnknownModifier { .. }) => StatusCode::BAD_REQUEST,
        ScorecardError::Scoring(ScoringError::EmptyScoreSet)
        | ScorecardError::IncompleteScores { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        warn!(%err, "scorecard request failed");
    }

    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
