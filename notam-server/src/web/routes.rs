//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{FlightNumber, InvalidFlightNumber};
use crate::pipeline::SearchOutcome;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/flights/:flight", get(get_flight))
        .route("/api/notams", get(lookup_notams))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id/search", post(search_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Route of a single flight.
async fn get_flight(
    State(state): State<AppState>,
    Path(flight): Path<String>,
) -> Result<Json<RouteResult>, AppError> {
    let flight = FlightNumber::parse_normalized(&flight)?;
    let route = state
        .pipeline
        .resolve(&flight)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown flight: {flight}"),
        })?;

    Ok(Json(RouteResult::from_route(&flight, &route)))
}

/// One-off notices lookup, outside any session.
async fn lookup_notams(
    State(state): State<AppState>,
    Query(query): Query<NotamQuery>,
) -> Result<Json<PipelineResultDto>, AppError> {
    let flight = FlightNumber::parse_normalized(&query.flight)?;
    let result = state.pipeline.run(&flight).await;
    Ok(Json(PipelineResultDto::from_result(&result)))
}

/// Search within a session. Responds once this search has settled, with
/// whatever the session shows at that point.
async fn search_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SessionViewDto>, AppError> {
    let flight = FlightNumber::parse_normalized(&req.flight)?;
    let session = state.sessions.get_or_create(&id).await;

    let outcome = Arc::clone(&session).search(&state.pipeline, &flight).await;
    let superseded = matches!(outcome, SearchOutcome::Superseded);
    let view = session.view().await;

    Ok(Json(SessionViewDto::from_view(&view, superseded)))
}

/// Current state of a session.
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionViewDto>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("No such session: {id}"),
        })?;

    let view = session.view().await;
    Ok(Json(SessionViewDto::from_view(&view, false)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<InvalidFlightNumber> for AppError {
    fn from(e: InvalidFlightNumber) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
