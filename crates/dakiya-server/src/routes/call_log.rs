//! Call Log Routes
//!
//! HTTP handlers that delegate to DashboardService.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use dakiya::SessionUpdate;

use super::error_response;
use crate::models::{CallLogResponse, CreateCallLogRequest, UpdateCallLogRequest};
use crate::AppState;

/// List recent call logs (newest first, at most 100)
#[utoipa::path(
    get,
    path = "/api/call-logs",
    responses(
        (status = 200, description = "Recent call logs", body = Vec<CallLogResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "CallLog"
)]
pub async fn list_call_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<CallLogResponse>>, (StatusCode, String)> {
    let sessions = state
        .dashboard
        .list_call_logs()
        .await
        .map_err(error_response)?;

    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

/// Create a call log manually
#[utoipa::path(
    post,
    path = "/api/call-logs",
    request_body = CreateCallLogRequest,
    responses(
        (status = 200, description = "Call log created", body = CallLogResponse),
        (status = 400, description = "Phone number missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "CallLog"
)]
pub async fn create_call_log(
    State(state): State<AppState>,
    Json(payload): Json<CreateCallLogRequest>,
) -> Result<Json<CallLogResponse>, (StatusCode, String)> {
    let session = state
        .dashboard
        .create_call_log(payload.into())
        .await
        .map_err(error_response)?;

    Ok(Json(session.into()))
}

/// Get a call log by ID
#[utoipa::path(
    get,
    path = "/api/call-logs/{id}",
    params(
        ("id" = Uuid, Path, description = "Call session ID")
    ),
    responses(
        (status = 200, description = "Call log found", body = CallLogResponse),
        (status = 404, description = "Call log not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "CallLog"
)]
pub async fn get_call_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CallLogResponse>, (StatusCode, String)> {
    let session = state
        .dashboard
        .get_call_log(id)
        .await
        .map_err(error_response)?;

    Ok(Json(session.into()))
}

/// Merge fields into a call log
#[utoipa::path(
    patch,
    path = "/api/call-logs/{id}",
    params(
        ("id" = Uuid, Path, description = "Call session ID")
    ),
    request_body = UpdateCallLogRequest,
    responses(
        (status = 200, description = "Call log updated", body = CallLogResponse),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Call log not found"),
        (status = 409, description = "Status transition not allowed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "CallLog"
)]
pub async fn update_call_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCallLogRequest>,
) -> Result<Json<CallLogResponse>, (StatusCode, String)> {
    let update = SessionUpdate::try_from(payload).map_err(error_response)?;
    let session = state
        .dashboard
        .update_call_log(id, update)
        .await
        .map_err(error_response)?;

    Ok(Json(session.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/call-logs", get(list_call_logs).post(create_call_log))
        .route(
            "/api/call-logs/:id",
            get(get_call_log).patch(update_call_log),
        )
}
