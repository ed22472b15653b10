//! Test Call Route - Ring a phone through the telephony provider

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::application::TestCallError;
use crate::models::{TestCallRequest, TestCallResponse};
use crate::AppState;

/// Place an outbound test call that lands on the voice webhook
#[utoipa::path(
    post,
    path = "/api/test-call",
    request_body = TestCallRequest,
    responses(
        (status = 200, description = "Call initiated", body = TestCallResponse),
        (status = 400, description = "Phone number missing"),
        (status = 502, description = "Telephony provider error"),
        (status = 503, description = "Telephony not configured")
    ),
    tag = "TestCall"
)]
pub async fn create_test_call(
    State(state): State<AppState>,
    Json(payload): Json<TestCallRequest>,
) -> Result<Json<TestCallResponse>, (StatusCode, String)> {
    let phone_number = payload.phone_number.unwrap_or_default();

    let call = state
        .dashboard
        .place_test_call(&phone_number)
        .await
        .map_err(|e| {
            let status = match &e {
                TestCallError::MissingPhoneNumber => StatusCode::BAD_REQUEST,
                TestCallError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                TestCallError::Provider(_) => {
                    tracing::warn!(error = %e, "Test call failed");
                    StatusCode::BAD_GATEWAY
                }
            };
            (status, e.to_string())
        })?;

    Ok(Json(call.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/test-call", post(create_test_call))
}
