//! Settings Routes - Delivery settings and AI configuration

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::error_response;
use crate::models::{
    AiConfigurationResponse, DeliverySettingsResponse, UpdateAiConfigurationRequest,
    UpdateDeliverySettingsRequest,
};
use crate::AppState;

/// Get delivery settings
#[utoipa::path(
    get,
    path = "/api/delivery-settings",
    responses(
        (status = 200, description = "Current delivery settings", body = DeliverySettingsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Settings"
)]
pub async fn get_delivery_settings(
    State(state): State<AppState>,
) -> Result<Json<DeliverySettingsResponse>, (StatusCode, String)> {
    let settings = state
        .dashboard
        .delivery_settings()
        .await
        .map_err(error_response)?;

    Ok(Json(settings.into()))
}

/// Update delivery settings
#[utoipa::path(
    put,
    path = "/api/delivery-settings",
    request_body = UpdateDeliverySettingsRequest,
    responses(
        (status = 200, description = "Delivery settings saved", body = DeliverySettingsResponse),
        (status = 400, description = "Invalid settings"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Settings"
)]
pub async fn update_delivery_settings(
    State(state): State<AppState>,
    Json(payload): Json<UpdateDeliverySettingsRequest>,
) -> Result<Json<DeliverySettingsResponse>, (StatusCode, String)> {
    let current = state
        .dashboard
        .delivery_settings()
        .await
        .map_err(error_response)?;

    let saved = state
        .dashboard
        .update_delivery_settings(payload.apply_to(current))
        .await
        .map_err(error_response)?;

    Ok(Json(saved.into()))
}

/// Get AI configuration
#[utoipa::path(
    get,
    path = "/api/ai-configuration",
    responses(
        (status = 200, description = "Current AI configuration", body = AiConfigurationResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Settings"
)]
pub async fn get_ai_configuration(
    State(state): State<AppState>,
) -> Result<Json<AiConfigurationResponse>, (StatusCode, String)> {
    let config = state
        .dashboard
        .ai_configuration()
        .await
        .map_err(error_response)?;

    Ok(Json(config.into()))
}

/// Update AI configuration
#[utoipa::path(
    put,
    path = "/api/ai-configuration",
    request_body = UpdateAiConfigurationRequest,
    responses(
        (status = 200, description = "AI configuration saved", body = AiConfigurationResponse),
        (status = 400, description = "Invalid configuration"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Settings"
)]
pub async fn update_ai_configuration(
    State(state): State<AppState>,
    Json(payload): Json<UpdateAiConfigurationRequest>,
) -> Result<Json<AiConfigurationResponse>, (StatusCode, String)> {
    let current = state
        .dashboard
        .ai_configuration()
        .await
        .map_err(error_response)?;

    let saved = state
        .dashboard
        .update_ai_configuration(payload.apply_to(current))
        .await
        .map_err(error_response)?;

    Ok(Json(saved.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/delivery-settings",
            get(get_delivery_settings).put(update_delivery_settings),
        )
        .route(
            "/api/ai-configuration",
            get(get_ai_configuration).put(update_ai_configuration),
        )
}
