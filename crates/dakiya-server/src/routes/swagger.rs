//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa. The telephony webhooks speak
//! TwiML and are not part of the JSON API.

use utoipa::OpenApi;

use crate::models::{
    AiConfigurationResponse, CallLogResponse, CreateCallLogRequest, DeliverySettingsResponse,
    StatsResponse, TestCallRequest, TestCallResponse, TranscriptEntryResponse,
    UpdateAiConfigurationRequest, UpdateCallLogRequest, UpdateDeliverySettingsRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Call log endpoints
        super::call_log::list_call_logs,
        super::call_log::create_call_log,
        super::call_log::get_call_log,
        super::call_log::update_call_log,
        // Stats endpoints
        super::stats::get_stats,
        // Settings endpoints
        super::settings::get_delivery_settings,
        super::settings::update_delivery_settings,
        super::settings::get_ai_configuration,
        super::settings::update_ai_configuration,
        // Test call endpoints
        super::test_call::create_test_call,
    ),
    components(
        schemas(
            CallLogResponse,
            TranscriptEntryResponse,
            CreateCallLogRequest,
            UpdateCallLogRequest,
            StatsResponse,
            DeliverySettingsResponse,
            UpdateDeliverySettingsRequest,
            AiConfigurationResponse,
            UpdateAiConfigurationRequest,
            TestCallRequest,
            TestCallResponse,
        )
    ),
    tags(
        (name = "CallLog", description = "Call sessions and transcripts"),
        (name = "Stats", description = "Aggregate call numbers"),
        (name = "Settings", description = "Delivery settings and AI configuration"),
        (name = "TestCall", description = "Outbound test calls"),
    ),
    info(
        title = "Dakiya API",
        version = "0.1.0",
        description = "Delivery voice assistant - dashboard API"
    )
)]
pub struct ApiDoc;
