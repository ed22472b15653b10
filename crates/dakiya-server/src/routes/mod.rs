//! Dakiya API Routes
//!
//! - /voice, /gather/:session_id - Telephony webhooks (TwiML)
//! - /api/call-logs - Call sessions
//! - /api/stats - Aggregate numbers
//! - /api/delivery-settings, /api/ai-configuration - Global settings
//! - /api/test-call - Outbound test call

pub mod call_log;
pub mod settings;
pub mod stats;
pub mod swagger;
pub mod test_call;
pub mod voice;

use axum::http::StatusCode;

use dakiya::DomainError;

/// Map a domain error onto the dashboard API's status codes
pub fn error_response(e: DomainError) -> (StatusCode, String) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::ExternalService(_) | DomainError::Timeout(_) => StatusCode::BAD_GATEWAY,
        DomainError::Repository(_) => {
            tracing::error!(error = %e, "Repository failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}
