//! Telephony Webhook Routes
//!
//! Every response is TwiML with status 200, whatever happened inside.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};

use crate::application::IncomingCall;
use crate::models::{GatherWebhookForm, VoiceWebhookForm};
use crate::AppState;

/// TwiML document served as `text/xml`
pub struct TwimlResponse(pub String);

impl IntoResponse for TwimlResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/xml")], self.0).into_response()
    }
}

/// New inbound call
pub async fn voice(
    State(state): State<AppState>,
    form: Result<Form<VoiceWebhookForm>, FormRejection>,
) -> TwimlResponse {
    let form = form.map(|Form(f)| f).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unreadable voice webhook body");
        VoiceWebhookForm::default()
    });

    let reply = state
        .call_service
        .start_call(IncomingCall {
            from: form.from,
            call_sid: form.call_sid,
            caller_name: form.caller_name,
        })
        .await;

    TwimlResponse(state.twiml.render(&reply))
}

/// One recognized caller utterance
pub async fn gather(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    form: Result<Form<GatherWebhookForm>, FormRejection>,
) -> TwimlResponse {
    let form = form.map(|Form(f)| f).unwrap_or_else(|e| {
        tracing::warn!(session_ref = %session_id, error = %e, "Unreadable gather webhook body");
        GatherWebhookForm::default()
    });

    let reply = state
        .call_service
        .handle_speech(&session_id, form.speech_result.as_deref())
        .await;

    TwimlResponse(state.twiml.render(&reply))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/voice", post(voice))
        .route("/gather/:session_id", post(gather))
}
