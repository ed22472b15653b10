//! Twilio webhook form bodies
//!
//! Only the fields the conversation needs; Twilio sends many more.

use serde::Deserialize;

/// Body of the inbound call webhook (`POST /voice`)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceWebhookForm {
    /// Caller phone number
    pub from: Option<String>,
    pub call_sid: Option<String>,
    /// Caller ID name, when the carrier provides one
    pub caller_name: Option<String>,
}

/// Body of the speech gather webhook (`POST /gather/{session_id}`)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatherWebhookForm {
    /// Recognized speech; absent when the caller said nothing
    pub speech_result: Option<String>,
    pub call_sid: Option<String>,
}
