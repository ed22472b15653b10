//! Outbound test call

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use dakiya::OutboundCall;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCallRequest {
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCallResponse {
    pub success: bool,
    pub call_sid: String,
    pub status: String,
}

impl From<OutboundCall> for TestCallResponse {
    fn from(call: OutboundCall) -> Self {
        Self {
            success: true,
            call_sid: call.call_sid,
            status: call.status,
        }
    }
}
