//! Call logs - call sessions as seen by the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use dakiya::{CallSession, CallStatus, DomainError, FactsPatch, NewCallSession, SessionUpdate};

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptEntryResponse {
    /// "caller" or "assistant"
    pub speaker: String,
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallLogResponse {
    pub id: Uuid,
    pub call_sid: Option<String>,
    pub phone_number: String,
    pub caller_name: Option<String>,
    /// in_progress | completed | failed | escalated
    pub status: String,
    pub transcript: Vec<TranscriptEntryResponse>,
    pub package_id: Option<String>,
    /// Rupees
    pub cod_amount: Option<i64>,
    pub otp_provided: Option<String>,
    pub verification_required: Option<bool>,
    pub delivery_instructions: Option<String>,
    /// Seconds
    pub duration: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl From<CallSession> for CallLogResponse {
    fn from(session: CallSession) -> Self {
        Self {
            id: session.id,
            call_sid: session.call_sid,
            phone_number: session.phone_number,
            caller_name: session.caller_name,
            status: session.status.to_string(),
            transcript: session
                .transcript
                .into_iter()
                .map(|entry| TranscriptEntryResponse {
                    speaker: entry.speaker.to_string(),
                    text: entry.text,
                })
                .collect(),
            package_id: session.facts.package_id,
            cod_amount: session.facts.cod_amount,
            otp_provided: session.facts.otp_provided,
            verification_required: session.facts.verification_required,
            delivery_instructions: session.delivery_instructions,
            duration: session.duration_secs,
            created_at: session.created_at,
            ended_at: session.ended_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallLogRequest {
    pub phone_number: String,
    pub call_sid: Option<String>,
    pub caller_name: Option<String>,
}

impl From<CreateCallLogRequest> for NewCallSession {
    fn from(req: CreateCallLogRequest) -> Self {
        let new = NewCallSession::new(req.phone_number).with_caller_name(req.caller_name);
        match req.call_sid {
            Some(sid) => new.with_call_sid(sid),
            None => new,
        }
    }
}

/// Field merge; the transcript cannot be patched
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCallLogRequest {
    pub status: Option<String>,
    pub caller_name: Option<String>,
    pub package_id: Option<String>,
    pub cod_amount: Option<i64>,
    pub otp_provided: Option<String>,
    pub verification_required: Option<bool>,
    pub delivery_instructions: Option<String>,
    pub duration: Option<i64>,
}

impl TryFrom<UpdateCallLogRequest> for SessionUpdate {
    type Error = DomainError;

    fn try_from(req: UpdateCallLogRequest) -> Result<Self, Self::Error> {
        let status = req
            .status
            .as_deref()
            .map(str::parse::<CallStatus>)
            .transpose()
            .map_err(DomainError::Validation)?;

        Ok(SessionUpdate {
            status,
            append: Vec::new(),
            facts: FactsPatch {
                package_id: req.package_id,
                cod_amount: req.cod_amount,
                otp_provided: req.otp_provided,
                verification_required: req.verification_required,
            },
            caller_name: req.caller_name,
            delivery_instructions: req.delivery_instructions,
            duration_secs: req.duration,
        })
    }
}
