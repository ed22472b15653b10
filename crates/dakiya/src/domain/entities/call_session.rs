//! CallSession - Durable conversation state of one phone call
//!
//! Pure domain entity without infrastructure dependencies. Every storage
//! adapter applies updates through [`CallSession::apply`], so the merge rules
//! live in exactly one place:
//!
//! - the transcript is append-only
//! - extracted facts are last-write-wins per field and never cleared
//! - `ended_at` is set exactly once, on the transition to a terminal status

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CallStatus, Speaker};

/// One line of the call transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    pub fn caller(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Caller,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Business facts mined from the conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFacts {
    pub package_id: Option<String>,
    /// Cash-on-delivery amount in rupees
    pub cod_amount: Option<i64>,
    pub otp_provided: Option<String>,
    pub verification_required: Option<bool>,
}

/// A field-level patch over [`ExtractedFacts`]; `None` means "not mentioned".
pub type FactsPatch = ExtractedFacts;

impl ExtractedFacts {
    /// Overwrite every field the patch sets, keep the rest.
    pub fn merge(&mut self, patch: FactsPatch) {
        if patch.package_id.is_some() {
            self.package_id = patch.package_id;
        }
        if patch.cod_amount.is_some() {
            self.cod_amount = patch.cod_amount;
        }
        if patch.otp_provided.is_some() {
            self.otp_provided = patch.otp_provided;
        }
        if patch.verification_required.is_some() {
            self.verification_required = patch.verification_required;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Parameters for allocating a new session
#[derive(Debug, Clone, Default)]
pub struct NewCallSession {
    pub phone_number: String,
    /// Provider-issued call identifier (e.g. Twilio CallSid)
    pub call_sid: Option<String>,
    pub caller_name: Option<String>,
    pub verification_required: Option<bool>,
}

impl NewCallSession {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            ..Default::default()
        }
    }

    pub fn with_call_sid(mut self, call_sid: impl Into<String>) -> Self {
        self.call_sid = Some(call_sid.into());
        self
    }

    pub fn with_caller_name(mut self, name: Option<String>) -> Self {
        self.caller_name = name;
        self
    }

    pub fn with_verification_required(mut self, required: bool) -> Self {
        self.verification_required = Some(required);
        self
    }
}

/// CallSession - one inbound call's full conversational state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSession {
    pub id: Uuid,
    pub call_sid: Option<String>,
    pub phone_number: String,
    pub caller_name: Option<String>,
    pub status: CallStatus,
    pub transcript: Vec<TranscriptEntry>,
    pub facts: ExtractedFacts,
    pub delivery_instructions: Option<String>,
    pub duration_secs: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// Partial update merged into a session by the state store
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub status: Option<CallStatus>,
    pub append: Vec<TranscriptEntry>,
    pub facts: FactsPatch,
    pub caller_name: Option<String>,
    pub delivery_instructions: Option<String>,
    pub duration_secs: Option<i64>,
}

impl SessionUpdate {
    /// One conversational turn: caller line followed by the assistant line
    pub fn turn(caller: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            append: vec![
                TranscriptEntry::caller(caller),
                TranscriptEntry::assistant(assistant),
            ],
            ..Default::default()
        }
    }

    pub fn status(status: CallStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: CallStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_facts(mut self, facts: FactsPatch) -> Self {
        self.facts = facts;
        self
    }
}

impl CallSession {
    /// Allocate a fresh session: in progress, empty transcript, no facts
    pub fn open(new: NewCallSession) -> Result<Self, DomainError> {
        let phone_number = new.phone_number.trim();
        if phone_number.is_empty() {
            return Err(DomainError::Validation(
                "phone number is required".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            call_sid: new.call_sid.filter(|sid| !sid.trim().is_empty()),
            phone_number: phone_number.to_string(),
            caller_name: new.caller_name,
            status: CallStatus::InProgress,
            transcript: Vec::new(),
            facts: ExtractedFacts {
                verification_required: new.verification_required,
                ..Default::default()
            },
            delivery_instructions: None,
            duration_secs: None,
            created_at: Utc::now(),
            ended_at: None,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of completed caller turns
    pub fn turn_count(&self) -> usize {
        self.transcript
            .iter()
            .filter(|entry| entry.speaker == Speaker::Caller)
            .count()
    }

    /// Time since the session was created (never negative)
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).max(Duration::zero())
    }

    /// Merge an update into this session.
    ///
    /// Validation happens before any field is touched, so a rejected update
    /// leaves the session unchanged.
    pub fn apply(&mut self, update: SessionUpdate, now: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(next) = update.status {
            if !self.status.can_transition_to(next) {
                return Err(DomainError::Conflict(format!(
                    "call {} is {} and cannot become {}",
                    self.id, self.status, next
                )));
            }
        }
        if self.is_terminal() && !update.append.is_empty() {
            return Err(DomainError::Conflict(format!(
                "call {} has ended ({}); transcript is closed",
                self.id, self.status
            )));
        }

        self.transcript.extend(update.append);
        self.facts.merge(update.facts);

        if update.caller_name.is_some() {
            self.caller_name = update.caller_name;
        }
        if update.delivery_instructions.is_some() {
            self.delivery_instructions = update.delivery_instructions;
        }
        if update.duration_secs.is_some() {
            self.duration_secs = update.duration_secs;
        }

        if let Some(next) = update.status {
            if next != self.status {
                self.status = next;
                if next.is_terminal() {
                    self.ended_at = Some(now);
                    if self.duration_secs.is_none() {
                        self.duration_secs = Some(self.elapsed(now).num_seconds());
                    }
                }
            }
        }

        Ok(())
    }
}
