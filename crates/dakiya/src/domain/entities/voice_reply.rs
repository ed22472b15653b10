//! VoiceReply - What the telephony provider should do next
//!
//! A reply is either "say this and listen again" or "say this and hang up";
//! the two shapes never mix.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoiceReply {
    /// Speak, then gather the next utterance and POST it to `action`
    Listen { message: String, action: String },
    /// Speak, then end the call
    Hangup { message: String },
}

impl VoiceReply {
    /// Keep listening on the gather endpoint of `session_id`
    pub fn listen(message: impl Into<String>, session_id: Uuid) -> Self {
        Self::Listen {
            message: message.into(),
            action: gather_path(session_id),
        }
    }

    pub fn hangup(message: impl Into<String>) -> Self {
        Self::Hangup {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Listen { message, .. } | Self::Hangup { message } => message,
        }
    }

    pub fn is_listening(&self) -> bool {
        matches!(self, Self::Listen { .. })
    }

    pub fn action(&self) -> Option<&str> {
        match self {
            Self::Listen { action, .. } => Some(action),
            Self::Hangup { .. } => None,
        }
    }
}

/// Path of the gather webhook for a session
pub fn gather_path(session_id: Uuid) -> String {
    format!("/gather/{}", session_id)
}
