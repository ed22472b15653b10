//! CallStatus - Lifecycle state of a call session

use serde::{Deserialize, Serialize};

/// Call lifecycle state
///
/// `InProgress` is the only non-terminal state. The only legal transitions are
/// `InProgress -> {Completed, Escalated, Failed}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    InProgress,
    Completed,
    Failed,
    Escalated,
}

impl CallStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CallStatus::InProgress)
    }

    /// Whether moving from `self` to `next` is allowed.
    ///
    /// Re-asserting the current status is a no-op and always allowed.
    pub fn can_transition_to(&self, next: CallStatus) -> bool {
        *self == next || *self == CallStatus::InProgress
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::InProgress => "in_progress",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::Escalated => "escalated",
        }
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" => Ok(CallStatus::InProgress),
            "completed" => Ok(CallStatus::Completed),
            "failed" => Ok(CallStatus::Failed),
            "escalated" => Ok(CallStatus::Escalated),
            _ => Err(format!("Unknown call status: {}", s)),
        }
    }
}
