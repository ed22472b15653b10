//! Escalation Policy
//!
//! Decides whether a call leaves automated handling. Three triggers are
//! combined by OR: the assistant asked for a human, the call has run past the
//! configured duration threshold, or (when a cap is configured) the caller
//! has used up the allowed turns without finishing the delivery.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Why a call was escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    RequestedByAssistant,
    DurationExceeded,
    TurnLimitReached,
}

impl EscalationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationReason::RequestedByAssistant => "requested_by_assistant",
            EscalationReason::DurationExceeded => "duration_exceeded",
            EscalationReason::TurnLimitReached => "turn_limit_reached",
        }
    }
}

impl fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Facts about the current turn the policy looks at
#[derive(Debug, Clone, Copy)]
pub struct EscalationInput {
    /// Time since the session was created
    pub elapsed: Duration,
    /// Caller turns including the one being processed
    pub turn_count: usize,
    /// `None` disables the duration trigger
    pub threshold: Option<Duration>,
    /// The assistant's own escalation flag
    pub requested: bool,
    /// The assistant reported the delivery as done
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationDecision {
    pub escalate: bool,
    pub reason: Option<EscalationReason>,
}

impl EscalationDecision {
    pub fn stay() -> Self {
        Self {
            escalate: false,
            reason: None,
        }
    }

    pub fn escalate(reason: EscalationReason) -> Self {
        Self {
            escalate: true,
            reason: Some(reason),
        }
    }

    /// True when the policy overrode an assistant that wanted to continue
    pub fn is_override(&self) -> bool {
        matches!(
            self.reason,
            Some(EscalationReason::DurationExceeded | EscalationReason::TurnLimitReached)
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EscalationPolicy {
    max_turns: Option<usize>,
}

impl EscalationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap on caller turns; `None` or `Some(0)` disables the cap
    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns.filter(|n| *n > 0);
        self
    }

    pub fn max_turns(&self) -> Option<usize> {
        self.max_turns
    }

    pub fn evaluate(&self, input: &EscalationInput) -> EscalationDecision {
        if input.requested {
            return EscalationDecision::escalate(EscalationReason::RequestedByAssistant);
        }

        // Duration wins even over a completed delivery
        if let Some(threshold) = input.threshold {
            if input.elapsed > threshold {
                return EscalationDecision::escalate(EscalationReason::DurationExceeded);
            }
        }

        if let Some(max_turns) = self.max_turns {
            if !input.completed && input.turn_count >= max_turns {
                return EscalationDecision::escalate(EscalationReason::TurnLimitReached);
            }
        }

        EscalationDecision::stay()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EscalationInput {
        EscalationInput {
            elapsed: Duration::seconds(30),
            turn_count: 1,
            threshold: Some(Duration::minutes(5)),
            requested: false,
            completed: false,
        }
    }

    #[test]
    fn test_no_trigger_stays() {
        let decision = EscalationPolicy::new().evaluate(&input());
        assert_eq!(decision, EscalationDecision::stay());
    }

    #[test]
    fn test_assistant_request_escalates() {
        let decision = EscalationPolicy::new().evaluate(&EscalationInput {
            requested: true,
            ..input()
        });
        assert!(decision.escalate);
        assert_eq!(decision.reason, Some(EscalationReason::RequestedByAssistant));
        assert!(!decision.is_override());
    }

    #[test]
    fn test_duration_exceeded_escalates_even_when_completed() {
        let decision = EscalationPolicy::new().evaluate(&EscalationInput {
            elapsed: Duration::seconds(301),
            completed: true,
            ..input()
        });
        assert!(decision.escalate);
        assert_eq!(decision.reason, Some(EscalationReason::DurationExceeded));
        assert!(decision.is_override());
    }

    #[test]
    fn test_duration_at_threshold_does_not_escalate() {
        let decision = EscalationPolicy::new().evaluate(&EscalationInput {
            elapsed: Duration::minutes(5),
            ..input()
        });
        assert!(!decision.escalate);
    }

    #[test]
    fn test_disabled_threshold_never_escalates_on_time() {
        let decision = EscalationPolicy::new().evaluate(&EscalationInput {
            elapsed: Duration::hours(3),
            threshold: None,
            ..input()
        });
        assert!(!decision.escalate);
    }

    #[test]
    fn test_turn_cap() {
        let policy = EscalationPolicy::new().with_max_turns(Some(3));

        let under = policy.evaluate(&EscalationInput {
            turn_count: 2,
            ..input()
        });
        assert!(!under.escalate);

        let over = policy.evaluate(&EscalationInput {
            turn_count: 3,
            ..input()
        });
        assert_eq!(over.reason, Some(EscalationReason::TurnLimitReached));

        let done = policy.evaluate(&EscalationInput {
            turn_count: 4,
            completed: true,
            ..input()
        });
        assert!(!done.escalate);
    }

    #[test]
    fn test_zero_turn_cap_is_disabled() {
        let policy = EscalationPolicy::new().with_max_turns(Some(0));
        assert_eq!(policy.max_turns(), None);
    }
}
