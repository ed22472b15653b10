//! DeliverySettings - Global business rules for delivery calls

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Single global record read by the conversation on every turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySettings {
    /// Spoken to the caller in the opening prompt
    pub default_instructions: String,
    pub emergency_contacts: Vec<String>,
    pub allow_cod: bool,
    pub require_otp: bool,
    /// Minutes after which a call is handed to a human; 0 disables the check
    pub escalation_threshold_minutes: i32,
    pub updated_at: DateTime<Utc>,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            default_instructions: "Please leave the package at the main gate. The security guard will collect it. For any issues, please call the emergency contact.".to_string(),
            emergency_contacts: vec!["+91 98765 43210".to_string()],
            allow_cod: true,
            require_otp: false,
            escalation_threshold_minutes: 3,
            updated_at: Utc::now(),
        }
    }
}

impl DeliverySettings {
    /// Duration threshold, or `None` when duration-based escalation is off
    pub fn escalation_threshold(&self) -> Option<Duration> {
        (self.escalation_threshold_minutes > 0)
            .then(|| Duration::minutes(i64::from(self.escalation_threshold_minutes)))
    }

    pub fn primary_emergency_contact(&self) -> Option<&str> {
        self.emergency_contacts
            .iter()
            .map(|c| c.trim())
            .find(|c| !c.is_empty())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.default_instructions.trim().is_empty() {
            return Err(DomainError::Validation(
                "default instructions must not be empty".to_string(),
            ));
        }
        if self.escalation_threshold_minutes < 0 {
            return Err(DomainError::Validation(
                "escalation threshold must be zero or positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_zero_disables() {
        let settings = DeliverySettings {
            escalation_threshold_minutes: 0,
            ..Default::default()
        };
        assert!(settings.escalation_threshold().is_none());
        assert_eq!(
            DeliverySettings::default().escalation_threshold(),
            Some(Duration::minutes(3))
        );
    }

    #[test]
    fn test_validate_rejects_blank_instructions() {
        let settings = DeliverySettings {
            default_instructions: "  ".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
        assert!(DeliverySettings::default().validate().is_ok());
    }

    #[test]
    fn test_primary_contact_skips_blanks() {
        let settings = DeliverySettings {
            emergency_contacts: vec!["".to_string(), " +91 11111 22222 ".to_string()],
            ..Default::default()
        };
        assert_eq!(settings.primary_emergency_contact(), Some("+91 11111 22222"));
    }
}
