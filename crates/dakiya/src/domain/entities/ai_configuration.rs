//! AiConfiguration - Voice and tone parameters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Single global record; only `personality_tone` and `hindi_proficiency`
/// reach the conversation (through prompt phrasing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfiguration {
    pub voice_model: String,
    pub language: String,
    pub response_speed: String,
    pub personality_tone: String,
    /// Share of Hindi in replies, in percent
    pub hindi_proficiency: i32,
    pub updated_at: DateTime<Utc>,
}

impl Default for AiConfiguration {
    fn default() -> Self {
        Self {
            voice_model: "alloy".to_string(),
            language: "hi-en".to_string(),
            response_speed: "normal".to_string(),
            personality_tone: "friendly".to_string(),
            hindi_proficiency: 80,
            updated_at: Utc::now(),
        }
    }
}

impl AiConfiguration {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0..=100).contains(&self.hindi_proficiency) {
            return Err(DomainError::Validation(format!(
                "hindi proficiency must be between 0 and 100, got {}",
                self.hindi_proficiency
            )));
        }
        Ok(())
    }
}
