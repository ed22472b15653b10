//! Delivery settings and AI configuration DTOs
//!
//! Updates are partial: omitted fields keep their current value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use dakiya::{AiConfiguration, DeliverySettings};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySettingsResponse {
    pub default_instructions: String,
    pub emergency_contacts: Vec<String>,
    pub allow_cod: bool,
    pub require_otp: bool,
    /// Minutes; 0 disables duration-based escalation
    pub escalation_threshold: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<DeliverySettings> for DeliverySettingsResponse {
    fn from(s: DeliverySettings) -> Self {
        Self {
            default_instructions: s.default_instructions,
            emergency_contacts: s.emergency_contacts,
            allow_cod: s.allow_cod,
            require_otp: s.require_otp,
            escalation_threshold: s.escalation_threshold_minutes,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliverySettingsRequest {
    pub default_instructions: Option<String>,
    pub emergency_contacts: Option<Vec<String>>,
    pub allow_cod: Option<bool>,
    pub require_otp: Option<bool>,
    pub escalation_threshold: Option<i32>,
}

impl UpdateDeliverySettingsRequest {
    pub fn apply_to(self, current: DeliverySettings) -> DeliverySettings {
        DeliverySettings {
            default_instructions: self
                .default_instructions
                .unwrap_or(current.default_instructions),
            emergency_contacts: self
                .emergency_contacts
                .unwrap_or(current.emergency_contacts),
            allow_cod: self.allow_cod.unwrap_or(current.allow_cod),
            require_otp: self.require_otp.unwrap_or(current.require_otp),
            escalation_threshold_minutes: self
                .escalation_threshold
                .unwrap_or(current.escalation_threshold_minutes),
            updated_at: current.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiConfigurationResponse {
    pub voice_model: String,
    pub language: String,
    pub response_speed: String,
    pub personality_tone: String,
    /// Percent Hindi in replies (0-100)
    pub hindi_proficiency: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<AiConfiguration> for AiConfigurationResponse {
    fn from(c: AiConfiguration) -> Self {
        Self {
            voice_model: c.voice_model,
            language: c.language,
            response_speed: c.response_speed,
            personality_tone: c.personality_tone,
            hindi_proficiency: c.hindi_proficiency,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAiConfigurationRequest {
    pub voice_model: Option<String>,
    pub language: Option<String>,
    pub response_speed: Option<String>,
    pub personality_tone: Option<String>,
    pub hindi_proficiency: Option<i32>,
}

impl UpdateAiConfigurationRequest {
    pub fn apply_to(self, current: AiConfiguration) -> AiConfiguration {
        AiConfiguration {
            voice_model: self.voice_model.unwrap_or(current.voice_model),
            language: self.language.unwrap_or(current.language),
            response_speed: self.response_speed.unwrap_or(current.response_speed),
            personality_tone: self.personality_tone.unwrap_or(current.personality_tone),
            hindi_proficiency: self.hindi_proficiency.unwrap_or(current.hindi_proficiency),
            updated_at: current.updated_at,
        }
    }
}
