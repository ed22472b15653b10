//! Dashboard Application Service
//!
//! Thin pass-through over the stores for call logs, settings and stats, plus
//! the outbound test call.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use dakiya::{
    AiConfiguration, CallSession, CallSessionRepository, CallStats, DeliverySettings, DomainError,
    NewCallSession, OutboundCall, SessionUpdate, SettingsRepository, TelephonyClient,
};

const CALL_LOG_LIMIT: i64 = 100;

/// Why a test call could not be placed
#[derive(Debug, thiserror::Error)]
pub enum TestCallError {
    #[error("phone number is required")]
    MissingPhoneNumber,
    #[error("telephony is not configured")]
    NotConfigured,
    #[error(transparent)]
    Provider(#[from] DomainError),
}

pub struct DashboardService {
    sessions: Arc<dyn CallSessionRepository>,
    settings: Arc<dyn SettingsRepository>,
    telephony: Option<Arc<dyn TelephonyClient>>,
    voice_webhook_url: Option<String>,
}

impl DashboardService {
    pub fn new(
        sessions: Arc<dyn CallSessionRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            sessions,
            settings,
            telephony: None,
            voice_webhook_url: None,
        }
    }

    /// Enable test calls; the provider will fetch instructions from `{public_base_url}/voice`
    pub fn with_telephony(
        mut self,
        telephony: Arc<dyn TelephonyClient>,
        public_base_url: Option<String>,
    ) -> Self {
        self.telephony = Some(telephony);
        self.voice_webhook_url = public_base_url.map(|base| format!("{}/voice", base));
        self
    }

    pub async fn list_call_logs(&self) -> Result<Vec<CallSession>, DomainError> {
        self.sessions.list_recent(CALL_LOG_LIMIT).await
    }

    pub async fn get_call_log(&self, id: Uuid) -> Result<CallSession, DomainError> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("CallSession", id))
    }

    pub async fn create_call_log(&self, new: NewCallSession) -> Result<CallSession, DomainError> {
        let session = self.sessions.create(new).await?;
        tracing::info!(session_id = %session.id, "Call log created from dashboard");
        Ok(session)
    }

    pub async fn update_call_log(
        &self,
        id: Uuid,
        update: SessionUpdate,
    ) -> Result<CallSession, DomainError> {
        self.sessions.merge(id, update).await
    }

    pub async fn stats(&self) -> Result<CallStats, DomainError> {
        self.sessions.stats().await
    }

    pub async fn delivery_settings(&self) -> Result<DeliverySettings, DomainError> {
        self.settings.delivery_settings().await
    }

    pub async fn update_delivery_settings(
        &self,
        settings: DeliverySettings,
    ) -> Result<DeliverySettings, DomainError> {
        settings.validate()?;
        let saved = self
            .settings
            .save_delivery_settings(&DeliverySettings {
                updated_at: Utc::now(),
                ..settings
            })
            .await?;
        tracing::info!("Delivery settings updated");
        Ok(saved)
    }

    pub async fn ai_configuration(&self) -> Result<AiConfiguration, DomainError> {
        self.settings.ai_configuration().await
    }

    pub async fn update_ai_configuration(
        &self,
        config: AiConfiguration,
    ) -> Result<AiConfiguration, DomainError> {
        config.validate()?;
        let saved = self
            .settings
            .save_ai_configuration(&AiConfiguration {
                updated_at: Utc::now(),
                ..config
            })
            .await?;
        tracing::info!("AI configuration updated");
        Ok(saved)
    }

    pub async fn place_test_call(&self, phone_number: &str) -> Result<OutboundCall, TestCallError> {
        let phone_number = phone_number.trim();
        if phone_number.is_empty() {
            return Err(TestCallError::MissingPhoneNumber);
        }

        let (Some(telephony), Some(callback)) = (&self.telephony, &self.voice_webhook_url) else {
            return Err(TestCallError::NotConfigured);
        };

        Ok(telephony.initiate_call(phone_number, callback).await?)
    }
}
