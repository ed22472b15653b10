//! In-memory implementation of SettingsRepository

use async_trait::async_trait;
use tokio::sync::RwLock;

use dakiya::{AiConfiguration, DeliverySettings, DomainError, SettingsRepository};

#[derive(Default)]
pub struct InMemorySettingsRepository {
    delivery: RwLock<DeliverySettings>,
    ai: RwLock<AiConfiguration>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delivery_settings(settings: DeliverySettings) -> Self {
        Self {
            delivery: RwLock::new(settings),
            ai: RwLock::default(),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn delivery_settings(&self) -> Result<DeliverySettings, DomainError> {
        Ok(self.delivery.read().await.clone())
    }

    async fn save_delivery_settings(
        &self,
        settings: &DeliverySettings,
    ) -> Result<DeliverySettings, DomainError> {
        let mut current = self.delivery.write().await;
        *current = settings.clone();
        Ok(current.clone())
    }

    async fn ai_configuration(&self) -> Result<AiConfiguration, DomainError> {
        Ok(self.ai.read().await.clone())
    }

    async fn save_ai_configuration(
        &self,
        config: &AiConfiguration,
    ) -> Result<AiConfiguration, DomainError> {
        let mut current = self.ai.write().await;
        *current = config.clone();
        Ok(current.clone())
    }
}
