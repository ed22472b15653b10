//! Settings Repository Port
//!
//! Both records are singletons that always exist; implementations seed
//! defaults when nothing has been stored yet.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, AiConfiguration, DeliverySettings};

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn delivery_settings(&self) -> Result<DeliverySettings, DomainError>;

    async fn save_delivery_settings(
        &self,
        settings: &DeliverySettings,
    ) -> Result<DeliverySettings, DomainError>;

    async fn ai_configuration(&self) -> Result<AiConfiguration, DomainError>;

    async fn save_ai_configuration(
        &self,
        config: &AiConfiguration,
    ) -> Result<AiConfiguration, DomainError>;
}
