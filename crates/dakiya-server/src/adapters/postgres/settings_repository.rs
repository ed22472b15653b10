//! PostgreSQL implementation of SettingsRepository
//!
//! Both tables hold a single row with `id = 1`, seeded by the migration.

use async_trait::async_trait;
use sqlx::PgPool;

use dakiya::{AiConfiguration, DeliverySettings, DomainError, SettingsRepository};

use super::repository_error;

pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DeliverySettingsRow {
    default_instructions: String,
    emergency_contacts: Vec<String>,
    allow_cod: bool,
    require_otp: bool,
    escalation_threshold_minutes: i32,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<DeliverySettingsRow> for DeliverySettings {
    fn from(row: DeliverySettingsRow) -> Self {
        Self {
            default_instructions: row.default_instructions,
            emergency_contacts: row.emergency_contacts,
            allow_cod: row.allow_cod,
            require_otp: row.require_otp,
            escalation_threshold_minutes: row.escalation_threshold_minutes,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AiConfigurationRow {
    voice_model: String,
    language: String,
    response_speed: String,
    personality_tone: String,
    hindi_proficiency: i32,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<AiConfigurationRow> for AiConfiguration {
    fn from(row: AiConfigurationRow) -> Self {
        Self {
            voice_model: row.voice_model,
            language: row.language,
            response_speed: row.response_speed,
            personality_tone: row.personality_tone,
            hindi_proficiency: row.hindi_proficiency,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn delivery_settings(&self) -> Result<DeliverySettings, DomainError> {
        let row = sqlx::query_as::<_, DeliverySettingsRow>(
            r#"
            SELECT default_instructions, emergency_contacts, allow_cod, require_otp,
                   escalation_threshold_minutes, updated_at
            FROM delivery_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.map(Into::into).unwrap_or_default())
    }

    async fn save_delivery_settings(
        &self,
        settings: &DeliverySettings,
    ) -> Result<DeliverySettings, DomainError> {
        let row = sqlx::query_as::<_, DeliverySettingsRow>(
            r#"
            INSERT INTO delivery_settings
                (id, default_instructions, emergency_contacts, allow_cod, require_otp,
                 escalation_threshold_minutes, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, NOW())
            ON CONFLICT (id) DO UPDATE
            SET default_instructions = EXCLUDED.default_instructions,
                emergency_contacts = EXCLUDED.emergency_contacts,
                allow_cod = EXCLUDED.allow_cod,
                require_otp = EXCLUDED.require_otp,
                escalation_threshold_minutes = EXCLUDED.escalation_threshold_minutes,
                updated_at = NOW()
            RETURNING default_instructions, emergency_contacts, allow_cod, require_otp,
                      escalation_threshold_minutes, updated_at
            "#,
        )
        .bind(&settings.default_instructions)
        .bind(&settings.emergency_contacts)
        .bind(settings.allow_cod)
        .bind(settings.require_otp)
        .bind(settings.escalation_threshold_minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.into())
    }

    async fn ai_configuration(&self) -> Result<AiConfiguration, DomainError> {
        let row = sqlx::query_as::<_, AiConfigurationRow>(
            r#"
            SELECT voice_model, language, response_speed, personality_tone,
                   hindi_proficiency, updated_at
            FROM ai_configuration
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.map(Into::into).unwrap_or_default())
    }

    async fn save_ai_configuration(
        &self,
        config: &AiConfiguration,
    ) -> Result<AiConfiguration, DomainError> {
        let row = sqlx::query_as::<_, AiConfigurationRow>(
            r#"
            INSERT INTO ai_configuration
                (id, voice_model, language, response_speed, personality_tone,
                 hindi_proficiency, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, NOW())
            ON CONFLICT (id) DO UPDATE
            SET voice_model = EXCLUDED.voice_model,
                language = EXCLUDED.language,
                response_speed = EXCLUDED.response_speed,
                personality_tone = EXCLUDED.personality_tone,
                hindi_proficiency = EXCLUDED.hindi_proficiency,
                updated_at = NOW()
            RETURNING voice_model, language, response_speed, personality_tone,
                      hindi_proficiency, updated_at
            "#,
        )
        .bind(&config.voice_model)
        .bind(&config.language)
        .bind(&config.response_speed)
        .bind(&config.personality_tone)
        .bind(config.hindi_proficiency)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(row.into())
    }
}
