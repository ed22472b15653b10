//! PostgreSQL implementation of CallSessionRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use dakiya::{
    CallSession, CallSessionRepository, CallStats, CallStatus, DomainError, ExtractedFacts,
    NewCallSession, SessionUpdate, TranscriptEntry,
};

use super::repository_error;

/// PostgreSQL implementation of CallSessionRepository
pub struct PgCallSessionRepository {
    pool: PgPool,
}

impl PgCallSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct CallSessionRow {
    id: Uuid,
    call_sid: Option<String>,
    phone_number: String,
    caller_name: Option<String>,
    status: String,
    transcript: Json<Vec<TranscriptEntry>>,
    package_id: Option<String>,
    cod_amount: Option<i64>,
    otp_provided: Option<String>,
    verification_required: Option<bool>,
    delivery_instructions: Option<String>,
    duration_secs: Option<i64>,
    created_at: chrono::DateTime<chrono::Utc>,
    ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<CallSessionRow> for CallSession {
    type Error = DomainError;

    fn try_from(row: CallSessionRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<CallStatus>()
            .map_err(DomainError::Repository)?;

        Ok(Self {
            id: row.id,
            call_sid: row.call_sid,
            phone_number: row.phone_number,
            caller_name: row.caller_name,
            status,
            transcript: row.transcript.0,
            facts: ExtractedFacts {
                package_id: row.package_id,
                cod_amount: row.cod_amount,
                otp_provided: row.otp_provided,
                verification_required: row.verification_required,
            },
            delivery_instructions: row.delivery_instructions,
            duration_secs: row.duration_secs,
            created_at: row.created_at,
            ended_at: row.ended_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total_calls: i64,
    successful_deliveries: i64,
    escalated_calls: i64,
    average_duration: Option<f64>,
}

#[async_trait]
impl CallSessionRepository for PgCallSessionRepository {
    async fn create(&self, new: NewCallSession) -> Result<CallSession, DomainError> {
        let session = CallSession::open(new)?;

        let row = sqlx::query_as::<_, CallSessionRow>(
            r#"
            INSERT INTO call_sessions
                (id, call_sid, phone_number, caller_name, status, transcript,
                 verification_required, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(session.id)
        .bind(&session.call_sid)
        .bind(&session.phone_number)
        .bind(&session.caller_name)
        .bind(session.status.as_str())
        .bind(Json(&session.transcript))
        .bind(session.facts.verification_required)
        .bind(session.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CallSession>, DomainError> {
        let row =
            sqlx::query_as::<_, CallSessionRow>("SELECT * FROM call_sessions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(repository_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_active_by_call_sid(
        &self,
        call_sid: &str,
    ) -> Result<Option<CallSession>, DomainError> {
        let row = sqlx::query_as::<_, CallSessionRow>(
            r#"
            SELECT * FROM call_sessions
            WHERE call_sid = $1 AND status = 'in_progress'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(call_sid)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn merge(&self, id: Uuid, update: SessionUpdate) -> Result<CallSession, DomainError> {
        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        // Row lock serializes merges across server instances
        let row = sqlx::query_as::<_, CallSessionRow>(
            "SELECT * FROM call_sessions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(repository_error)?
        .ok_or_else(|| DomainError::not_found("CallSession", id))?;

        let mut session = CallSession::try_from(row)?;
        session.apply(update, Utc::now())?;

        let row = sqlx::query_as::<_, CallSessionRow>(
            r#"
            UPDATE call_sessions
            SET caller_name = $2,
                status = $3,
                transcript = $4,
                package_id = $5,
                cod_amount = $6,
                otp_provided = $7,
                verification_required = $8,
                delivery_instructions = $9,
                duration_secs = $10,
                ended_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(session.id)
        .bind(&session.caller_name)
        .bind(session.status.as_str())
        .bind(Json(&session.transcript))
        .bind(&session.facts.package_id)
        .bind(session.facts.cod_amount)
        .bind(&session.facts.otp_provided)
        .bind(session.facts.verification_required)
        .bind(&session.delivery_instructions)
        .bind(session.duration_secs)
        .bind(session.ended_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(repository_error)?;

        tx.commit().await.map_err(repository_error)?;

        row.try_into()
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<CallSession>, DomainError> {
        let rows = sqlx::query_as::<_, CallSessionRow>(
            "SELECT * FROM call_sessions ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn stats(&self) -> Result<CallStats, DomainError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) AS total_calls,
                COUNT(*) FILTER (WHERE status = 'completed') AS successful_deliveries,
                COUNT(*) FILTER (WHERE status = 'escalated') AS escalated_calls,
                AVG(duration_secs)::DOUBLE PRECISION AS average_duration
            FROM call_sessions
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(CallStats::from_counts(
            row.total_calls,
            row.successful_deliveries,
            row.escalated_calls,
            row.average_duration,
        ))
    }
}
