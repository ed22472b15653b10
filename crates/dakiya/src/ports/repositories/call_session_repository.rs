//! Call Session Repository Port
//!
//! The conversation state store. Keyed by session id; all continuity between
//! webhook invocations goes through this interface, never through process
//! memory.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, CallSession, CallStats, NewCallSession, SessionUpdate};

/// Repository interface for CallSession entities
#[async_trait]
pub trait CallSessionRepository: Send + Sync {
    /// Allocate a new in-progress session with an empty transcript
    async fn create(&self, new: NewCallSession) -> Result<CallSession, DomainError>;

    /// Find a session by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CallSession>, DomainError>;

    /// Find the in-progress session opened for a provider call identifier
    async fn find_active_by_call_sid(
        &self,
        call_sid: &str,
    ) -> Result<Option<CallSession>, DomainError>;

    /// Merge a partial update into a session.
    ///
    /// Returns `DomainError::NotFound` for an unknown id and
    /// `DomainError::Conflict` when the update breaks a lifecycle rule.
    async fn merge(&self, id: Uuid, update: SessionUpdate) -> Result<CallSession, DomainError>;

    /// Most recent sessions first
    async fn list_recent(&self, limit: i64) -> Result<Vec<CallSession>, DomainError>;

    /// Aggregate statistics over all sessions
    async fn stats(&self) -> Result<CallStats, DomainError>;
}
