//! In-memory implementation of CallSessionRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use dakiya::{
    CallSession, CallSessionRepository, CallStats, DomainError, NewCallSession, SessionUpdate,
};

#[derive(Default)]
pub struct InMemoryCallSessionRepository {
    sessions: RwLock<HashMap<Uuid, CallSession>>,
}

impl InMemoryCallSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fully built session as-is (for seeding state in tests)
    #[cfg(test)]
    pub async fn insert(&self, session: CallSession) {
        self.sessions.write().await.insert(session.id, session);
    }
}

#[async_trait]
impl CallSessionRepository for InMemoryCallSessionRepository {
    async fn create(&self, new: NewCallSession) -> Result<CallSession, DomainError> {
        let session = CallSession::open(new)?;
        let mut sessions = self.sessions.write().await;

        if let Some(sid) = &session.call_sid {
            let duplicate = sessions
                .values()
                .any(|s| !s.is_terminal() && s.call_sid.as_ref() == Some(sid));
            if duplicate {
                return Err(DomainError::Conflict(format!(
                    "call {} already has an active session",
                    sid
                )));
            }
        }

        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CallSession>, DomainError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn find_active_by_call_sid(
        &self,
        call_sid: &str,
    ) -> Result<Option<CallSession>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .find(|s| !s.is_terminal() && s.call_sid.as_deref() == Some(call_sid))
            .cloned())
    }

    async fn merge(&self, id: Uuid, update: SessionUpdate) -> Result<CallSession, DomainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("CallSession", id))?;

        session.apply(update, Utc::now())?;
        Ok(session.clone())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<CallSession>, DomainError> {
        let mut sessions: Vec<CallSession> =
            self.sessions.read().await.values().cloned().collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions.truncate(limit.max(0) as usize);
        Ok(sessions)
    }

    async fn stats(&self) -> Result<CallStats, DomainError> {
        Ok(CallStats::from_sessions(self.sessions.read().await.values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dakiya::{CallStatus, FactsPatch};

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryCallSessionRepository::new();
        let session = repo
            .create(NewCallSession::new("+91 98765 43210").with_call_sid("CA1"))
            .await
            .unwrap();

        let found = repo.find_by_id(session.id).await.unwrap().unwrap();
        assert_eq!(found.status, CallStatus::InProgress);
        assert!(found.transcript.is_empty());
        assert!(found.facts.is_empty());
        assert!(found.ended_at.is_none());

        let by_sid = repo.find_active_by_call_sid("CA1").await.unwrap();
        assert_eq!(by_sid.map(|s| s.id), Some(session.id));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = std::sync::Arc::new(InMemoryCallSessionRepository::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(NewCallSession::new(format!("+91 90000 000{:02}", i)))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn test_merge_unknown_is_not_found() {
        let repo = InMemoryCallSessionRepository::new();
        let err = repo
            .merge(Uuid::new_v4(), SessionUpdate::turn("hi", "hello"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_merge_appends_and_carries_facts_forward() {
        let repo = InMemoryCallSessionRepository::new();
        let id = repo
            .create(NewCallSession::new("+91 98765 43210"))
            .await
            .unwrap()
            .id;

        repo.merge(
            id,
            SessionUpdate::turn("PKG-1 hai", "OTP bataiye").with_facts(FactsPatch {
                package_id: Some("PKG-1".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let session = repo
            .merge(
                id,
                SessionUpdate::turn("500 rupaye liye", "Theek hai").with_facts(FactsPatch {
                    cod_amount: Some(500),
                    ..Default::default()
                }),
            )
            .await
            .unwrap();

        assert_eq!(session.transcript.len(), 4);
        assert_eq!(session.facts.package_id.as_deref(), Some("PKG-1"));
        assert_eq!(session.facts.cod_amount, Some(500));
    }

    #[tokio::test]
    async fn test_finished_session_rejects_new_turns() {
        let repo = InMemoryCallSessionRepository::new();
        let id = repo
            .create(NewCallSession::new("+91 98765 43210").with_call_sid("CA9"))
            .await
            .unwrap()
            .id;

        let done = repo
            .merge(id, SessionUpdate::status(CallStatus::Completed))
            .await
            .unwrap();
        assert!(done.ended_at.is_some());
        assert!(repo.find_active_by_call_sid("CA9").await.unwrap().is_none());

        let err = repo
            .merge(id, SessionUpdate::turn("hello", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(repo.find_by_id(id).await.unwrap().unwrap().transcript.is_empty());
    }

    #[tokio::test]
    async fn test_list_recent_and_stats() {
        let repo = InMemoryCallSessionRepository::new();
        let first = repo.create(NewCallSession::new("+911")).await.unwrap();
        let second = repo.create(NewCallSession::new("+912")).await.unwrap();
        repo.merge(first.id, SessionUpdate::status(CallStatus::Completed))
            .await
            .unwrap();
        repo.merge(second.id, SessionUpdate::status(CallStatus::Escalated))
            .await
            .unwrap();

        let recent = repo.list_recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total_calls, 2);
        assert_eq!(stats.successful_deliveries, 1);
        assert_eq!(stats.escalated_calls, 1);
        assert_eq!(stats.success_rate, 50.0);
    }
}
