//! Call Application Service (Webhook Orchestrator)
//!
//! One telephony webhook is one state-machine transition:
//! look up the session, run the turn processor and escalation policy, merge
//! the result back into the store, and answer with the next voice reply.
//! Every path ends in a well-formed reply; errors never reach the caller.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use dakiya::domain::services::conversation::{
    handoff_message, is_unintelligible, opening_prompt, CALL_ALREADY_ENDED, REPROMPT,
    TECHNICAL_ERROR,
};
use dakiya::{
    CallSessionRepository, CallStatus, ConversationContext, DomainError, EscalationInput,
    EscalationPolicy, NewCallSession, SessionUpdate, SettingsRepository, TurnInput, TurnKind,
    TurnProcessor, VoiceReply,
};

use super::session_locks::KeyedLocks;

/// Inbound call as reported by the telephony provider
#[derive(Debug, Clone, Default)]
pub struct IncomingCall {
    pub from: Option<String>,
    pub call_sid: Option<String>,
    pub caller_name: Option<String>,
}

pub struct CallService {
    sessions: Arc<dyn CallSessionRepository>,
    settings: Arc<dyn SettingsRepository>,
    processor: TurnProcessor,
    policy: EscalationPolicy,
    session_locks: KeyedLocks<Uuid>,
    call_locks: KeyedLocks<String>,
}

impl CallService {
    pub fn new(
        sessions: Arc<dyn CallSessionRepository>,
        settings: Arc<dyn SettingsRepository>,
        processor: TurnProcessor,
        policy: EscalationPolicy,
    ) -> Self {
        Self {
            sessions,
            settings,
            processor,
            policy,
            session_locks: KeyedLocks::new(),
            call_locks: KeyedLocks::new(),
        }
    }

    /// Accept a new call: open a session and greet the caller
    pub async fn start_call(&self, call: IncomingCall) -> VoiceReply {
        match self.try_start_call(call).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Failed to accept call");
                VoiceReply::hangup(TECHNICAL_ERROR)
            }
        }
    }

    /// Handle one recognized caller utterance for `session_ref`
    pub async fn handle_speech(&self, session_ref: &str, speech: Option<&str>) -> VoiceReply {
        let Ok(session_id) = Uuid::parse_str(session_ref.trim()) else {
            tracing::warn!(session_ref, "Gather for malformed session id");
            return VoiceReply::hangup(TECHNICAL_ERROR);
        };

        let _guard = self.session_locks.lock(session_id).await;

        match self.take_turn(session_id, speech.unwrap_or_default()).await {
            Ok(reply) => reply,
            Err(e) if e.is_not_found() => {
                tracing::warn!(session_id = %session_id, "Gather for unknown session");
                VoiceReply::hangup(TECHNICAL_ERROR)
            }
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Turn failed");
                self.mark_failed(session_id).await;
                VoiceReply::hangup(TECHNICAL_ERROR)
            }
        }
    }

    async fn try_start_call(&self, call: IncomingCall) -> Result<VoiceReply, DomainError> {
        let from = call
            .from
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| DomainError::Validation("caller number missing".to_string()))?;
        let call_sid = call
            .call_sid
            .map(|sid| sid.trim().to_string())
            .filter(|sid| !sid.is_empty());

        let settings = self.settings.delivery_settings().await?;
        let greeting = opening_prompt(&settings);

        // Provider redelivery of the same call must not open a second session
        let _guard = match &call_sid {
            Some(sid) => Some(self.call_locks.lock(sid.clone()).await),
            None => None,
        };

        if let Some(sid) = &call_sid {
            if let Some(existing) = self.sessions.find_active_by_call_sid(sid).await? {
                tracing::info!(
                    session_id = %existing.id,
                    call_sid = %sid,
                    "Duplicate call start, reusing session"
                );
                return Ok(VoiceReply::listen(greeting, existing.id));
            }
        }

        let mut new = NewCallSession::new(from)
            .with_caller_name(call.caller_name)
            .with_verification_required(settings.require_otp);
        if let Some(sid) = &call_sid {
            new = new.with_call_sid(sid.clone());
        }

        let session = self.sessions.create(new).await?;
        tracing::info!(
            session_id = %session.id,
            call_sid = ?session.call_sid,
            "Call accepted"
        );

        Ok(VoiceReply::listen(greeting, session.id))
    }

    async fn take_turn(&self, session_id: Uuid, speech: &str) -> Result<VoiceReply, DomainError> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::not_found("CallSession", session_id))?;

        if session.is_terminal() {
            tracing::info!(
                session_id = %session_id,
                status = %session.status,
                "Speech after call ended"
            );
            return Ok(VoiceReply::hangup(CALL_ALREADY_ENDED));
        }

        // Nothing to judge: leave the session and the stores alone
        if is_unintelligible(speech) {
            tracing::warn!(session_id = %session_id, "Unintelligible speech, asking again");
            return Ok(VoiceReply::listen(REPROMPT, session_id));
        }

        let settings = self.settings.delivery_settings().await?;
        let ai = self.settings.ai_configuration().await?;
        let context =
            ConversationContext::new(&settings, &session.facts).with_ai_configuration(&ai);

        let outcome = self
            .processor
            .process(TurnInput {
                transcript: &session.transcript,
                context: &context,
                utterance: speech,
            })
            .await;

        if outcome.kind == TurnKind::Reprompt {
            return Ok(VoiceReply::listen(outcome.response(), session_id));
        }

        let turn = session.turn_count() + 1;
        let decision = self.policy.evaluate(&EscalationInput {
            elapsed: session.elapsed(Utc::now()),
            turn_count: turn,
            threshold: settings.escalation_threshold(),
            requested: outcome.should_escalate(),
            completed: outcome.is_completed(),
        });

        let message = if decision.is_override() {
            handoff_message(outcome.response(), &settings)
        } else {
            outcome.response().to_string()
        };

        let mut update =
            SessionUpdate::turn(speech.trim(), message.as_str()).with_facts(outcome.facts_patch());
        if decision.escalate {
            update = update.with_status(CallStatus::Escalated);
        } else if outcome.is_completed() {
            update = update.with_status(CallStatus::Completed);
        }

        let updated = self.sessions.merge(session_id, update).await?;

        tracing::info!(
            session_id = %session_id,
            turn,
            status = %updated.status,
            reason = ?decision.reason,
            "Turn processed"
        );

        if updated.is_terminal() {
            Ok(VoiceReply::hangup(message))
        } else {
            Ok(VoiceReply::listen(message, session_id))
        }
    }

    /// Best effort: record the fault on the call log without touching the transcript
    async fn mark_failed(&self, session_id: Uuid) {
        match self
            .sessions
            .merge(session_id, SessionUpdate::status(CallStatus::Failed))
            .await
        {
            Ok(_) => tracing::info!(session_id = %session_id, "Call marked failed"),
            Err(e) => tracing::warn!(
                session_id = %session_id,
                error = %e,
                "Could not mark call failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use dakiya::domain::services::conversation::{FAILURE_APOLOGY, HANDOFF_NOTICE};
    use std::sync::atomic::{AtomicBool, Ordering};
    use dakiya::testing::ScriptedProvider;
    use dakiya::{
        AiConfiguration, CallSession, CallStats, DeliverySettings, TranscriptEntry,
    };

    use crate::adapters::{InMemoryCallSessionRepository, InMemorySettingsRepository};

    const CALLER: &str = "+91 98765 43210";

    struct Harness {
        service: CallService,
        sessions: Arc<InMemoryCallSessionRepository>,
        provider: Arc<ScriptedProvider>,
    }

    fn harness_with(settings: DeliverySettings, policy: EscalationPolicy) -> Harness {
        let sessions = Arc::new(InMemoryCallSessionRepository::new());
        let provider = Arc::new(ScriptedProvider::new());
        let service = CallService::new(
            sessions.clone(),
            Arc::new(InMemorySettingsRepository::with_delivery_settings(settings)),
            TurnProcessor::new(provider.clone())
                .with_timeout(std::time::Duration::from_millis(200)),
            policy,
        );
        Harness {
            service,
            sessions,
            provider,
        }
    }

    fn harness() -> Harness {
        harness_with(DeliverySettings::default(), EscalationPolicy::new())
    }

    fn incoming(sid: &str) -> IncomingCall {
        IncomingCall {
            from: Some(CALLER.to_string()),
            call_sid: Some(sid.to_string()),
            caller_name: None,
        }
    }

    fn session_id(reply: &VoiceReply) -> Uuid {
        let action = reply.action().expect("listening reply");
        Uuid::parse_str(action.trim_start_matches("/gather/")).unwrap()
    }

    async fn load(h: &Harness, id: Uuid) -> CallSession {
        h.sessions.find_by_id(id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_call_start_opens_session_and_listens() {
        let h = harness();
        let reply = h.service.start_call(incoming("CA1")).await;

        assert!(reply.is_listening());
        assert!(reply.message().starts_with("Namaste!"));

        let session = load(&h, session_id(&reply)).await;
        assert_eq!(session.status, CallStatus::InProgress);
        assert_eq!(session.phone_number, CALLER);
        assert!(session.transcript.is_empty());
        assert!(session.ended_at.is_none());
        assert_eq!(session.facts.verification_required, Some(false));
    }

    #[tokio::test]
    async fn test_duplicate_call_start_reuses_session() {
        let h = harness();
        let first = h.service.start_call(incoming("CA1")).await;
        let second = h.service.start_call(incoming("CA1")).await;

        assert_eq!(session_id(&first), session_id(&second));
        assert_eq!(h.sessions.list_recent(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_call_start_without_caller_hangs_up() {
        let h = harness();
        let reply = h.service.start_call(IncomingCall::default()).await;
        assert!(!reply.is_listening());
        assert_eq!(reply.message(), TECHNICAL_ERROR);
    }

    #[tokio::test]
    async fn test_turn_continues_conversation() {
        let h = harness();
        let id = session_id(&h.service.start_call(incoming("CA1")).await);
        h.provider.push(Ok(
            r#"{"response":"Package ID bataiye","shouldEscalate":false,"extractedInfo":{"isCompleted":false}}"#
                .to_string(),
        ));

        let reply = h
            .service
            .handle_speech(&id.to_string(), Some("Package deliver karna hai"))
            .await;

        assert!(reply.is_listening());
        assert_eq!(reply.message(), "Package ID bataiye");
        assert_eq!(reply.action(), Some(format!("/gather/{}", id).as_str()));

        let session = load(&h, id).await;
        assert_eq!(session.status, CallStatus::InProgress);
        assert_eq!(
            session.transcript,
            vec![
                TranscriptEntry::caller("Package deliver karna hai"),
                TranscriptEntry::assistant("Package ID bataiye"),
            ]
        );
    }

    #[tokio::test]
    async fn test_completion_finalizes_call() {
        let h = harness();
        let id = session_id(&h.service.start_call(incoming("CA1")).await);
        h.provider.push(Ok(
            r#"{"response":"Dhanyavaad!","extractedInfo":{"packageId":"PKG-7","codAmount":450,"isCompleted":true}}"#
                .to_string(),
        ));

        let reply = h
            .service
            .handle_speech(&id.to_string(), Some("PKG-7 deliver ho gaya, 450 liye"))
            .await;

        assert!(!reply.is_listening());
        assert_eq!(reply.message(), "Dhanyavaad!");

        let session = load(&h, id).await;
        assert_eq!(session.status, CallStatus::Completed);
        assert!(session.ended_at.is_some());
        assert!(session.duration_secs.is_some());
        assert_eq!(session.facts.package_id.as_deref(), Some("PKG-7"));
        assert_eq!(session.facts.cod_amount, Some(450));
    }

    #[tokio::test]
    async fn test_facts_carry_forward_across_turns() {
        let h = harness();
        let id = session_id(&h.service.start_call(incoming("CA1")).await);
        h.provider.push(Ok(
            r#"{"response":"OTP?","extractedInfo":{"packageId":"PKG-1"}}"#.to_string(),
        ));
        h.provider.push(Ok(
            r#"{"response":"Theek hai","extractedInfo":{"packageId":null,"otpProvided":"4321"}}"#
                .to_string(),
        ));

        h.service.handle_speech(&id.to_string(), Some("PKG-1")).await;
        h.service.handle_speech(&id.to_string(), Some("OTP 4321")).await;

        let session = load(&h, id).await;
        assert_eq!(session.transcript.len(), 4);
        assert_eq!(session.facts.package_id.as_deref(), Some("PKG-1"));
        assert_eq!(session.facts.otp_provided.as_deref(), Some("4321"));
    }

    #[tokio::test]
    async fn test_empty_speech_reprompts_without_mutation() {
        let h = harness();
        let id = session_id(&h.service.start_call(incoming("CA1")).await);

        for speech in [Some(""), None, Some("  ")] {
            let reply = h.service.handle_speech(&id.to_string(), speech).await;
            assert!(reply.is_listening());
            assert_eq!(reply.message(), REPROMPT);
        }

        let session = load(&h, id).await;
        assert_eq!(session.status, CallStatus::InProgress);
        assert!(session.transcript.is_empty());
        assert_eq!(h.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_duration_threshold_escalates() {
        let h = harness();
        let mut session = CallSession::open(NewCallSession::new(CALLER)).unwrap();
        session.created_at = Utc::now() - Duration::minutes(4);
        for i in 0..3 {
            session.transcript.push(TranscriptEntry::caller(format!("turn {}", i)));
            session.transcript.push(TranscriptEntry::assistant("haan ji"));
        }
        let id = session.id;
        h.sessions.insert(session).await;
        h.provider.push(Ok(
            r#"{"response":"Ek minute","shouldEscalate":false,"extractedInfo":{"isCompleted":false}}"#
                .to_string(),
        ));

        let reply = h.service.handle_speech(&id.to_string(), Some("abhi bhi wait")).await;

        assert!(!reply.is_listening());
        assert!(reply.message().starts_with("Ek minute"));
        assert!(reply.message().contains(HANDOFF_NOTICE));

        let session = load(&h, id).await;
        assert_eq!(session.status, CallStatus::Escalated);
        assert!(session.ended_at.is_some());
        assert_eq!(session.transcript.len(), 8);
    }

    #[tokio::test]
    async fn test_duration_threshold_wins_over_completion() {
        let h = harness();
        let mut session = CallSession::open(NewCallSession::new(CALLER)).unwrap();
        session.created_at = Utc::now() - Duration::minutes(10);
        let id = session.id;
        h.sessions.insert(session).await;
        h.provider.push(Ok(
            r#"{"response":"Ho gaya","extractedInfo":{"isCompleted":true}}"#.to_string(),
        ));

        h.service.handle_speech(&id.to_string(), Some("deliver ho gaya")).await;

        assert_eq!(load(&h, id).await.status, CallStatus::Escalated);
    }

    #[tokio::test]
    async fn test_zero_threshold_disables_duration_escalation() {
        let h = harness_with(
            DeliverySettings {
                escalation_threshold_minutes: 0,
                ..Default::default()
            },
            EscalationPolicy::new(),
        );
        let mut session = CallSession::open(NewCallSession::new(CALLER)).unwrap();
        session.created_at = Utc::now() - Duration::hours(1);
        let id = session.id;
        h.sessions.insert(session).await;
        h.provider.push(Ok(r#"{"response":"Boliye"}"#.to_string()));

        let reply = h.service.handle_speech(&id.to_string(), Some("hello")).await;

        assert!(reply.is_listening());
        assert_eq!(load(&h, id).await.status, CallStatus::InProgress);
    }

    #[tokio::test]
    async fn test_turn_cap_escalates() {
        let h = harness_with(
            DeliverySettings::default(),
            EscalationPolicy::new().with_max_turns(Some(2)),
        );
        let id = session_id(&h.service.start_call(incoming("CA1")).await);
        h.provider.push(Ok(r#"{"response":"Boliye"}"#.to_string()));
        h.provider.push(Ok(r#"{"response":"Phir se boliye"}"#.to_string()));

        let first = h.service.handle_speech(&id.to_string(), Some("hello")).await;
        assert!(first.is_listening());

        let second = h.service.handle_speech(&id.to_string(), Some("hello?")).await;
        assert!(!second.is_listening());
        assert_eq!(load(&h, id).await.status, CallStatus::Escalated);
    }

    #[tokio::test]
    async fn test_assistant_escalation() {
        let h = harness();
        let id = session_id(&h.service.start_call(incoming("CA1")).await);
        h.provider.push(Ok(
            r#"{"response":"Main aapko connect karti hun","shouldEscalate":true}"#.to_string(),
        ));

        let reply = h.service.handle_speech(&id.to_string(), Some("address galat hai")).await;

        assert!(!reply.is_listening());
        assert_eq!(reply.message(), "Main aapko connect karti hun");
        assert_eq!(load(&h, id).await.status, CallStatus::Escalated);
    }

    #[tokio::test]
    async fn test_collaborator_failure_forces_escalation() {
        let h = harness();
        let id = session_id(&h.service.start_call(incoming("CA1")).await);
        h.provider
            .push(Err(DomainError::ExternalService("quota".to_string())));

        let reply = h.service.handle_speech(&id.to_string(), Some("hello")).await;

        assert!(!reply.is_listening());
        assert_eq!(reply.message(), FAILURE_APOLOGY);

        let session = load(&h, id).await;
        assert_eq!(session.status, CallStatus::Escalated);
        assert_eq!(session.transcript.len(), 2);
        assert!(session.ended_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_session_hangs_up() {
        let h = harness();
        for session_ref in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let reply = h.service.handle_speech(&session_ref, Some("hello")).await;
            assert!(!reply.is_listening());
            assert_eq!(reply.message(), TECHNICAL_ERROR);
        }
        assert!(h.sessions.list_recent(10).await.unwrap().is_empty());
        assert_eq!(h.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_speech_after_call_ended() {
        let h = harness();
        let id = session_id(&h.service.start_call(incoming("CA1")).await);
        h.sessions
            .merge(id, SessionUpdate::status(CallStatus::Completed))
            .await
            .unwrap();

        let reply = h.service.handle_speech(&id.to_string(), Some("hello")).await;

        assert!(!reply.is_listening());
        assert_eq!(reply.message(), CALL_ALREADY_ENDED);
        let session = load(&h, id).await;
        assert_eq!(session.status, CallStatus::Completed);
        assert!(session.transcript.is_empty());
    }

    /// Store whose writes always fail, to exercise the fault path
    struct BrokenWrites(InMemoryCallSessionRepository);

    #[async_trait]
    impl CallSessionRepository for BrokenWrites {
        async fn create(&self, new: NewCallSession) -> Result<CallSession, DomainError> {
            self.0.create(new).await
        }
        async fn find_by_id(&self, id: Uuid) -> Result<Option<CallSession>, DomainError> {
            self.0.find_by_id(id).await
        }
        async fn find_active_by_call_sid(
            &self,
            call_sid: &str,
        ) -> Result<Option<CallSession>, DomainError> {
            self.0.find_active_by_call_sid(call_sid).await
        }
        async fn merge(&self, _id: Uuid, _u: SessionUpdate) -> Result<CallSession, DomainError> {
            Err(DomainError::Repository("disk full".to_string()))
        }
        async fn list_recent(&self, limit: i64) -> Result<Vec<CallSession>, DomainError> {
            self.0.list_recent(limit).await
        }
        async fn stats(&self) -> Result<CallStats, DomainError> {
            self.0.stats().await
        }
    }

    #[tokio::test]
    async fn test_internal_fault_hangs_up_gracefully() {
        let sessions = Arc::new(BrokenWrites(InMemoryCallSessionRepository::new()));
        let provider = Arc::new(ScriptedProvider::new().reply(r#"{"response":"ok"}"#));
        let service = CallService::new(
            sessions.clone(),
            Arc::new(InMemorySettingsRepository::new()),
            TurnProcessor::new(provider),
            EscalationPolicy::new(),
        );

        let id = session_id(&service.start_call(incoming("CA1")).await);
        let reply = service.handle_speech(&id.to_string(), Some("hello")).await;

        assert!(!reply.is_listening());
        assert_eq!(reply.message(), TECHNICAL_ERROR);
        let session = sessions.find_by_id(id).await.unwrap().unwrap();
        assert!(session.transcript.is_empty());
    }

    /// Settings store that starts failing once `broken` is set
    #[derive(Default)]
    struct FlakySettings {
        inner: InMemorySettingsRepository,
        broken: AtomicBool,
    }

    impl FlakySettings {
        fn check(&self) -> Result<(), DomainError> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(DomainError::Repository("connection reset".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SettingsRepository for FlakySettings {
        async fn delivery_settings(&self) -> Result<DeliverySettings, DomainError> {
            self.check()?;
            self.inner.delivery_settings().await
        }
        async fn save_delivery_settings(
            &self,
            settings: &DeliverySettings,
        ) -> Result<DeliverySettings, DomainError> {
            self.check()?;
            self.inner.save_delivery_settings(settings).await
        }
        async fn ai_configuration(&self) -> Result<AiConfiguration, DomainError> {
            self.check()?;
            self.inner.ai_configuration().await
        }
        async fn save_ai_configuration(
            &self,
            config: &AiConfiguration,
        ) -> Result<AiConfiguration, DomainError> {
            self.check()?;
            self.inner.save_ai_configuration(config).await
        }
    }

    #[tokio::test]
    async fn test_empty_speech_does_not_touch_settings() {
        let sessions = Arc::new(InMemoryCallSessionRepository::new());
        let settings = Arc::new(FlakySettings::default());
        let provider = Arc::new(ScriptedProvider::new());
        let service = CallService::new(
            sessions.clone(),
            settings.clone(),
            TurnProcessor::new(provider.clone()),
            EscalationPolicy::new(),
        );

        let id = session_id(&service.start_call(incoming("CA1")).await);
        settings.broken.store(true, Ordering::SeqCst);

        let reply = service.handle_speech(&id.to_string(), Some("  ")).await;

        assert!(reply.is_listening());
        assert_eq!(reply.message(), REPROMPT);
        let session = sessions.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(session.status, CallStatus::InProgress);
        assert!(session.ended_at.is_none());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_prompt_reflects_ai_configuration() {
        let sessions = Arc::new(InMemoryCallSessionRepository::new());
        let settings = Arc::new(InMemorySettingsRepository::new());
        settings
            .save_ai_configuration(&AiConfiguration {
                hindi_proficiency: 30,
                ..Default::default()
            })
            .await
            .unwrap();
        let provider = Arc::new(ScriptedProvider::new().reply(r#"{"response":"ok"}"#));
        let service = CallService::new(
            sessions,
            settings,
            TurnProcessor::new(provider.clone()),
            EscalationPolicy::new(),
        );

        let id = session_id(&service.start_call(incoming("CA1")).await);
        service.handle_speech(&id.to_string(), Some("hello")).await;

        let system = &provider.last_messages().unwrap()[0].content;
        assert!(system.contains("roughly 30% Hindi"));
    }

    #[tokio::test]
    async fn test_concurrent_turns_on_one_session_are_serialized() {
        let h = harness();
        let service = Arc::new(h.service);
        let id = session_id(&service.start_call(incoming("CA1")).await);
        for _ in 0..5 {
            h.provider.push(Ok(r#"{"response":"haan"}"#.to_string()));
        }

        let handles: Vec<_> = (0..5)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    let line = format!("line {}", i);
                    service
                        .handle_speech(&id.to_string(), Some(line.as_str()))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let session = h.sessions.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(session.transcript.len(), 10);
    }
}
