//! Turn Processor
//!
//! Turns one caller utterance into the assistant's spoken response, an
//! escalation request, and extracted delivery facts. Never fails: a language
//! model that errors, times out, or answers with something other than a JSON
//! object yields a forced escalation with an apology.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{FactsPatch, TranscriptEntry};
use crate::domain::errors::DomainError;
use crate::ports::{CompletionOptions, LlmProvider};

use super::conversation::{
    build_messages, is_unintelligible, parse_reply, AssistantReply, ConversationContext,
    ExtractedInfo, FAILURE_APOLOGY, REPROMPT,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One caller turn with everything it is judged against
#[derive(Debug, Clone, Copy)]
pub struct TurnInput<'a> {
    /// Prior turns, oldest first
    pub transcript: &'a [TranscriptEntry],
    pub context: &'a ConversationContext,
    pub utterance: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// Speech was empty; ask again without consulting the model
    Reprompt,
    /// The model answered with a usable reply
    Answered,
    /// The model failed; the call goes to a human
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub kind: TurnKind,
    pub reply: AssistantReply,
}

impl TurnOutcome {
    fn reprompt() -> Self {
        Self {
            kind: TurnKind::Reprompt,
            reply: AssistantReply {
                response: REPROMPT.to_string(),
                should_escalate: false,
                extracted: ExtractedInfo::default(),
            },
        }
    }

    fn fallback() -> Self {
        Self {
            kind: TurnKind::Fallback,
            reply: AssistantReply {
                response: FAILURE_APOLOGY.to_string(),
                should_escalate: true,
                extracted: ExtractedInfo::default(),
            },
        }
    }

    pub fn response(&self) -> &str {
        &self.reply.response
    }

    pub fn should_escalate(&self) -> bool {
        self.reply.should_escalate
    }

    pub fn is_completed(&self) -> bool {
        self.reply.extracted.is_completed
    }

    pub fn facts_patch(&self) -> FactsPatch {
        self.reply.extracted.facts_patch()
    }
}

#[derive(Clone)]
pub struct TurnProcessor {
    provider: Arc<dyn LlmProvider>,
    options: CompletionOptions,
    timeout: Duration,
}

impl TurnProcessor {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            options: CompletionOptions::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn process(&self, input: TurnInput<'_>) -> TurnOutcome {
        if is_unintelligible(input.utterance) {
            tracing::debug!("Unintelligible speech, re-prompting");
            return TurnOutcome::reprompt();
        }

        match self.ask(&input).await {
            Ok(reply) => TurnOutcome {
                kind: TurnKind::Answered,
                reply,
            },
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.provider_name(),
                    model = self.provider.model_id(),
                    error = %e,
                    "Language model turn failed, forcing escalation"
                );
                TurnOutcome::fallback()
            }
        }
    }

    async fn ask(&self, input: &TurnInput<'_>) -> Result<AssistantReply, DomainError> {
        let messages = build_messages(
            &input.context.system_prompt(),
            input.transcript,
            input.utterance,
        );

        let response = tokio::time::timeout(
            self.timeout,
            self.provider.complete(&messages, &self.options),
        )
        .await
        .map_err(|_| DomainError::Timeout(self.timeout.as_millis() as u64))??;

        tracing::debug!(
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            tokens = response.usage.total_tokens,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "Language model replied"
        );

        parse_reply(&response.content)
    }
}

impl std::fmt::Debug for TurnProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnProcessor")
            .field("provider", &self.provider.provider_name())
            .field("options", &self.options)
            .field("timeout", &self.timeout)
            .finish()
    }
}
