//! Dakiya Domain Library
//!
//! Core domain types and interfaces for the Dakiya delivery voice assistant.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (CallSession, DeliverySettings, AiConfiguration)
//!   - `value_objects/`: Immutable value types (CallStatus, Speaker)
//!   - `services/`: Conversation state machine (TurnProcessor, EscalationPolicy)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Conversation state and settings storage
//!   - `services/`: Language model and telephony collaborators
//!
//! # Usage
//!
//! ```rust,ignore
//! use dakiya::domain::{CallSession, TurnProcessor, EscalationPolicy};
//! use dakiya::ports::{CallSessionRepository, LlmProvider};
//! ```

pub mod domain;
pub mod ports;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use domain::{
    AiConfiguration, AssistantReply, CallSession, CallStats, CallStatus, ConversationContext,
    DeliverySettings, DomainError, EscalationDecision, EscalationInput, EscalationPolicy,
    EscalationReason, ExtractedFacts, ExtractedInfo, FactsPatch, NewCallSession, SessionUpdate,
    Speaker, TranscriptEntry, TurnInput, TurnKind, TurnOutcome, TurnProcessor, VoiceReply,
};
pub use ports::{
    // Repositories
    CallSessionRepository,
    // Services
    ChatMessage,
    CompletionOptions,
    CompletionResponse,
    LlmProvider,
    MessageRole,
    OutboundCall,
    SettingsRepository,
    TelephonyClient,
    TokenUsage,
};
