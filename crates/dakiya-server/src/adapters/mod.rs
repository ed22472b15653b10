//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod formatters;
pub mod memory;
pub mod openai;
pub mod postgres;
pub mod twilio;

// Re-exports
pub use formatters::TwimlFormatter;
pub use memory::{InMemoryCallSessionRepository, InMemorySettingsRepository};
pub use openai::{OpenAiProvider, UnconfiguredProvider};
pub use postgres::{PgCallSessionRepository, PgSettingsRepository};
pub use twilio::TwilioClient;
