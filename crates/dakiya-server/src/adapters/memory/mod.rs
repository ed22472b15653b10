//! In-memory Repository Implementations
//!
//! Process-local stores for development and tests. State is lost on restart.

mod call_session_repository;
mod settings_repository;

pub use call_session_repository::InMemoryCallSessionRepository;
pub use settings_repository::InMemorySettingsRepository;
