//! PostgreSQL Repository Implementations

mod call_session_repository;
mod settings_repository;

pub use call_session_repository::PgCallSessionRepository;
pub use settings_repository::PgSettingsRepository;

use dakiya::DomainError;

const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error into the domain, keeping unique violations distinguishable
fn repository_error(e: sqlx::Error) -> DomainError {
    let unique_violation = e
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if unique_violation {
        DomainError::Conflict(e.to_string())
    } else {
        DomainError::Repository(e.to_string())
    }
}
