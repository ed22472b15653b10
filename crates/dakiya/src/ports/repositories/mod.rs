//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod call_session_repository;
mod settings_repository;

pub use call_session_repository::*;
pub use settings_repository::*;
