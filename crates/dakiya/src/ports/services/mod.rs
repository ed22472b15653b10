//! Service Ports
//!
//! Abstract interfaces for external collaborators.

mod llm_provider;
mod telephony;

pub use llm_provider::*;
pub use telephony::*;
