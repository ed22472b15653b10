//! Domain Services
//!
//! The per-turn conversation logic. Stateless: everything a turn needs is
//! passed in, and the results are applied to the session by the caller.

pub mod conversation;
mod escalation;
mod turn_processor;

pub use conversation::{AssistantReply, ConversationContext, ExtractedInfo};
pub use escalation::*;
pub use turn_processor::*;
