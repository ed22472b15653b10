//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - CallSession: One phone call's conversation state
//! - DeliverySettings: Business rules read on every turn
//! - AiConfiguration: Voice and tone parameters
//! - CallStats: Aggregates for the dashboard
//! - VoiceReply: Next instruction for the telephony provider

mod ai_configuration;
mod call_session;
mod call_stats;
mod delivery_settings;
mod voice_reply;

pub use ai_configuration::*;
pub use call_session::*;
pub use call_stats::*;
pub use delivery_settings::*;
pub use voice_reply::*;
