//! Telephony Markup Formatters
//!
//! Transform a VoiceReply into provider-specific call instructions.

mod twiml;

pub use twiml::TwimlFormatter;
