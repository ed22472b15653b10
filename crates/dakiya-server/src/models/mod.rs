//! Dakiya Data Models
//!
//! - CallLog: Call sessions as shown on the dashboard
//! - Settings: Delivery settings and AI configuration
//! - Stats: Aggregate call numbers
//! - TestCall: Outbound test call
//! - Twilio: Webhook form bodies

mod call_log;
mod settings;
mod stats;
mod test_call;
mod twilio;

pub use call_log::*;
pub use settings::*;
pub use stats::*;
pub use test_call::*;
pub use twilio::*;
