//! Telephony Port
//!
//! Call control on the telephony provider. Inbound calls arrive as webhooks;
//! this interface only covers placing outbound (test) calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Result of placing an outbound call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundCall {
    /// Provider-issued call identifier
    pub call_sid: String,
    /// Provider status at creation time (e.g. "queued")
    pub status: String,
}

#[async_trait]
pub trait TelephonyClient: Send + Sync {
    /// Dial `to`; the provider fetches call instructions from `callback_url`
    async fn initiate_call(&self, to: &str, callback_url: &str)
        -> Result<OutboundCall, DomainError>;
}
