//! Twilio REST client for outbound calls

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use dakiya::{DomainError, OutboundCall, TelephonyClient};

use crate::config::TwilioConfig;

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

pub struct TwilioClient {
    client: Client,
    config: TwilioConfig,
}

#[derive(Deserialize)]
struct CreateCallResponse {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

impl TwilioClient {
    pub fn new(config: TwilioConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| DomainError::ExternalService(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn calls_url(&self) -> String {
        format!("{}/Accounts/{}/Calls.json", API_BASE, self.config.account_sid)
    }
}

#[async_trait]
impl TelephonyClient for TwilioClient {
    async fn initiate_call(
        &self,
        to: &str,
        callback_url: &str,
    ) -> Result<OutboundCall, DomainError> {
        let response = self
            .client
            .post(self.calls_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to),
                ("From", self.config.phone_number.as_str()),
                ("Url", callback_url),
                ("Method", "POST"),
            ])
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Twilio request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalService(format!(
                "Twilio API error {}: {}",
                status.as_u16(),
                body
            )));
        }

        let created: CreateCallResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Invalid Twilio response: {}", e)))?;

        tracing::info!(call_sid = %created.sid, "Outbound call initiated");

        Ok(OutboundCall {
            call_sid: created.sid,
            status: created.status.unwrap_or_else(|| "queued".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calls_url() {
        let client = TwilioClient::new(TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            phone_number: "+15550001111".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.calls_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Calls.json"
        );
    }
}
