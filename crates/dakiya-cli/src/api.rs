//! Dakiya API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API Client for a Dakiya server
pub struct DakiyaClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLog {
    pub id: Uuid,
    pub call_sid: Option<String>,
    pub phone_number: String,
    pub caller_name: Option<String>,
    pub status: String,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
    pub package_id: Option<String>,
    pub cod_amount: Option<i64>,
    pub otp_provided: Option<String>,
    pub duration: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_calls: i64,
    pub successful_deliveries: i64,
    pub escalated_calls: i64,
    pub average_duration: f64,
    pub success_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySettings {
    pub default_instructions: String,
    pub emergency_contacts: Vec<String>,
    pub allow_cod: bool,
    pub require_otp: bool,
    pub escalation_threshold: i32,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliverySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contacts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_cod: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_otp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_threshold: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCall {
    pub call_sid: String,
    pub status: String,
}

/// What the assistant said and whether it is still listening
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenReply {
    pub text: String,
    /// Gather URL path; `None` once the call has ended
    pub next: Option<String>,
}

impl DakiyaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    pub async fn list_calls(&self) -> Result<Vec<CallLog>> {
        let resp = self.get("/api/call-logs").await?;
        json(resp).await
    }

    pub async fn get_call(&self, id: &str) -> Result<CallLog> {
        let resp = self.get(&format!("/api/call-logs/{}", id)).await?;
        json(resp).await
    }

    pub async fn stats(&self) -> Result<Stats> {
        let resp = self.get("/api/stats").await?;
        json(resp).await
    }

    pub async fn delivery_settings(&self) -> Result<DeliverySettings> {
        let resp = self.get("/api/delivery-settings").await?;
        json(resp).await
    }

    pub async fn update_delivery_settings(
        &self,
        update: &UpdateDeliverySettings,
    ) -> Result<DeliverySettings> {
        let url = format!("{}/api/delivery-settings", self.base_url);
        let resp = self
            .client
            .put(&url)
            .json(update)
            .send()
            .await
            .context("Failed to connect to Dakiya API")?;
        json(resp).await
    }

    pub async fn test_call(&self, phone_number: &str) -> Result<TestCall> {
        let url = format!("{}/api/test-call", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "phoneNumber": phone_number }))
            .send()
            .await
            .context("Failed to connect to Dakiya API")?;
        json(resp).await
    }

    /// Post a fake inbound call to the voice webhook
    pub async fn start_call(&self, from: &str, call_sid: &str) -> Result<SpokenReply> {
        self.post_webhook("/voice", &[("From", from), ("CallSid", call_sid)])
            .await
    }

    /// Post one caller utterance to a gather URL returned by the server
    pub async fn say(&self, gather_path: &str, speech: &str, call_sid: &str) -> Result<SpokenReply> {
        self.post_webhook(
            gather_path,
            &[("SpeechResult", speech), ("CallSid", call_sid)],
        )
        .await
    }

    async fn get(&self, path: &str) -> Result<Response> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .context("Failed to connect to Dakiya API")
    }

    async fn post_webhook(&self, path: &str, form: &[(&str, &str)]) -> Result<SpokenReply> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .form(form)
            .send()
            .await
            .context("Failed to connect to Dakiya webhook")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Webhook error ({}): {}", status, body);
        }

        let twiml = resp.text().await.context("Failed to read TwiML")?;
        parse_twiml(&twiml)
    }
}

async fn json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("API error ({}): {}", status, body);
    }

    resp.json().await.context("Failed to parse response")
}

/// Pull the spoken text and gather action out of a TwiML reply
pub fn parse_twiml(twiml: &str) -> Result<SpokenReply> {
    let say_start = twiml.find("<Say").context("TwiML has no <Say>")?;
    let text_start = twiml[say_start..]
        .find('>')
        .map(|i| say_start + i + 1)
        .context("Malformed <Say>")?;
    let text_end = twiml[text_start..]
        .find("</Say>")
        .map(|i| text_start + i)
        .context("Unterminated <Say>")?;

    let next = twiml.find("<Gather").and_then(|gather| {
        let tag = &twiml[gather..];
        let start = tag.find("action=\"")? + "action=\"".len();
        let len = tag[start..].find('"')?;
        Some(unescape(&tag[start..start + len]))
    });

    Ok(SpokenReply {
        text: unescape(&twiml[text_start..text_end]),
        next,
    })
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
