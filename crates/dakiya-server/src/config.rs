//! Server configuration
//!
//! Read through a key lookup so the shuttle secret store and tests can both
//! feed it.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use dakiya::CompletionOptions;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStoreKind {
    Postgres,
    Memory,
}

impl FromStr for SessionStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            json_mode: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
}

/// Speech synthesis and recognition hints placed in every TwiML reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceConfig {
    pub voice: String,
    pub language: String,
    pub speech_timeout: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice: "Polly.Aditi".to_string(),
            language: "hi-IN".to_string(),
            speech_timeout: "5".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    /// `None` disables outbound test calls
    pub twilio: Option<TwilioConfig>,
    pub voice: VoiceConfig,
    pub public_base_url: Option<String>,
    pub session_store: SessionStoreKind,
    pub max_turns: Option<usize>,
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let voice_defaults = VoiceConfig::default();

        let llm = LlmConfig {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            timeout: Duration::from_secs(parse(&get, "LLM_TIMEOUT_SECS")?.unwrap_or(10)),
            temperature: parse(&get, "LLM_TEMPERATURE")?.unwrap_or(0.7),
            max_tokens: parse(&get, "LLM_MAX_TOKENS")?.unwrap_or(500),
        };

        let twilio = match (
            get("TWILIO_ACCOUNT_SID"),
            get("TWILIO_AUTH_TOKEN"),
            get("TWILIO_PHONE_NUMBER"),
        ) {
            (Some(account_sid), Some(auth_token), Some(phone_number)) => Some(TwilioConfig {
                account_sid,
                auth_token,
                phone_number,
            }),
            _ => None,
        };

        let voice = VoiceConfig {
            voice: get("TWILIO_VOICE").unwrap_or(voice_defaults.voice),
            language: get("TWILIO_LANGUAGE").unwrap_or(voice_defaults.language),
            speech_timeout: get("TWILIO_SPEECH_TIMEOUT").unwrap_or(voice_defaults.speech_timeout),
        };

        let session_store = match get("SESSION_STORE") {
            Some(value) => value
                .parse::<SessionStoreKind>()
                .map_err(|value| ConfigError::Invalid {
                    key: "SESSION_STORE",
                    value,
                })?,
            None => SessionStoreKind::Postgres,
        };

        Ok(Self {
            llm,
            twilio,
            voice,
            public_base_url: get("PUBLIC_BASE_URL").map(|url| url.trim_end_matches('/').to_string()),
            session_store,
            max_turns: parse(&get, "ESCALATION_MAX_TURNS")?,
        })
    }
}

fn parse<T, G>(get: &G, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(None),
    }
}
