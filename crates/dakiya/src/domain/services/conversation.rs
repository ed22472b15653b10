//! Conversation framing
//!
//! Fixed utterances, the system prompt sent to the language model, and the
//! typed + defaulted view of the model's JSON reply. The model is an untrusted
//! boundary: every field of its reply is optional and normalized here before
//! anything reaches the session.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::{
    AiConfiguration, DeliverySettings, ExtractedFacts, FactsPatch, TranscriptEntry,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Speaker;
use crate::ports::ChatMessage;

/// Spoken when the speech recognizer returned nothing usable
pub const REPROMPT: &str = "Sorry, main aapki baat samajh nahi payi. Kripya phir se boliye.";

/// Used when the model's reply has no `response` field
pub const HOLDING_REPLY: &str = "I understand. Please hold on while I check.";

/// Spoken when the model could not be reached or answered garbage
pub const FAILURE_APOLOGY: &str =
    "I'm having some technical difficulties. Please hold on while I connect you to a human agent.";

/// Spoken when the call cannot continue (unknown session, internal fault)
pub const TECHNICAL_ERROR: &str =
    "Technical problem ho rahi hai. Kripya thodi der baad call kariye.";

/// Spoken for speech that arrives after the call already ended
pub const CALL_ALREADY_ENDED: &str = "Yeh call pehle hi khatam ho chuki hai. Dhanyavaad!";

/// Appended when the escalation policy ends a call the model wanted to continue
pub const HANDOFF_NOTICE: &str = "Main aapko ek human agent se connect kar rahi hun.";

const DEFAULT_OPENING: &str = "Please tell me about your delivery.";

/// Words a model uses for "nothing here" instead of `null`
const PLACEHOLDERS: &[&str] = &[
    "null",
    "none",
    "n/a",
    "na",
    "unknown",
    "not provided",
    "not mentioned",
];

/// True when the recognized speech carries no words at all
pub fn is_unintelligible(utterance: &str) -> bool {
    !utterance.chars().any(char::is_alphanumeric)
}

/// Greeting plus the business context the caller needs up front
pub fn opening_prompt(settings: &DeliverySettings) -> String {
    let instructions = settings.default_instructions.trim();
    let instructions = if instructions.is_empty() {
        DEFAULT_OPENING
    } else {
        instructions
    };

    let mut prompt = format!("Namaste! Main aapka AI assistant hun. {}", instructions);
    if settings.require_otp {
        prompt.push_str(" Delivery complete karne ke liye OTP zaroori hai.");
    }
    if !settings.allow_cod {
        prompt.push_str(" Is delivery par cash on delivery allowed nahi hai.");
    }
    prompt
}

/// Final words when the call is handed to a human by policy
pub fn handoff_message(response: &str, settings: &DeliverySettings) -> String {
    let mut message = format!("{} {}", response.trim(), HANDOFF_NOTICE);
    if let Some(contact) = settings.primary_emergency_contact() {
        message.push_str(&format!(" Zaroorat ho toh {} par call kariye.", contact));
    }
    message.trim().to_string()
}

/// Everything the model needs to know besides the transcript
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationContext {
    pub instructions: String,
    pub allow_cod: bool,
    pub require_otp: bool,
    pub package_id: Option<String>,
    pub cod_amount: Option<i64>,
    pub otp_received: bool,
    pub personality_tone: String,
    pub hindi_proficiency: i32,
}

impl ConversationContext {
    pub fn new(settings: &DeliverySettings, facts: &ExtractedFacts) -> Self {
        let ai = AiConfiguration::default();
        Self {
            instructions: settings.default_instructions.clone(),
            allow_cod: settings.allow_cod,
            require_otp: settings.require_otp,
            package_id: facts.package_id.clone(),
            cod_amount: facts.cod_amount,
            otp_received: facts.otp_provided.is_some(),
            personality_tone: ai.personality_tone,
            hindi_proficiency: ai.hindi_proficiency,
        }
    }

    pub fn with_ai_configuration(mut self, ai: &AiConfiguration) -> Self {
        self.personality_tone = ai.personality_tone.clone();
        self.hindi_proficiency = ai.hindi_proficiency.clamp(0, 100);
        self
    }

    pub fn system_prompt(&self) -> String {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        let package_id = self.package_id.as_deref().unwrap_or("not provided");
        let cod_amount = self
            .cod_amount
            .map(|amount| format!("Rs. {}", amount))
            .unwrap_or_else(|| "none yet".to_string());

        format!(
            r#"You are a voice assistant answering phone calls from delivery agents in India.
You understand Hindi, English and code-mixed Hinglish, and you answer in the same simple mix.

Your job:
- Help the delivery agent finish the delivery
- Give the delivery instructions clearly
- Handle cash on delivery and OTP verification when needed
- Ask for a human hand-off when you cannot resolve the issue

Delivery rules:
- Instructions: {instructions}
- Cash on delivery allowed: {allow_cod}
- OTP required: {require_otp}
- Package ID: {package_id}
- COD amount collected so far: {cod_amount}
- OTP received: {otp_received}

Style:
- Tone: {tone}
- Speak roughly {hindi}% Hindi, the rest English
- Your words are read out on a phone line: at most 2-3 short sentences, no lists, no emojis
- Pick out the package ID, COD amount and OTP whenever the agent mentions them

Reply with one JSON object and nothing else:
{{
  "response": "what you say to the delivery agent",
  "shouldEscalate": false,
  "extractedInfo": {{
    "packageId": null,
    "codAmount": null,
    "otpProvided": null,
    "isCompleted": false
  }}
}}
Use null for anything the agent did not mention. Set isCompleted to true only once the delivery is done."#,
            instructions = self.instructions.trim(),
            allow_cod = yes_no(self.allow_cod),
            require_otp = yes_no(self.require_otp),
            package_id = package_id,
            cod_amount = cod_amount,
            otp_received = yes_no(self.otp_received),
            tone = self.personality_tone,
            hindi = self.hindi_proficiency,
        )
    }
}

/// System framing, prior turns in order, then the new caller utterance
pub fn build_messages(
    system_prompt: &str,
    transcript: &[TranscriptEntry],
    utterance: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(transcript.iter().map(|entry| match entry.speaker {
        Speaker::Caller => ChatMessage::user(entry.text.as_str()),
        Speaker::Assistant => ChatMessage::assistant(entry.text.as_str()),
    }));
    messages.push(ChatMessage::user(utterance.trim()));
    messages
}

/// Facts the model extracted this turn, already normalized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedInfo {
    pub package_id: Option<String>,
    pub cod_amount: Option<i64>,
    pub otp_provided: Option<String>,
    pub is_completed: bool,
}

impl ExtractedInfo {
    pub fn facts_patch(&self) -> FactsPatch {
        FactsPatch {
            package_id: self.package_id.clone(),
            cod_amount: self.cod_amount,
            otp_provided: self.otp_provided.clone(),
            verification_required: None,
        }
    }
}

/// The model's reply after validation and defaulting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub response: String,
    pub should_escalate: bool,
    pub extracted: ExtractedInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssistantReply {
    #[serde(default)]
    response: Option<Value>,
    #[serde(default)]
    should_escalate: Option<Value>,
    #[serde(default)]
    extracted_info: Option<RawExtractedInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExtractedInfo {
    #[serde(default)]
    package_id: Option<Value>,
    #[serde(default)]
    cod_amount: Option<Value>,
    #[serde(default)]
    otp_provided: Option<Value>,
    #[serde(default)]
    is_completed: Option<Value>,
}

impl RawAssistantReply {
    fn into_reply(self) -> AssistantReply {
        let extracted = self.extracted_info.unwrap_or_default();
        AssistantReply {
            response: self
                .response
                .as_ref()
                .and_then(text_value)
                .unwrap_or_else(|| HOLDING_REPLY.to_string()),
            should_escalate: self
                .should_escalate
                .as_ref()
                .and_then(bool_value)
                .unwrap_or(false),
            extracted: ExtractedInfo {
                package_id: extracted.package_id.as_ref().and_then(text_value),
                cod_amount: extracted.cod_amount.as_ref().and_then(amount_value),
                otp_provided: extracted.otp_provided.as_ref().and_then(text_value),
                is_completed: extracted
                    .is_completed
                    .as_ref()
                    .and_then(bool_value)
                    .unwrap_or(false),
            },
        }
    }
}

/// Parse the model's message content into a defaulted reply.
///
/// Missing fields are defaulted; content that is not a JSON object is an
/// `ExternalService` error.
pub fn parse_reply(content: &str) -> Result<AssistantReply, DomainError> {
    let body = strip_code_fence(content);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| DomainError::ExternalService(format!("Reply is not JSON: {}", e)))?;

    if !value.is_object() {
        return Err(DomainError::ExternalService(
            "Reply is not a JSON object".to_string(),
        ));
    }

    let raw: RawAssistantReply = serde_json::from_value(value)
        .map_err(|e| DomainError::ExternalService(format!("Unexpected reply shape: {}", e)))?;

    Ok(raw.into_reply())
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().trim_end_matches("```").trim()
}

fn text_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        _ => return None,
    };

    if text.is_empty() || PLACEHOLDERS.contains(&text.to_lowercase().as_str()) {
        None
    } else {
        Some(text)
    }
}

fn amount_value(value: &Value) -> Option<i64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => leading_number(s)?,
        _ => return None,
    };

    (amount.is_finite() && amount >= 0.0).then(|| amount.round() as i64)
}

/// First number in free text: "Rs. 1,200" is 1200, "450 rupees" is 450
fn leading_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let mut number = String::new();
    let mut chars = text[start..].chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '0'..='9' => number.push(c),
            // Thousands separator
            ',' => {}
            '.' if !number.contains('.') && chars.peek().is_some_and(char::is_ascii_digit) => {
                number.push('.')
            }
            _ => break,
        }
    }

    number.parse().ok()
}

fn bool_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessageRole;

    #[test]
    fn test_unintelligible_input() {
        assert!(is_unintelligible(""));
        assert!(is_unintelligible("   "));
        assert!(is_unintelligible("... ?"));
        assert!(!is_unintelligible("haan"));
        assert!(!is_unintelligible("हाँ"));
    }

    #[test]
    fn test_parse_full_reply() {
        let reply = parse_reply(
            r#"{"response":"Theek hai","shouldEscalate":false,
                "extractedInfo":{"packageId":"PKG-9","codAmount":450,"otpProvided":"7788","isCompleted":true}}"#,
        )
        .unwrap();

        assert_eq!(reply.response, "Theek hai");
        assert!(!reply.should_escalate);
        assert_eq!(reply.extracted.package_id.as_deref(), Some("PKG-9"));
        assert_eq!(reply.extracted.cod_amount, Some(450));
        assert_eq!(reply.extracted.otp_provided.as_deref(), Some("7788"));
        assert!(reply.extracted.is_completed);
    }

    #[test]
    fn test_missing_fields_are_defaulted() {
        let reply = parse_reply("{}").unwrap();
        assert_eq!(reply.response, HOLDING_REPLY);
        assert!(!reply.should_escalate);
        assert_eq!(reply.extracted, ExtractedInfo::default());
    }

    #[test]
    fn test_lenient_field_types() {
        let reply = parse_reply(
            r#"{"response":"ok","shouldEscalate":"no",
                "extractedInfo":{"packageId":12345,"codAmount":"Rs. 1,200","otpProvided":"not provided","isCompleted":"true"}}"#,
        )
        .unwrap();

        assert!(!reply.should_escalate);
        assert_eq!(reply.extracted.package_id.as_deref(), Some("12345"));
        assert_eq!(reply.extracted.cod_amount, Some(1200));
        assert_eq!(reply.extracted.otp_provided, None);
        assert!(reply.extracted.is_completed);
    }

    #[test]
    fn test_cod_amount_with_currency_text() {
        let amount = |text: &str| amount_value(&Value::String(text.to_string()));

        assert_eq!(amount("Rs. 500"), Some(500));
        assert_eq!(amount("Rs. 1,200"), Some(1200));
        assert_eq!(amount("₹1,200"), Some(1200));
        assert_eq!(amount("450 rupees"), Some(450));
        assert_eq!(amount("₹ 450.00."), Some(450));
        assert_eq!(amount("99.6"), Some(100));
        assert_eq!(amount("cash nahi hai"), None);
        assert_eq!(amount(""), None);
    }

    #[test]
    fn test_fenced_reply_is_unwrapped() {
        let reply = parse_reply("```json\n{\"response\":\"haan ji\"}\n```").unwrap();
        assert_eq!(reply.response, "haan ji");
    }

    #[test]
    fn test_non_object_reply_is_error() {
        assert!(parse_reply("Sure, I can help!").is_err());
        assert!(parse_reply("[1,2,3]").is_err());
    }

    #[test]
    fn test_build_messages_alternates_roles() {
        let transcript = vec![
            TranscriptEntry::caller("hello"),
            TranscriptEntry::assistant("namaste"),
        ];
        let messages = build_messages("rules", &transcript, " package hai ");

        let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User
            ]
        );
        assert_eq!(messages.last().unwrap().content, "package hai");
    }

    #[test]
    fn test_system_prompt_carries_business_rules() {
        let settings = DeliverySettings {
            allow_cod: false,
            require_otp: true,
            ..Default::default()
        };
        let facts = ExtractedFacts {
            package_id: Some("PKG-1".to_string()),
            ..Default::default()
        };
        let ai = AiConfiguration {
            hindi_proficiency: 60,
            ..Default::default()
        };
        let prompt = ConversationContext::new(&settings, &facts)
            .with_ai_configuration(&ai)
            .system_prompt();

        assert!(prompt.contains("Cash on delivery allowed: no"));
        assert!(prompt.contains("OTP required: yes"));
        assert!(prompt.contains("Package ID: PKG-1"));
        assert!(prompt.contains("roughly 60% Hindi"));
        assert!(prompt.contains(&settings.default_instructions));
    }

    #[test]
    fn test_opening_prompt_mentions_otp_and_cod_rules() {
        let settings = DeliverySettings {
            allow_cod: false,
            require_otp: true,
            ..Default::default()
        };
        let prompt = opening_prompt(&settings);
        assert!(prompt.starts_with("Namaste!"));
        assert!(prompt.contains("OTP zaroori hai"));
        assert!(prompt.contains("cash on delivery allowed nahi"));

        let plain = opening_prompt(&DeliverySettings::default());
        assert!(!plain.contains("OTP"));
    }

    #[test]
    fn test_handoff_message_names_contact() {
        let message = handoff_message("Ek minute.", &DeliverySettings::default());
        assert!(message.starts_with("Ek minute."));
        assert!(message.contains(HANDOFF_NOTICE));
        assert!(message.contains("+91 98765 43210"));
    }
}
