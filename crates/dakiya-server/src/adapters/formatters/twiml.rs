//! TwiML rendering
//!
//! Exactly one shape per document: `Say` + `Gather` while listening,
//! `Say` + `Hangup` when the call ends.

use dakiya::VoiceReply;

use crate::config::VoiceConfig;

#[derive(Debug, Clone, Default)]
pub struct TwimlFormatter {
    voice: VoiceConfig,
}

impl TwimlFormatter {
    pub fn new(voice: VoiceConfig) -> Self {
        Self { voice }
    }

    pub fn render(&self, reply: &VoiceReply) -> String {
        let say = format!(
            r#"<Say voice="{}" language="{}">{}</Say>"#,
            escape(&self.voice.voice),
            escape(&self.voice.language),
            escape(reply.message())
        );

        let next = match reply {
            VoiceReply::Listen { action, .. } => format!(
                r#"<Gather input="speech" speechTimeout="{}" language="{}" action="{}" method="POST"/>"#,
                escape(&self.voice.speech_timeout),
                escape(&self.voice.language),
                escape(action)
            ),
            VoiceReply::Hangup { .. } => "<Hangup/>".to_string(),
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Response>{}{}</Response>"#,
            say, next
        )
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_listen_reply() {
        let id = Uuid::new_v4();
        let xml = TwimlFormatter::default().render(&VoiceReply::listen("Namaste!", id));

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#));
        assert!(xml.contains(r#"<Say voice="Polly.Aditi" language="hi-IN">Namaste!</Say>"#));
        assert!(xml.contains(&format!(r#"action="/gather/{}" method="POST""#, id)));
        assert!(xml.contains(r#"input="speech" speechTimeout="5""#));
        assert!(!xml.contains("<Hangup/>"));
    }

    #[test]
    fn test_hangup_reply() {
        let xml = TwimlFormatter::default().render(&VoiceReply::hangup("Dhanyavaad"));
        assert!(xml.contains("<Hangup/>"));
        assert!(!xml.contains("<Gather"));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = TwimlFormatter::default().render(&VoiceReply::hangup(r#"COD < 500 & "OTP""#));
        assert!(xml.contains("COD &lt; 500 &amp; &quot;OTP&quot;"));
    }
}
