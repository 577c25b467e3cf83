//! Output formatting for the terminal front-end.

use calmline_chat::{classify, Exchange, Message, Role};
use calmline_core::error::Result;
use calmline_core::events::VoiceStatus;

/// How messages are printed to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub json: bool,
    pub explain: bool,
}

impl Renderer {
    /// Format the reply half of an exchange (the user already saw their own line).
    pub fn exchange(&self, exchange: &Exchange) -> Result<String> {
        if self.json {
            return Ok(format!(
                "{}\n{}",
                serde_json::to_string(&exchange.user)?,
                serde_json::to_string(&exchange.reply)?
            ));
        }
        let mut out = String::new();
        if self.explain {
            out.push_str(&explain_line(&exchange.user.content));
            out.push('\n');
        }
        out.push_str(&self.text_line(&exchange.reply));
        Ok(out)
    }

    /// Format the full conversation.
    pub fn history(&self, messages: &[Message]) -> Result<String> {
        if messages.is_empty() && !self.json {
            return Ok("(no messages yet)".to_string());
        }
        let lines = messages
            .iter()
            .map(|m| -> Result<String> {
                if self.json {
                    Ok(serde_json::to_string(m)?)
                } else {
                    Ok(self.text_line(m))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    /// Format an informational line such as help or a command error.
    pub fn notice(&self, text: &str) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string(&serde_json::json!({
                "type": "notice",
                "text": text,
            }))?);
        }
        Ok(text.to_string())
    }

    /// Format the voice status, with the partial transcript while listening.
    pub fn status(&self, status: &VoiceStatus, interim: Option<&str>) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string(&serde_json::json!({
                "type": "status",
                "listening": status.listening,
                "speaking": status.speaking,
                "voice_ready": status.voice_ready,
                "interim": interim,
            }))?);
        }
        let mut out = format!("[{}]", status);
        if let Some(partial) = interim {
            out.push_str(&format!("\n  hearing: {}", partial));
        }
        Ok(out)
    }

    fn text_line(&self, message: &Message) -> String {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant => "calmline",
        };
        format!("{}> {}", who, message.content)
    }
}

/// One-line summary of what the classifier saw in `text`.
pub fn explain_line(text: &str) -> String {
    let c = classify(text);
    let categories: Vec<&str> = c.categories().iter().map(|cat| cat.as_str()).collect();
    format!(
        "  [matched: {}; question: {}]",
        if categories.is_empty() {
            "none".to_string()
        } else {
            categories.join(", ")
        },
        if c.is_question { "yes" } else { "no" }
    )
}
