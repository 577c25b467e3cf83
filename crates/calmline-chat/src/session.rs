//! Chat session: the submission entry point.

use crate::composer::ReplyComposer;
use crate::types::{Conversation, Exchange, Message, Role};

/// Owns the conversation and turns submitted text into exchanges.
#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
    composer: ReplyComposer,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit user text.
    ///
    /// Whitespace-only text is ignored and returns `None`. Otherwise the
    /// trimmed text is appended as a user message, a reply is composed
    /// against the updated history and appended as an assistant message.
    pub fn submit(&mut self, text: &str) -> Option<Exchange> {
        let content = text.trim();
        if content.is_empty() {
            tracing::debug!("Ignoring empty submission");
            return None;
        }

        let user = Message::new(Role::User, content.to_string());
        self.conversation.push(user.clone());

        let reply_text = self
            .composer
            .compose(content, self.conversation.messages());
        let reply = Message::new(Role::Assistant, reply_text);
        self.conversation.push(reply.clone());

        tracing::debug!(
            user_id = %user.id,
            reply_id = %reply.id,
            messages = self.conversation.len(),
            "Exchange appended"
        );
        Some(Exchange { user, reply })
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }
}
