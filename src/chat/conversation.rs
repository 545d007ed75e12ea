// SPDX-License-Identifier: MPL-2.0
//! Messages exchanged in the current session, in display order.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(role: Role, content: String) -> Self {
        Self {
            role,
            content,
            sent_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages
            .push(ChatMessage::new(Role::User, content.into()));
    }

    /// Adds the empty assistant message that streamed text will fill.
    pub fn begin_assistant(&mut self) {
        self.messages
            .push(ChatMessage::new(Role::Assistant, String::new()));
    }

    /// Extends the last message if it is the assistant's. Returns whether
    /// the text was appended.
    pub fn append_to_assistant(&mut self, delta: &str) -> bool {
        match self.messages.last_mut() {
            Some(message) if message.role == Role::Assistant => {
                message.content.push_str(delta);
                true
            }
            _ => false,
        }
    }

    /// Removes a trailing assistant message that never received text.
    pub fn discard_empty_assistant(&mut self) -> bool {
        let is_empty_placeholder = self
            .messages
            .last()
            .is_some_and(|message| message.role == Role::Assistant && message.content.is_empty());
        if is_empty_placeholder {
            self.messages.pop();
        }
        is_empty_placeholder
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_keep_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("first");
        conversation.begin_assistant();
        conversation.append_to_assistant("answer");
        conversation.push_user("second");

        let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(conversation.messages()[1].content, "answer");
    }

    #[test]
    fn deltas_only_extend_an_assistant_message() {
        let mut conversation = Conversation::new();
        assert!(!conversation.append_to_assistant("orphan"));

        conversation.push_user("question");
        assert!(!conversation.append_to_assistant("lost"));
        assert_eq!(conversation.last().map(|m| m.content.as_str()), Some("question"));

        conversation.begin_assistant();
        assert!(conversation.append_to_assistant("Hel"));
        assert!(conversation.append_to_assistant("lo"));
        assert_eq!(conversation.last().map(|m| m.content.as_str()), Some("Hello"));
    }

    #[test]
    fn only_an_empty_trailing_placeholder_is_discarded() {
        let mut conversation = Conversation::new();
        conversation.push_user("question");
        conversation.begin_assistant();
        assert!(conversation.discard_empty_assistant());
        assert_eq!(conversation.messages().len(), 1);

        assert!(!conversation.discard_empty_assistant());
        assert_eq!(conversation.messages().len(), 1);

        conversation.begin_assistant();
        conversation.append_to_assistant("partial");
        assert!(!conversation.discard_empty_assistant());
        assert_eq!(conversation.messages().len(), 2);
    }
}
