//! Conversation message and history types for Mercury.
//!
//! A `ConversationHistory` is the ordered, bounded log of messages exchanged
//! with a single user. It is a sliding window: appends past the bound drop
//! the oldest entries rather than rejecting the new one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a conversation.
///
/// Inbound messages carry the provider-supplied timestamp; outbound
/// messages are stamped at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a user-role message with the given timestamp.
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp,
        }
    }

    /// Create an assistant-role message with the given timestamp.
    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

/// The ordered, bounded message log for a single user.
///
/// Oldest first; appends past [`ConversationHistory::MAX_MESSAGES`] drop the
/// oldest entries until the bound holds again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Maximum number of messages retained per user.
    pub const MAX_MESSAGES: usize = 20;

    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, trimming the oldest entries if the bound is exceeded.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        if self.messages.len() > Self::MAX_MESSAGES {
            let excess = self.messages.len() - Self::MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    /// The messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(n: usize) -> Message {
        Message::user(format!("message {n}"), Utc::now())
    }

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_history_starts_empty() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut history = ConversationHistory::new();
        history.push(Message::user("hello", Utc::now()));
        history.push(Message::assistant("hi there", Utc::now()));

        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[0].role, MessageRole::User);
        assert_eq!(history.messages()[0].content, "hello");
        assert_eq!(history.messages()[1].role, MessageRole::Assistant);
    }

    #[test]
    fn test_push_trims_oldest_at_bound() {
        let mut history = ConversationHistory::new();
        for n in 0..25 {
            history.push(msg(n));
        }

        assert_eq!(history.len(), ConversationHistory::MAX_MESSAGES);
        // The oldest five were dropped; the window holds messages 5..25.
        assert_eq!(history.messages()[0].content, "message 5");
        assert_eq!(history.messages()[19].content, "message 24");
    }

    #[test]
    fn test_length_is_min_of_appends_and_bound() {
        for total in [0usize, 1, 19, 20, 21, 40] {
            let mut history = ConversationHistory::new();
            for n in 0..total {
                history.push(msg(n));
            }
            assert_eq!(
                history.len(),
                total.min(ConversationHistory::MAX_MESSAGES),
                "after {total} appends"
            );
        }
    }

    #[test]
    fn test_window_holds_most_recent_in_order() {
        let mut history = ConversationHistory::new();
        for n in 0..33 {
            history.push(msg(n));
        }

        let contents: Vec<&str> = history
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        let expected: Vec<String> = (13..33).map(|n| format!("message {n}")).collect();
        assert_eq!(contents, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_history_json_roundtrip() {
        let mut history = ConversationHistory::new();
        history.push(Message::user("ping", Utc::now()));
        history.push(Message::assistant("pong", Utc::now()));

        let json = serde_json::to_string(&history).unwrap();
        // Transparent serialization: a bare JSON array.
        assert!(json.starts_with('['));
        let parsed: ConversationHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history);
    }
}
