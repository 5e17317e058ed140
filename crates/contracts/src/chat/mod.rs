//! Chat contracts: the form payload, connection lifecycle and the messages sent
//! to the completion endpoint.

pub mod stream;

use serde::{Deserialize, Serialize};

/// Maximum length of a single chat message, in characters
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// Value emitted by the chat form on submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFormValue {
    pub message: String,
}

/// Lifecycle stage of a chat exchange.
///
/// `Waiting` means the conversation is waiting for the next prompt; it is the
/// only state in which the form may submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatConnectState {
    /// Nothing loaded yet
    #[default]
    Idle,
    Waiting,
    /// Request sent, no tokens received yet
    Loading,
    Streaming,
    Error,
}

impl ChatConnectState {
    pub fn can_send(&self) -> bool {
        matches!(self, ChatConnectState::Waiting)
    }

    /// A completion is in flight and may be stopped
    pub fn is_generating(&self) -> bool {
        matches!(self, ChatConnectState::Loading | ChatConnectState::Streaming)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatConnectState::Idle => "idle",
            ChatConnectState::Waiting => "waiting",
            ChatConnectState::Loading => "loading",
            ChatConnectState::Streaming => "streaming",
            ChatConnectState::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat/stream`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Checks the conversation before it is forwarded to the provider.
    ///
    /// The last message must come from the user and fit the form limits.
    pub fn validate(&self) -> Result<(), String> {
        let last = self
            .messages
            .last()
            .ok_or_else(|| "Conversation is empty".to_string())?;
        if last.role != ChatRole::User {
            return Err("Last message must be a user message".to_string());
        }
        let len = last.content.trim().chars().count();
        if len == 0 {
            return Err("Message is required".to_string());
        }
        if len > MAX_MESSAGE_LENGTH {
            return Err(format!(
                "Message must be at most {} characters",
                MAX_MESSAGE_LENGTH
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_waiting_can_send() {
        assert!(ChatConnectState::Waiting.can_send());
        for state in [
            ChatConnectState::Idle,
            ChatConnectState::Loading,
            ChatConnectState::Streaming,
            ChatConnectState::Error,
        ] {
            assert!(!state.can_send(), "{:?} must not allow sending", state);
        }
    }

    #[test]
    fn connect_state_serializes_lowercase() {
        let json = serde_json::to_string(&ChatConnectState::Waiting).unwrap();
        assert_eq!(json, "\"waiting\"");
        assert_eq!(ChatConnectState::Streaming.as_str(), "streaming");
    }

    #[test]
    fn request_validation() {
        let empty = ChatCompletionRequest { messages: vec![] };
        assert!(empty.validate().is_err());

        let assistant_last = ChatCompletionRequest {
            messages: vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")],
        };
        assert!(assistant_last.validate().is_err());

        let too_long = ChatCompletionRequest {
            messages: vec![ChatMessage::user("x".repeat(MAX_MESSAGE_LENGTH + 1))],
        };
        assert!(too_long.validate().is_err());

        let ok = ChatCompletionRequest {
            messages: vec![ChatMessage::user("x".repeat(MAX_MESSAGE_LENGTH))],
        };
        assert!(ok.validate().is_ok());
    }
}
