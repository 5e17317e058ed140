//! Chat Page - Session
//!
//! The conversation and its connection state. Every transition of
//! [`ChatConnectState`] on the chat page goes through this type.

use contracts::chat::stream::ChatStreamEvent;
use contracts::chat::{
    ChatCompletionRequest, ChatConnectState, ChatFormValue, ChatMessage, ChatRole,
};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub id: Uuid,
    pub message: ChatMessage,
}

impl ChatEntry {
    fn new(message: ChatMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    entries: Vec<ChatEntry>,
    state: ChatConnectState,
    error: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChatConnectState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn entry(&self, id: Uuid) -> Option<&ChatEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Load a saved conversation and start waiting for input
    pub fn restore(&mut self, history: Vec<ChatMessage>) {
        self.entries = history.into_iter().map(ChatEntry::new).collect();
        self.state = ChatConnectState::Waiting;
        self.error = None;
    }

    /// Messages worth persisting: the assistant placeholder of an unanswered
    /// request is left out
    pub fn history(&self) -> Vec<ChatMessage> {
        self.entries
            .iter()
            .filter(|e| !(e.message.role == ChatRole::Assistant && e.message.content.is_empty()))
            .map(|e| e.message.clone())
            .collect()
    }

    /// Start a completion for the submitted message.
    ///
    /// Appends the user message and an empty assistant message that the
    /// stream fills in. Returns `None` unless the session is waiting.
    pub fn begin(&mut self, value: ChatFormValue) -> Option<ChatCompletionRequest> {
        if !self.state.can_send() {
            return None;
        }
        self.entries.push(ChatEntry::new(ChatMessage::user(value.message)));
        let request = ChatCompletionRequest {
            messages: self.history(),
        };
        self.entries.push(ChatEntry::new(ChatMessage::assistant("")));
        self.state = ChatConnectState::Loading;
        self.error = None;
        Some(request)
    }

    /// Apply one stream event; events arriving after a stop are ignored
    pub fn apply(&mut self, event: ChatStreamEvent) {
        if !self.state.is_generating() {
            return;
        }
        match event {
            ChatStreamEvent::Delta { content } => {
                if let Some(last) = self.pending_answer_mut() {
                    last.message.content.push_str(&content);
                }
                self.state = ChatConnectState::Streaming;
            }
            ChatStreamEvent::Done { .. } => {
                self.drop_empty_answer();
                self.state = ChatConnectState::Waiting;
            }
            ChatStreamEvent::Error { message } => self.fail(message),
        }
    }

    /// The body ended; without a `Done` event only a non-empty answer counts
    pub fn finish_stream(&mut self) {
        if !self.state.is_generating() {
            return;
        }
        match self.state {
            ChatConnectState::Streaming => {
                self.drop_empty_answer();
                self.state = ChatConnectState::Waiting;
            }
            _ => self.fail("The answer stream ended before any content arrived".to_string()),
        }
    }

    /// Request or transport failure while generating
    pub fn fail(&mut self, message: String) {
        if !self.state.is_generating() {
            return;
        }
        self.drop_empty_answer();
        self.state = ChatConnectState::Error;
        self.error = Some(message);
    }

    /// User stopped the generation: keep the partial answer
    pub fn stop(&mut self) -> bool {
        if !self.state.is_generating() {
            return false;
        }
        self.drop_empty_answer();
        self.state = ChatConnectState::Waiting;
        true
    }

    pub fn dismiss_error(&mut self) {
        if self.state == ChatConnectState::Error {
            self.state = ChatConnectState::Waiting;
        }
        self.error = None;
    }

    /// Forget the conversation. Not allowed while generating.
    pub fn clear(&mut self) -> bool {
        if self.state.is_generating() {
            return false;
        }
        self.entries.clear();
        self.error = None;
        self.state = ChatConnectState::Waiting;
        true
    }

    fn pending_answer_mut(&mut self) -> Option<&mut ChatEntry> {
        self.entries
            .last_mut()
            .filter(|e| e.message.role == ChatRole::Assistant)
    }

    fn drop_empty_answer(&mut self) {
        if self
            .entries
            .last()
            .is_some_and(|e| e.message.role == ChatRole::Assistant && e.message.content.is_empty())
        {
            self.entries.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waiting_session() -> ChatSession {
        let mut session = ChatSession::new();
        session.restore(vec![]);
        session
    }

    fn value(message: &str) -> ChatFormValue {
        ChatFormValue {
            message: message.to_string(),
        }
    }

    fn delta(content: &str) -> ChatStreamEvent {
        ChatStreamEvent::Delta {
            content: content.to_string(),
        }
    }

    #[test]
    fn starts_idle_and_waits_after_restore() {
        let mut session = ChatSession::new();
        assert_eq!(session.state(), ChatConnectState::Idle);
        assert!(session.begin(value("hi")).is_none());

        session.restore(vec![ChatMessage::user("a"), ChatMessage::assistant("b")]);
        assert_eq!(session.state(), ChatConnectState::Waiting);
        assert_eq!(session.entries().len(), 2);
    }

    #[test]
    fn streamed_answer_lifecycle() {
        let mut session = waiting_session();
        let request = session.begin(value("Hello")).unwrap();
        assert_eq!(request.messages, vec![ChatMessage::user("Hello")]);
        assert_eq!(session.state(), ChatConnectState::Loading);
        assert!(session.begin(value("again")).is_none());

        session.apply(delta("Hi "));
        assert_eq!(session.state(), ChatConnectState::Streaming);
        session.apply(delta("there"));
        session.apply(ChatStreamEvent::Done {
            finish_reason: Some("stop".to_string()),
        });

        assert_eq!(session.state(), ChatConnectState::Waiting);
        assert_eq!(
            session.history(),
            vec![ChatMessage::user("Hello"), ChatMessage::assistant("Hi there")]
        );
    }

    #[test]
    fn request_carries_previous_turns() {
        let mut session = ChatSession::new();
        session.restore(vec![ChatMessage::user("a"), ChatMessage::assistant("b")]);
        let request = session.begin(value("c")).unwrap();
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[2], ChatMessage::user("c"));
    }

    #[test]
    fn error_event_drops_empty_answer() {
        let mut session = waiting_session();
        session.begin(value("Hello")).unwrap();
        session.apply(ChatStreamEvent::Error {
            message: "rate limited".to_string(),
        });
        assert_eq!(session.state(), ChatConnectState::Error);
        assert_eq!(session.error(), Some("rate limited"));
        assert_eq!(session.history(), vec![ChatMessage::user("Hello")]);

        session.dismiss_error();
        assert_eq!(session.state(), ChatConnectState::Waiting);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn stop_keeps_partial_answer_and_ignores_late_events() {
        let mut session = waiting_session();
        session.begin(value("Tell a story")).unwrap();
        session.apply(delta("Once upon"));
        assert!(session.stop());
        assert_eq!(session.state(), ChatConnectState::Waiting);

        session.apply(delta(" a time"));
        session.fail("aborted".to_string());
        assert_eq!(session.state(), ChatConnectState::Waiting);
        assert_eq!(session.entries().last().unwrap().message.content, "Once upon");
        assert!(!session.stop());
    }

    #[test]
    fn stream_closed_without_done() {
        let mut session = waiting_session();
        session.begin(value("q")).unwrap();
        session.finish_stream();
        assert_eq!(session.state(), ChatConnectState::Error);

        let mut session = waiting_session();
        session.begin(value("q")).unwrap();
        session.apply(delta("partial"));
        session.finish_stream();
        assert_eq!(session.state(), ChatConnectState::Waiting);
    }

    #[test]
    fn clear_is_refused_while_generating() {
        let mut session = waiting_session();
        session.begin(value("q")).unwrap();
        assert!(!session.clear());
        session.stop();
        assert!(session.clear());
        assert!(session.entries().is_empty());
    }
}
