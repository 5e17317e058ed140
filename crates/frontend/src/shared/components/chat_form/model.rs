//! Chat Form - Model
//!
//! Submit rules of the chat form, independent of the DOM.

use crate::shared::forms::{FormControl, Validator};
use contracts::chat::{ChatConnectState, ChatFormValue, MAX_MESSAGE_LENGTH};

#[derive(Debug, Clone)]
pub struct ChatFormModel {
    pub message: FormControl,
}

impl ChatFormModel {
    pub fn new() -> Self {
        Self {
            message: FormControl::new(
                "",
                vec![Validator::Required, Validator::MaxLength(MAX_MESSAGE_LENGTH)],
            ),
        }
    }

    /// Whether a confirm action would emit right now
    pub fn can_submit(&self, connection: Option<ChatConnectState>) -> bool {
        self.message.is_valid() && connection.is_some_and(|c| c.can_send())
    }

    /// Shift+Enter: continue the message on a new line
    pub fn insert_newline(&mut self) {
        let message = format!("{}\n", self.message.value());
        self.message.set_value(message);
    }

    /// Confirm action.
    ///
    /// Returns the trimmed value and resets the control when the form is valid
    /// and the conversation is waiting for input; otherwise leaves everything
    /// untouched and returns `None`.
    pub fn submit(&mut self, connection: Option<ChatConnectState>) -> Option<ChatFormValue> {
        if !self.can_submit(connection) {
            return None;
        }
        let value = ChatFormValue {
            message: self.message.value().trim().to_string(),
        };
        self.message.reset();
        Some(value)
    }

    /// Characters typed so far, for the counter under the textarea
    pub fn length(&self) -> usize {
        self.message.value().chars().count()
    }
}

impl Default for ChatFormModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Tallest the message box grows before it scrolls
pub const MAX_TEXTAREA_HEIGHT_PX: i32 = 200;

/// Height for the message box given its content height
pub fn fitted_height(scroll_height: i32) -> i32 {
    scroll_height.clamp(0, MAX_TEXTAREA_HEIGHT_PX)
}
