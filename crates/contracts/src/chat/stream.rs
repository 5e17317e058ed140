//! Server-sent event framing for streamed completions.
//!
//! The backend writes one [`ChatStreamEvent`] as JSON per `data:` line; the
//! browser reads the response body in arbitrary chunks and feeds them to
//! [`SseDecoder`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatStreamEvent {
    /// Next piece of the assistant answer
    Delta { content: String },
    Done { finish_reason: Option<String> },
    Error { message: String },
}

impl ChatStreamEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ChatStreamEvent::Delta { .. })
    }
}

/// Incremental decoder for a `text/event-stream` body.
///
/// Only the `data` field is interpreted; `event`, `id`, `retry` and comment
/// lines are skipped. Multi-line data is joined with `\n`.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Undecoded bytes (an incomplete UTF-8 sequence at a chunk boundary)
    pending_bytes: Vec<u8>,
    /// Decoded text not yet terminated by a newline
    line_buffer: String,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw body bytes, returning every event payload completed by them
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending_bytes.extend_from_slice(bytes);
        let valid_up_to = match std::str::from_utf8(&self.pending_bytes) {
            Ok(_) => self.pending_bytes.len(),
            Err(e) => match e.error_len() {
                // Truncated sequence: keep the tail for the next chunk
                None => e.valid_up_to(),
                // Invalid bytes: decode lossily, nothing to wait for
                Some(_) => {
                    let text = String::from_utf8_lossy(&self.pending_bytes).into_owned();
                    self.pending_bytes.clear();
                    return self.push_str(&text);
                }
            },
        };
        let rest = self.pending_bytes.split_off(valid_up_to);
        let text = String::from_utf8(std::mem::replace(&mut self.pending_bytes, rest))
            .unwrap_or_default();
        self.push_str(&text)
    }

    /// Feed decoded text, returning every event payload completed by it
    pub fn push_str(&mut self, chunk: &str) -> Vec<String> {
        self.line_buffer.push_str(chunk);
        let mut payloads = Vec::new();
        while let Some(pos) = self.line_buffer.find('\n') {
            let line: String = self.line_buffer.drain(..=pos).collect();
            let line = line.trim_end_matches(['\n', '\r']);
            self.process_line(line, &mut payloads);
        }
        payloads
    }

    /// Flush an event left open by a body that did not end with a blank line
    pub fn finish(&mut self) -> Option<String> {
        let tail = std::mem::take(&mut self.line_buffer);
        let mut payloads = Vec::new();
        if !tail.is_empty() {
            self.process_line(tail.trim_end_matches('\r'), &mut payloads);
        }
        self.dispatch(&mut payloads);
        payloads.pop()
    }

    fn process_line(&mut self, line: &str, payloads: &mut Vec<String>) {
        if line.is_empty() {
            self.dispatch(payloads);
            return;
        }
        if line.starts_with(':') {
            return;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
    }

    fn dispatch(&mut self, payloads: &mut Vec<String>) {
        if !self.data.is_empty() {
            payloads.push(self.data.join("\n"));
            self.data.clear();
        }
    }
}

/// Decode a payload produced by [`SseDecoder`]
pub fn parse_event(payload: &str) -> Result<ChatStreamEvent, String> {
    serde_json::from_str(payload).map_err(|e| format!("Malformed stream event: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_json_shape() {
        let event = ChatStreamEvent::Delta {
            content: "Hi".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"delta","content":"Hi"}"#);
        assert_eq!(parse_event(&json).unwrap(), event);
        assert!(!event.is_terminal());
        assert!(ChatStreamEvent::Done {
            finish_reason: None
        }
        .is_terminal());
    }

    #[test]
    fn decodes_events_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push_str("data: {\"a\"").is_empty());
        assert!(decoder.push_str(":1}\n").is_empty());
        assert_eq!(decoder.push_str("\ndata: second\n\n"), vec![
            "{\"a\":1}".to_string(),
            "second".to_string()
        ]);
    }

    #[test]
    fn skips_comments_and_other_fields() {
        let mut decoder = SseDecoder::new();
        let out = decoder.push_str(": keep-alive\n\nevent: message\nid: 7\ndata:x\r\n\r\n");
        assert_eq!(out, vec!["x".to_string()]);
    }

    #[test]
    fn joins_multiline_data() {
        let mut decoder = SseDecoder::new();
        let out = decoder.push_str("data: one\ndata: two\n\n");
        assert_eq!(out, vec!["one\ntwo".to_string()]);
    }

    #[test]
    fn keeps_split_utf8_sequences() {
        let mut decoder = SseDecoder::new();
        let bytes = "data: привет\n\n".as_bytes();
        // Split inside the two-byte "п"
        assert!(decoder.push_bytes(&bytes[..7]).is_empty());
        assert_eq!(decoder.push_bytes(&bytes[7..]), vec!["привет".to_string()]);
    }

    #[test]
    fn finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push_str("data: tail").is_empty());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
        assert_eq!(decoder.finish(), None);
    }
}
