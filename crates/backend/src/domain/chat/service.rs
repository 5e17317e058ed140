use contracts::chat::stream::ChatStreamEvent;
use futures::{Stream, StreamExt};

use crate::shared::llm::{LlmChunk, LlmStream};

/// Turn provider chunks into stream events.
///
/// The result always ends with exactly one terminal event: `Done` when the
/// provider finishes or closes the stream, `Error` on the first failure.
/// Nothing after a terminal event is forwarded.
pub fn to_events(chunks: LlmStream) -> impl Stream<Item = ChatStreamEvent> + Send {
    futures::stream::unfold(Some(chunks), |state| async move {
        let mut chunks = state?;
        let event = match chunks.next().await {
            Some(Ok(LlmChunk::Delta(content))) => {
                return Some((ChatStreamEvent::Delta { content }, Some(chunks)));
            }
            Some(Ok(LlmChunk::Finished(finish_reason))) => ChatStreamEvent::Done { finish_reason },
            Some(Err(e)) => ChatStreamEvent::Error {
                message: e.to_string(),
            },
            None => ChatStreamEvent::Done {
                finish_reason: None,
            },
        };
        Some((event, None))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::llm::LlmError;
    use futures::executor::block_on;

    fn run(chunks: Vec<Result<LlmChunk, LlmError>>) -> Vec<ChatStreamEvent> {
        block_on(to_events(futures::stream::iter(chunks).boxed()).collect())
    }

    fn delta(content: &str) -> ChatStreamEvent {
        ChatStreamEvent::Delta {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_deltas_then_done() {
        let events = run(vec![
            Ok(LlmChunk::Delta("Hel".to_string())),
            Ok(LlmChunk::Delta("lo".to_string())),
            Ok(LlmChunk::Finished(Some("stop".to_string()))),
            Ok(LlmChunk::Delta("ignored".to_string())),
        ]);
        assert_eq!(
            events,
            vec![
                delta("Hel"),
                delta("lo"),
                ChatStreamEvent::Done {
                    finish_reason: Some("stop".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_closed_stream_ends_with_done() {
        let events = run(vec![Ok(LlmChunk::Delta("partial".to_string()))]);
        assert_eq!(
            events,
            vec![delta("partial"), ChatStreamEvent::Done { finish_reason: None }]
        );
    }

    #[test]
    fn test_error_is_terminal() {
        let events = run(vec![
            Ok(LlmChunk::Delta("a".to_string())),
            Err(LlmError::RateLimitExceeded),
            Ok(LlmChunk::Delta("b".to_string())),
        ]);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            ChatStreamEvent::Error {
                message: "Rate limit exceeded".to_string()
            }
        );
    }
}
