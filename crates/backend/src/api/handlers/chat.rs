use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use contracts::chat::stream::ChatStreamEvent;
use contracts::chat::ChatCompletionRequest;
use futures::{Stream, StreamExt};

use crate::domain::chat::service;
use crate::shared::error::ApiError;
use crate::shared::state::SharedState;

/// POST /api/chat/stream
///
/// Relays the completion as server-sent events, one `ChatStreamEvent` per
/// `data:` line. The provider stream is dropped when the client disconnects.
pub async fn stream(
    State(state): State<SharedState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    request.validate().map_err(ApiError::Unprocessable)?;

    tracing::info!(
        "Chat completion via {}: {} messages",
        state.llm.provider_name(),
        request.messages.len()
    );
    let chunks = state.llm.chat_completion_stream(request.messages).await?;

    let events = service::to_events(chunks).map(|event| {
        match &event {
            ChatStreamEvent::Error { message } => tracing::error!("Chat stream failed: {}", message),
            ChatStreamEvent::Done { finish_reason } => {
                tracing::info!("Chat stream finished: {:?}", finish_reason)
            }
            ChatStreamEvent::Delta { .. } => {}
        }
        Event::default().json_data(&event)
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
