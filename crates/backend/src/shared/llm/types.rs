use async_trait::async_trait;
use contracts::chat::ChatMessage;
use futures::stream::BoxStream;
use thiserror::Error;

/// LLM provider errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider not supported: {0}")]
    UnsupportedProvider(String),
}

/// One piece of a streamed completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmChunk {
    Delta(String),
    /// The provider reported the end of the answer
    Finished(Option<String>),
}

pub type LlmStream = BoxStream<'static, Result<LlmChunk, LlmError>>;

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Start a streamed chat completion
    async fn chat_completion_stream(&self, messages: Vec<ChatMessage>) -> Result<LlmStream, LlmError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}
