use super::types::{LlmChunk, LlmError, LlmProvider, LlmStream};
use crate::shared::config::LlmConfig;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionStreamResponse,
    },
    Client,
};
use async_trait::async_trait;
use contracts::chat::{ChatMessage, ChatRole};
use futures::StreamExt;

/// OpenAI provider, also used for OpenAI-compatible endpoints
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    system_prompt: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider for the public OpenAI API
    pub fn new(api_key: String, model: String, temperature: f64, max_tokens: i32) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self::with_client(Client::with_config(config), model, temperature, max_tokens)
    }

    /// Create with a custom endpoint (for compatible APIs)
    pub fn new_with_endpoint(
        api_endpoint: String,
        api_key: String,
        model: String,
        temperature: f64,
        max_tokens: i32,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_endpoint);
        Self::with_client(Client::with_config(config), model, temperature, max_tokens)
    }

    fn with_client(
        client: Client<OpenAIConfig>,
        model: String,
        temperature: f64,
        max_tokens: i32,
    ) -> Self {
        Self {
            client,
            model,
            temperature: temperature as f32,
            max_tokens: max_tokens.max(1) as u32,
            system_prompt: None,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.provider.eq_ignore_ascii_case("openai") {
            return Err(LlmError::UnsupportedProvider(config.provider.clone()));
        }
        let provider = match config.api_endpoint.as_deref().filter(|e| !e.is_empty()) {
            Some(endpoint) => Self::new_with_endpoint(
                endpoint.to_string(),
                config.api_key.clone(),
                config.model.clone(),
                config.temperature,
                config.max_tokens,
            ),
            None => Self::new(
                config.api_key.clone(),
                config.model.clone(),
                config.temperature,
                config.max_tokens,
            ),
        };
        Ok(provider.with_system_prompt(config.system_prompt.clone()))
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt.filter(|p| !p.trim().is_empty());
        self
    }

    /// The configured system prompt goes first; system messages sent by the
    /// client are dropped
    fn conversation(&self, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
        self.system_prompt
            .iter()
            .map(ChatMessage::system)
            .chain(messages.into_iter().filter(|m| m.role != ChatRole::System))
            .collect()
    }

    /// Convert our messages to the OpenAI format
    fn convert_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<Vec<ChatCompletionRequestMessage>, LlmError> {
        let mut openai_messages = Vec::new();

        for msg in self.conversation(messages) {
            let openai_msg = match msg.role {
                ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(msg.content)
                    .build()
                    .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
                    .into(),
                ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(msg.content)
                    .build()
                    .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
                    .into(),
                ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(msg.content)
                    .build()
                    .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
                    .into(),
            };
            openai_messages.push(openai_msg);
        }

        Ok(openai_messages)
    }

    fn map_error(e: OpenAIError) -> LlmError {
        let err_str = e.to_string();
        if err_str.contains("401") || err_str.contains("authentication") {
            LlmError::AuthError(err_str)
        } else if err_str.contains("429") || err_str.contains("rate limit") {
            LlmError::RateLimitExceeded
        } else if err_str.contains("error sending request") || err_str.contains("connection") {
            LlmError::NetworkError(err_str)
        } else {
            LlmError::ApiError(err_str)
        }
    }

    /// Chunks carried by one streamed response
    fn chunks(response: CreateChatCompletionStreamResponse) -> Vec<Result<LlmChunk, LlmError>> {
        let mut chunks = Vec::new();
        for choice in response.choices {
            if let Some(content) = choice.delta.content.filter(|c| !c.is_empty()) {
                chunks.push(Ok(LlmChunk::Delta(content)));
            }
            if let Some(reason) = choice.finish_reason {
                chunks.push(Ok(LlmChunk::Finished(Some(
                    format!("{:?}", reason).to_lowercase(),
                ))));
            }
        }
        chunks
    }

    /// Whether the model accepts temperature and max_completion_tokens.
    ///
    /// GPT-5 and o1/o3 models only accept the default temperature and no
    /// token limit.
    fn supports_advanced_params(model_id: &str) -> bool {
        let is_restricted = model_id.starts_with("gpt-5")
            || model_id.starts_with("o1-")
            || model_id.starts_with("o3-");

        !is_restricted
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat_completion_stream(&self, messages: Vec<ChatMessage>) -> Result<LlmStream, LlmError> {
        let openai_messages = self.convert_messages(messages)?;

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .messages(openai_messages)
            .stream(true);

        if Self::supports_advanced_params(&self.model) {
            request_builder
                .temperature(self.temperature)
                .max_completion_tokens(self.max_tokens);
        }

        let request = request_builder
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;

        let stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(Self::map_error)?;

        Ok(stream
            .flat_map(|item| {
                let chunks = match item {
                    Ok(response) => Self::chunks(response),
                    Err(e) => vec![Err(Self::map_error(e))],
                };
                futures::stream::iter(chunks)
            })
            .boxed())
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(system_prompt: Option<&str>) -> OpenAiProvider {
        OpenAiProvider::new("sk-test".to_string(), "gpt-4o-mini".to_string(), 0.7, 256)
            .with_system_prompt(system_prompt.map(str::to_string))
    }

    #[test]
    fn test_system_prompt_is_prepended() {
        let messages = provider(Some("Be brief.")).conversation(vec![
            ChatMessage::system("ignored"),
            ChatMessage::user("Hi"),
        ]);
        assert_eq!(messages, vec![ChatMessage::system("Be brief."), ChatMessage::user("Hi")]);
    }

    #[test]
    fn test_blank_system_prompt_is_skipped() {
        let messages = provider(Some("  ")).conversation(vec![ChatMessage::user("Hi")]);
        assert_eq!(messages, vec![ChatMessage::user("Hi")]);
    }

    #[test]
    fn test_restricted_models() {
        assert!(OpenAiProvider::supports_advanced_params("gpt-4o-mini"));
        assert!(!OpenAiProvider::supports_advanced_params("gpt-5"));
        assert!(!OpenAiProvider::supports_advanced_params("o1-preview"));
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let config = LlmConfig {
            provider: "anthropic".to_string(),
            api_endpoint: None,
            api_key: String::new(),
            model: "m".to_string(),
            temperature: 0.0,
            max_tokens: 16,
            system_prompt: None,
        };
        assert!(matches!(
            OpenAiProvider::from_config(&config),
            Err(LlmError::UnsupportedProvider(_))
        ));
    }
}
