use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::shared::config::{get_uploads_dir, Config};
use crate::shared::llm::{openai_provider::OpenAiProvider, LlmProvider};

/// Immutable state shared by all handlers
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn LlmProvider>,
    /// Client used to fetch pages for parsing
    pub http: reqwest::Client,
    pub uploads_dir: PathBuf,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<SharedState> {
        let llm = OpenAiProvider::from_config(&config.llm)?;
        if config.llm.api_key.trim().is_empty() {
            tracing::warn!("llm.api_key is empty and OPENAI_API_KEY is not set; chat requests will fail");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.parse.timeout_secs))
            .user_agent(config.parse.user_agent.clone())
            .build()?;

        let uploads_dir = get_uploads_dir(&config);

        Ok(Arc::new(Self {
            config,
            llm: Arc::new(llm),
            http,
            uploads_dir,
        }))
    }
}
