use contracts::upload::FileConstraints;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub parse: ParseConfig,
    pub uploads: UploadsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: String,
    /// OpenAI-compatible base URL; the public OpenAI API when absent
    #[serde(default)]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i32,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ParseConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadsConfig {
    pub dir: String,
    pub max_file_size_mb: f64,
    pub accepted_types: String,
}

impl UploadsConfig {
    /// Limits enforced on uploaded files, same rules as the file input
    pub fn constraints(&self) -> FileConstraints {
        FileConstraints {
            accepted_types: Some(self.accepted_types.clone()),
            max_file_size: Some(self.max_file_size_mb),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[llm]
provider = "openai"
api_key = ""
model = "gpt-4o-mini"
temperature = 0.7
max_tokens = 1024
system_prompt = "You are a helpful assistant. Answer concisely."

[parse]
timeout_secs = 15
user_agent = "parsechat/0.1"

[uploads]
dir = "target/uploads"
max_file_size_mb = 5.0
accepted_types = ".png,.jpeg,.gif,.webp"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `OPENAI_API_KEY` fills in an empty `llm.api_key`.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config()?;
    apply_env_overrides(&mut config, std::env::var("OPENAI_API_KEY").ok());
    Ok(config)
}

fn read_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config, openai_api_key: Option<String>) {
    if config.llm.api_key.trim().is_empty() {
        if let Some(key) = openai_api_key.filter(|k| !k.trim().is_empty()) {
            config.llm.api_key = key;
        }
    }
}

/// Get the upload directory from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_uploads_dir(config: &Config) -> PathBuf {
    let dir_str = &config.uploads.dir;
    let dir = Path::new(dir_str);

    // If absolute path, use as is
    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(dir);
        }
    }

    // Fallback: use relative to current directory
    PathBuf::from(dir_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> Config {
        toml::from_str(DEFAULT_CONFIG).unwrap()
    }

    #[test]
    fn test_default_config_loads() {
        let config = default_config();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_endpoint, None);
        assert_eq!(config.parse.timeout_secs, 15);
        assert_eq!(config.uploads.dir, "target/uploads");
        assert_eq!(config.uploads.max_file_size_mb, 5.0);
    }

    #[test]
    fn test_env_key_fills_empty_api_key() {
        let mut config = default_config();
        apply_env_overrides(&mut config, Some("sk-env".to_string()));
        assert_eq!(config.llm.api_key, "sk-env");

        config.llm.api_key = "sk-file".to_string();
        apply_env_overrides(&mut config, Some("sk-other".to_string()));
        assert_eq!(config.llm.api_key, "sk-file");
    }

    #[test]
    fn test_upload_constraints() {
        let constraints = default_config().uploads.constraints();
        assert_eq!(constraints.accepted_types.as_deref(), Some(".png,.jpeg,.gif,.webp"));
        assert_eq!(constraints.max_file_size, Some(5.0));
    }

    #[test]
    fn test_absolute_uploads_dir_is_kept() {
        let mut config = default_config();
        let dir = std::env::temp_dir().join("parsechat-uploads");
        config.uploads.dir = dir.to_string_lossy().into_owned();
        assert_eq!(get_uploads_dir(&config), dir);
    }
}
