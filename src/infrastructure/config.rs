use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::advisory::Settings;
use crate::advisory::prompt::DEFAULT_MAX_EXCERPT_CHARS;
use crate::client::openai::v1::chat::completions::GPT_4O_MINI;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub fetch: FetchConfig,
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    /// `0` leaves the completion call unbounded.
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: GPT_4O_MINI.to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// `0` leaves the page fetch unbounded.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptConfig {
    pub max_excerpt_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_excerpt_chars: DEFAULT_MAX_EXCERPT_CHARS,
        }
    }
}

impl Config {
    const PATH_VAR: &str = "ADVISOR_CONFIG";
    const DEFAULT_PATH: &str = "config.toml";

    /// Reads the config file (if any) and applies environment overrides.
    pub async fn load() -> Result<Self> {
        let path = env::var(Self::PATH_VAR).unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        let path = Path::new(&path);

        let config = if path.exists() {
            Self::read(path).await?
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        Ok(config.with_env_overrides(|key| env::var(key).ok()))
    }

    pub async fn read(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind_address) = var("BIND_ADDRESS") {
            self.server.bind_address = bind_address;
        }
        if let Some(base_url) = var("OPENAI_BASE_URL") {
            self.openai.base_url = base_url;
        }
        if let Some(model) = var("OPENAI_MODEL") {
            self.openai.model = model;
        }

        self
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            openai_base_url: config.openai.base_url.clone(),
            model: config.openai.model.clone(),
            max_excerpt_chars: config.prompt.max_excerpt_chars,
            fetch_timeout: seconds(config.fetch.timeout_secs),
            completion_timeout: seconds(config.openai.timeout_secs),
        }
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
