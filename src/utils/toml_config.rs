//! TOML-based configuration for Recall
//!
//! Configuration is read once at startup from `recall.toml`. Secrets are never
//! written into the file; providers name the environment variable that holds
//! them instead.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::agents::DEFAULT_SYSTEM_PROMPT;
use crate::llm::Provider;
use crate::memory::{CompressionConfig, DEFAULT_COMPRESSION_THRESHOLD};

/// Root configuration structure loaded from recall.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecallConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Provider used for chat replies
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Provider used for summaries (defaults to `provider`)
    #[serde(default)]
    pub summarizer: Option<ProviderConfig>,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Memory Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Sessions holding more messages than this are compressed
    #[serde(default = "default_compression_threshold")]
    pub compression_threshold: usize,

    /// Upper bound for one summarizer call
    #[serde(default = "default_summarizer_timeout_secs")]
    pub summarizer_timeout_secs: u64,

    /// Session used by chat requests that do not name one
    #[serde(default = "default_session_id")]
    pub default_session_id: String,
}

fn default_compression_threshold() -> usize {
    DEFAULT_COMPRESSION_THRESHOLD
}

fn default_summarizer_timeout_secs() -> u64 {
    60
}

fn default_session_id() -> String {
    "demo-id".to_string()
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            compression_threshold: default_compression_threshold(),
            summarizer_timeout_secs: default_summarizer_timeout_secs(),
            default_session_id: default_session_id(),
        }
    }
}

impl MemoryConfig {
    pub fn compression(&self) -> CompressionConfig {
        CompressionConfig {
            threshold: self.compression_threshold,
            summarizer_timeout: Duration::from_secs(self.summarizer_timeout_secs),
        }
    }
}

// ============= Assistant Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
        }
    }
}

// ============= Provider Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        #[serde(default = "default_ollama_model")]
        model: String,
    },
    OpenAI {
        /// Environment variable containing API key
        api_key_env: String,
        #[serde(default = "default_openai_base")]
        api_base: String,
        model: String,
    },
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Ollama {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

impl ProviderConfig {
    /// Resolve env var references into a runtime [`Provider`]
    pub fn to_provider(&self) -> Result<Provider, ConfigError> {
        match self {
            ProviderConfig::Ollama { base_url, model } => Ok(Provider::Ollama {
                base_url: base_url.clone(),
                model: model.clone(),
            }),
            ProviderConfig::OpenAI {
                api_key_env,
                api_base,
                model,
            } => {
                let api_key = std::env::var(api_key_env)
                    .map_err(|_| ConfigError::MissingEnvVar(api_key_env.clone()))?;
                Ok(Provider::OpenAI {
                    api_key,
                    api_base: api_base.clone(),
                    model: model.clone(),
                })
            }
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl RecallConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: RecallConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate value ranges and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.compression_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "memory.compression_threshold must be at least 1".to_string(),
            ));
        }
        if self.memory.summarizer_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "memory.summarizer_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.memory.default_session_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "memory.default_session_id must not be empty".to_string(),
            ));
        }

        self.chat_provider()?;
        self.summarizer_provider()?;
        Ok(())
    }

    /// Short name of the chat provider type, for logs
    pub fn provider_name(&self) -> &'static str {
        match self.provider {
            ProviderConfig::Ollama { .. } => "ollama",
            ProviderConfig::OpenAI { .. } => "openai",
        }
    }

    /// Provider for chat replies
    pub fn chat_provider(&self) -> Result<Provider, ConfigError> {
        self.provider.to_provider()
    }

    /// Provider for summaries, falling back to the chat provider
    pub fn summarizer_provider(&self) -> Result<Provider, ConfigError> {
        self.summarizer
            .as_ref()
            .unwrap_or(&self.provider)
            .to_provider()
    }
}
