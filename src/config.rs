use crate::processing::{MAX_LENGTH_RANGE, MIN_LENGTH_RANGE};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Default character budget applied to extracted text before summarization.
pub const DEFAULT_INPUT_CHAR_LIMIT: usize = 3000;
/// Default upper bound on summary length, in model tokens.
pub const DEFAULT_MAX_LENGTH: usize = 150;
/// Default lower bound on summary length, in model tokens.
pub const DEFAULT_MIN_LENGTH: usize = 40;
/// Model used when the Hugging Face provider is selected without an explicit model.
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "facebook/bart-large-cnn";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the summarizer service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend used to produce abstractive summaries.
    pub summarization_provider: SummarizationProvider,
    /// Model identifier passed to the provider.
    pub summarization_model: String,
    /// Optional override for the Hugging Face inference base URL.
    pub huggingface_url: Option<String>,
    /// Optional access token; providers that do not need one ignore it.
    pub huggingface_token: Option<String>,
    /// Optional override for the Ollama base URL.
    pub ollama_url: Option<String>,
    /// Maximum number of characters handed to the model.
    pub input_char_limit: usize,
    /// Default `max_length` offered to callers that do not choose one.
    pub default_max_length: usize,
    /// Default `min_length` offered to callers that do not choose one.
    pub default_min_length: usize,
    /// Optional decorative image rendered behind the upload page.
    pub background_image: Option<PathBuf>,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

/// Supported abstractive summarization backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizationProvider {
    /// Hosted Hugging Face inference endpoint.
    HuggingFace,
    /// Local Ollama runtime.
    Ollama,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let summarization_provider = match load_env_optional("SUMMARIZATION_PROVIDER") {
            Some(value) => value.parse().map_err(|()| {
                ConfigError::InvalidValue("SUMMARIZATION_PROVIDER".to_string())
            })?,
            None => SummarizationProvider::HuggingFace,
        };
        let summarization_model = match (
            load_env_optional("SUMMARIZATION_MODEL"),
            summarization_provider,
        ) {
            (Some(model), _) => model,
            (None, SummarizationProvider::HuggingFace) => DEFAULT_HUGGINGFACE_MODEL.to_string(),
            (None, SummarizationProvider::Ollama) => {
                return Err(ConfigError::MissingVariable(
                    "SUMMARIZATION_MODEL".to_string(),
                ));
            }
        };

        let config = Self {
            summarization_provider,
            summarization_model,
            huggingface_url: load_env_optional("HUGGINGFACE_URL"),
            huggingface_token: load_env_optional("HF_TOKEN")
                .or_else(|| load_env_optional("HUGGINGFACEHUB_API_TOKEN")),
            ollama_url: load_env_optional("OLLAMA_URL"),
            input_char_limit: load_parsed("DOCSUM_INPUT_CHAR_LIMIT")?
                .unwrap_or(DEFAULT_INPUT_CHAR_LIMIT),
            default_max_length: load_parsed("DOCSUM_DEFAULT_MAX_LENGTH")?
                .unwrap_or(DEFAULT_MAX_LENGTH),
            default_min_length: load_parsed("DOCSUM_DEFAULT_MIN_LENGTH")?
                .unwrap_or(DEFAULT_MIN_LENGTH),
            background_image: load_env_optional("DOCSUM_BACKGROUND_IMAGE").map(PathBuf::from),
            server_port: load_parsed("SERVER_PORT")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the numeric settings fall inside the ranges the upload page offers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_char_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "DOCSUM_INPUT_CHAR_LIMIT".to_string(),
            ));
        }
        if !MAX_LENGTH_RANGE.contains(&self.default_max_length) {
            return Err(ConfigError::InvalidValue(
                "DOCSUM_DEFAULT_MAX_LENGTH".to_string(),
            ));
        }
        if !MIN_LENGTH_RANGE.contains(&self.default_min_length) {
            return Err(ConfigError::InvalidValue(
                "DOCSUM_DEFAULT_MIN_LENGTH".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summarization_provider: SummarizationProvider::HuggingFace,
            summarization_model: DEFAULT_HUGGINGFACE_MODEL.to_string(),
            huggingface_url: None,
            huggingface_token: None,
            ollama_url: None,
            input_char_limit: DEFAULT_INPUT_CHAR_LIMIT,
            default_max_length: DEFAULT_MAX_LENGTH,
            default_min_length: DEFAULT_MIN_LENGTH,
            background_image: None,
            server_port: None,
        }
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

impl std::str::FromStr for SummarizationProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    CONFIG.set(config).expect("Failed to set config");
}
