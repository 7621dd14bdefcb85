//! Abstractions for generating abstractive summaries via external models.
//!
//! The model is an opaque text-to-text function. Each adapter issues exactly one request per
//! summary with deterministic decoding and returns the top-ranked candidate. There is no retry
//! and no fallback model; failures propagate to the caller.

mod huggingface;
mod ollama;

pub use huggingface::HuggingFaceSummarizationClient;
pub use ollama::OllamaSummarizationClient;

use crate::config::{Config, SummarizationProvider, get_config};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

const DEFAULT_HUGGINGFACE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors surfaced while attempting abstractive summarization.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider could not be constructed or reached.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
    /// Provider answered without any candidate summary.
    #[error("Provider returned no summary candidates")]
    EmptyResponse,
}

/// Output length bounds, expressed in model units (tokens), not characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBounds {
    /// Minimum summary length.
    pub min_length: usize,
    /// Maximum summary length.
    pub max_length: usize,
}

/// Request payload passed to the summarization provider.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// Normalized document text.
    pub text: String,
    /// Length bounds forwarded to the model.
    pub bounds: SummaryBounds,
}

/// Interface implemented by abstractive summarization providers.
///
/// Implementations must be safe to call concurrently; the shared instance is read-only.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Produce the highest-ranked summary for the request.
    async fn summarize(&self, request: SummaryRequest) -> Result<String, SummarizationClientError>;
}

/// Build a summarization client for the supplied configuration.
pub fn build_summarization_client(
    config: &Config,
) -> Result<Arc<dyn SummarizationClient>, SummarizationClientError> {
    let client: Arc<dyn SummarizationClient> = match config.summarization_provider {
        SummarizationProvider::HuggingFace => {
            let base_url = config
                .huggingface_url
                .clone()
                .unwrap_or_else(|| DEFAULT_HUGGINGFACE_URL.to_string());
            Arc::new(HuggingFaceSummarizationClient::new(
                base_url,
                config.summarization_model.clone(),
                config.huggingface_token.clone(),
            )?)
        }
        SummarizationProvider::Ollama => {
            let base_url = config
                .ollama_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
            Arc::new(OllamaSummarizationClient::new(
                base_url,
                config.summarization_model.clone(),
            )?)
        }
    };
    tracing::info!(
        provider = ?config.summarization_provider,
        model = %config.summarization_model,
        "Summarization client initialized"
    );
    Ok(client)
}

static SHARED_CLIENT: OnceLock<Arc<dyn SummarizationClient>> = OnceLock::new();

/// Process-wide summarization client, built from the global configuration on first use.
///
/// Later calls reuse the same instance for the lifetime of the process.
pub fn shared_summarization_client() -> Result<Arc<dyn SummarizationClient>, SummarizationClientError>
{
    if let Some(client) = SHARED_CLIENT.get() {
        return Ok(client.clone());
    }
    let client = build_summarization_client(get_config())?;
    Ok(SHARED_CLIENT.get_or_init(|| client).clone())
}

fn http_client(user_agent: &str) -> Result<reqwest::Client, SummarizationClientError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|error| {
            SummarizationClientError::ProviderUnavailable(format!(
                "failed to construct HTTP client: {error}"
            ))
        })
}
