use super::{
    SummarizationClient, SummarizationClientError, SummaryBounds, SummaryRequest, http_client,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Summarizer backed by a local Ollama runtime.
pub struct OllamaSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizationClient {
    /// Construct a client targeting the given Ollama base URL and model.
    pub fn new(base_url: String, model: String) -> Result<Self, SummarizationClientError> {
        Ok(Self {
            http: http_client("docsum/summary")?,
            base_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

fn build_prompt(text: &str, bounds: SummaryBounds) -> String {
    format!(
        "System: You write concise, factual abstractive summaries. Paraphrase; do not copy sentences verbatim. \
         Use between {min} and {max} tokens. Output a single paragraph with no preamble.\n\n\
         Document:\n{text}\n\nSummary:",
        min = bounds.min_length,
        max = bounds.max_length,
    )
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummarizationClient for OllamaSummarizationClient {
    async fn summarize(&self, request: SummaryRequest) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": self.model,
            "prompt": build_prompt(&request.text, request.bounds),
            "stream": false,
            "options": {
                "temperature": 0.0,
                "seed": 0,
                "num_predict": request.bounds.max_length,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;

        if !body.done {
            return Err(SummarizationClientError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        let summary = body.response.trim();
        if summary.is_empty() {
            return Err(SummarizationClientError::EmptyResponse);
        }
        Ok(summary.to_string())
    }
}
