use super::{SummarizationClient, SummarizationClientError, SummaryRequest, http_client};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Summarizer backed by a Hugging Face inference endpoint (`facebook/bart-large-cnn` by default).
pub struct HuggingFaceSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
    token: Option<String>,
}

impl HuggingFaceSummarizationClient {
    /// Construct a client; `token` is sent as a bearer credential only when present.
    pub fn new(
        base_url: String,
        model: String,
        token: Option<String>,
    ) -> Result<Self, SummarizationClientError> {
        Ok(Self {
            http: http_client("docsum/summary")?,
            base_url,
            model,
            token,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model.trim_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    summary_text: String,
}

#[async_trait]
impl SummarizationClient for HuggingFaceSummarizationClient {
    async fn summarize(&self, request: SummaryRequest) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "inputs": request.text,
            "parameters": {
                "min_length": request.bounds.min_length,
                "max_length": request.bounds.max_length,
                // Greedy decoding keeps summaries reproducible.
                "do_sample": false,
            },
            "options": {
                "wait_for_model": true,
            }
        });

        let mut builder = self.http.post(self.endpoint()).json(&payload);
        if let Some(token) = self.token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|error| {
            SummarizationClientError::ProviderUnavailable(format!(
                "failed to reach Hugging Face at {}: {error}",
                self.base_url
            ))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "model endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Hugging Face returned {status}: {body}"
            )));
        }

        let candidates: Vec<Candidate> = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Hugging Face response: {error}"
            ))
        })?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or(SummarizationClientError::EmptyResponse)?;
        Ok(first.summary_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarization::SummaryBounds;
    use httpmock::{Method::POST, MockServer};

    fn request() -> SummaryRequest {
        SummaryRequest {
            text: "Hello world. ".repeat(20),
            bounds: SummaryBounds {
                min_length: 40,
                max_length: 150,
            },
        }
    }

    fn client(server: &MockServer, token: Option<&str>) -> HuggingFaceSummarizationClient {
        HuggingFaceSummarizationClient::new(
            server.base_url(),
            "facebook/bart-large-cnn".into(),
            token.map(str::to_string),
        )
        .expect("client")
    }

    #[tokio::test]
    async fn returns_first_candidate_with_deterministic_parameters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/facebook/bart-large-cnn")
                    .json_body_partial(
                        r#"{"parameters": {"min_length": 40, "max_length": 150, "do_sample": false}}"#,
                    );
                then.status(200).json_body(json!([
                    { "summary_text": " First candidate. " },
                    { "summary_text": "Second candidate." }
                ]));
            })
            .await;

        let summary = client(&server, None)
            .summarize(request())
            .await
            .expect("summary");

        mock.assert_async().await;
        assert_eq!(summary, " First candidate. ");
    }

    #[tokio::test]
    async fn sends_bearer_token_when_configured() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/facebook/bart-large-cnn")
                    .header("authorization", "Bearer hf_secret");
                then.status(200)
                    .json_body(json!([{ "summary_text": "ok" }]));
            })
            .await;

        client(&server, Some("hf_secret"))
            .summarize(request())
            .await
            .expect("summary");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_generation_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/facebook/bart-large-cnn");
                then.status(500).body("index out of range in self");
            })
            .await;

        let error = client(&server, None)
            .summarize(request())
            .await
            .expect_err("error response");
        assert!(
            matches!(error, SummarizationClientError::GenerationFailed(ref message) if message.contains("500"))
        );
    }

    #[tokio::test]
    async fn empty_candidate_list_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/facebook/bart-large-cnn");
                then.status(200).json_body(json!([]));
            })
            .await;

        let error = client(&server, None)
            .summarize(request())
            .await
            .expect_err("empty response");
        assert!(matches!(error, SummarizationClientError::EmptyResponse));
    }

    #[tokio::test]
    async fn identical_requests_yield_identical_summaries() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/facebook/bart-large-cnn");
                then.status(200)
                    .json_body(json!([{ "summary_text": "Stable summary." }]));
            })
            .await;

        let client = client(&server, None);
        let first = client.summarize(request()).await.expect("first");
        let second = client.summarize(request()).await.expect("second");
        assert_eq!(first, second);
    }
}
