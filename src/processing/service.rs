//! Summary service coordinating extraction, normalization, and the model adapter.

use crate::{
    config::get_config,
    extraction::{Document, DocumentKind, ExtractedText},
    metrics::{MetricsSnapshot, PipelineMetrics},
    processing::{
        interaction::Interaction,
        normalize::normalize,
        types::{PipelineError, PipelineSettings, Summary},
    },
    summarization::{
        SummarizationClient, SummarizationClientError, SummaryBounds, SummaryRequest,
        shared_summarization_client,
    },
};
use async_trait::async_trait;
use std::sync::Arc;

/// Runs upload → extract → normalize → summarize for each interaction.
///
/// The service owns a handle to the summarization client and the metrics registry so that the
/// HTTP surface and the command line reuse the same components. Construct it once near process
/// start and share it through an `Arc`.
pub struct SummaryService {
    client: Arc<dyn SummarizationClient>,
    settings: PipelineSettings,
    metrics: Arc<PipelineMetrics>,
}

/// Text recovered from an upload together with its resolved kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Kind the extraction dispatched on.
    pub kind: DocumentKind,
    /// Extracted text.
    pub text: String,
}

/// Abstraction over the pipeline used by external surfaces.
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// Extract text from an upload without summarizing it.
    async fn extract_document(
        &self,
        document: Option<Document>,
    ) -> Result<ExtractedDocument, PipelineError>;

    /// Run a full interaction: extract, normalize, and summarize.
    async fn summarize_document(
        &self,
        document: Option<Document>,
        bounds: SummaryBounds,
    ) -> Result<Summary, PipelineError>;

    /// Settings used to resolve request bounds.
    fn settings(&self) -> PipelineSettings;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl SummaryService {
    /// Build a service around an explicit summarization client.
    pub fn new(client: Arc<dyn SummarizationClient>, settings: PipelineSettings) -> Self {
        Self {
            client,
            settings,
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Build a service from the global configuration and the process-wide client.
    pub fn from_config() -> Result<Self, SummarizationClientError> {
        let settings = PipelineSettings::from_config(get_config());
        tracing::info!(
            input_char_limit = settings.input_char_limit,
            "Initializing summarization client"
        );
        let client = shared_summarization_client()?;
        Ok(Self::new(client, settings))
    }

    /// Pipeline settings in effect.
    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// Receive an upload into the interaction and extract its text.
    ///
    /// The empty sentinel moves the interaction to its terminal no-text state and is reported as
    /// [`PipelineError::NoText`]. Parser faults end the interaction.
    pub fn receive(
        &self,
        interaction: &mut Interaction,
        document: &Document,
    ) -> Result<(), PipelineError> {
        interaction.ensure_accepting()?;
        self.metrics.record_document();
        tracing::info!(
            kind = document.kind().mime(),
            bytes = document.bytes().len(),
            file_name = document.file_name(),
            "Document received"
        );

        let extracted = match document.extract() {
            Ok(extracted) => extracted,
            Err(error) => {
                let error = PipelineError::from(error);
                tracing::error!(error = %error, "Extraction fault");
                interaction.fail(&error);
                return Err(error);
            }
        };

        if matches!(extracted, ExtractedText::Empty) {
            self.metrics.record_no_text();
            tracing::warn!(kind = document.kind().mime(), "No readable text found");
        }
        interaction.accept(extracted)
    }

    /// Summarize the interaction's text: normalize, then call the model once.
    pub async fn generate(
        &self,
        interaction: &mut Interaction,
        bounds: SummaryBounds,
    ) -> Result<Summary, PipelineError> {
        let text = match interaction.text_to_summarize() {
            Ok(text) => normalize(text, self.settings.input_char_limit),
            Err(error) => {
                tracing::warn!(error = %error, "Summary requested without usable text");
                return Err(error);
            }
        };

        tracing::info!(
            chars = text.chars().count(),
            min_length = bounds.min_length,
            max_length = bounds.max_length,
            "Generating summary"
        );
        match self.client.summarize(SummaryRequest { text, bounds }).await {
            Ok(text) => {
                let summary = Summary { text };
                self.metrics.record_summary();
                tracing::info!(chars = summary.text.chars().count(), "Summary generated");
                interaction.complete(summary.clone());
                Ok(summary)
            }
            Err(error) => {
                let error = PipelineError::from(error);
                tracing::error!(error = %error, "Summarization fault");
                interaction.fail(&error);
                Err(error)
            }
        }
    }

    /// Extract text from an upload, treating the empty sentinel as an error.
    pub fn extract_document(
        &self,
        document: Option<Document>,
    ) -> Result<ExtractedDocument, PipelineError> {
        let document = document.ok_or(PipelineError::NoInput)?;
        let mut interaction = Interaction::new();
        self.receive(&mut interaction, &document)?;
        let text = interaction.text().unwrap_or_default().to_string();
        Ok(ExtractedDocument {
            kind: document.kind(),
            text,
        })
    }

    /// Run one complete interaction.
    pub async fn summarize_document(
        &self,
        document: Option<Document>,
        bounds: SummaryBounds,
    ) -> Result<Summary, PipelineError> {
        let mut interaction = Interaction::new();
        if let Some(document) = document.as_ref() {
            self.receive(&mut interaction, document)?;
        }
        self.generate(&mut interaction, bounds).await
    }

    /// Return the current metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl SummaryApi for SummaryService {
    async fn extract_document(
        &self,
        document: Option<Document>,
    ) -> Result<ExtractedDocument, PipelineError> {
        SummaryService::extract_document(self, document)
    }

    async fn summarize_document(
        &self,
        document: Option<Document>,
        bounds: SummaryBounds,
    ) -> Result<Summary, PipelineError> {
        SummaryService::summarize_document(self, document, bounds).await
    }

    fn settings(&self) -> PipelineSettings {
        SummaryService::settings(self)
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        SummaryService::metrics_snapshot(self)
    }
}
