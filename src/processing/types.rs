//! Core data types and error definitions for the summarization pipeline.

use crate::{
    config::Config,
    extraction::ExtractionError,
    summarization::{SummarizationClientError, SummaryBounds},
};
use serde::Serialize;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Accepted range for `max_length`.
pub const MAX_LENGTH_RANGE: RangeInclusive<usize> = 50..=300;
/// Accepted range for `min_length`.
pub const MIN_LENGTH_RANGE: RangeInclusive<usize> = 20..=100;
/// File name offered for the summary download.
pub const SUMMARY_FILE_NAME: &str = "summary.txt";
/// MIME type of the summary download.
pub const SUMMARY_MIME: &str = "text/plain";

/// Errors emitted by the summarization pipeline.
///
/// `NoInput`, `NoText` and `InvalidBounds` are user-facing outcomes; the remaining variants are
/// faults that end the interaction.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Summarization was requested without any document text.
    #[error("Please upload a file first.")]
    NoInput,
    /// The document parsed but contained no readable text.
    #[error("No readable text found in the document.")]
    NoText,
    /// A requested length bound fell outside the accepted range.
    #[error("{field} must be between {min} and {max} (got {value})")]
    InvalidBounds {
        /// Name of the offending parameter.
        field: &'static str,
        /// Value supplied by the caller.
        value: usize,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },
    /// The interaction already ended with a fault and accepts no further steps.
    #[error("Interaction already failed: {0}")]
    Terminated(String),
    /// Text extraction failed outright.
    #[error("Failed to extract text: {0}")]
    Extraction(#[from] ExtractionError),
    /// The summarization model failed.
    #[error("Failed to summarize document: {0}")]
    Summarization(#[from] SummarizationClientError),
}

impl PipelineError {
    /// Whether the error is a plain-language outcome rather than a fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoInput | Self::NoText | Self::InvalidBounds { .. }
        )
    }
}

/// Tunables shared by every interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineSettings {
    /// Character budget applied by the normalizer.
    pub input_char_limit: usize,
    /// Bounds used when a caller leaves one unset.
    pub default_bounds: SummaryBounds,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PipelineSettings {
    /// Derive pipeline settings from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            input_char_limit: config.input_char_limit,
            default_bounds: SummaryBounds {
                min_length: config.default_min_length,
                max_length: config.default_max_length,
            },
        }
    }

    /// Fill unset bounds with defaults and check both against the accepted ranges.
    ///
    /// `min_length < max_length` is left to the caller; an inverted pair is logged, not rejected.
    pub fn resolve_bounds(
        &self,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Result<SummaryBounds, PipelineError> {
        let bounds = SummaryBounds {
            min_length: min_length.unwrap_or(self.default_bounds.min_length),
            max_length: max_length.unwrap_or(self.default_bounds.max_length),
        };
        check_range("max_length", bounds.max_length, &MAX_LENGTH_RANGE)?;
        check_range("min_length", bounds.min_length, &MIN_LENGTH_RANGE)?;
        if bounds.min_length >= bounds.max_length {
            tracing::warn!(
                min_length = bounds.min_length,
                max_length = bounds.max_length,
                "min_length is not below max_length; model output may be unpredictable"
            );
        }
        Ok(bounds)
    }
}

fn check_range(
    field: &'static str,
    value: usize,
    range: &RangeInclusive<usize>,
) -> Result<(), PipelineError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(PipelineError::InvalidBounds {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// A generated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Summary text exactly as returned by the model adapter.
    pub text: String,
}

impl Summary {
    /// Downloadable artifact containing exactly the UTF-8 bytes of the summary.
    pub fn download(&self) -> SummaryDownload {
        SummaryDownload {
            file_name: SUMMARY_FILE_NAME,
            mime: SUMMARY_MIME,
            bytes: self.text.as_bytes().to_vec(),
        }
    }
}

/// File offered to the user after a successful summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDownload {
    /// Suggested file name.
    pub file_name: &'static str,
    /// MIME type of the payload.
    pub mime: &'static str,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}
