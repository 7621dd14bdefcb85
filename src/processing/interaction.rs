//! Per-interaction state machine: upload, extraction outcome, and summary.

use super::types::{PipelineError, Summary};
use crate::extraction::ExtractedText;

/// Where a single upload-and-summarize interaction currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionState {
    /// No document received yet.
    AwaitingUpload,
    /// Text extracted and waiting for a summary request.
    Ready {
        /// Extracted document text.
        text: String,
    },
    /// The document yielded no readable text. Terminal.
    NoText,
    /// A summary was produced; asking again re-summarizes the same text.
    Done {
        /// Extracted document text.
        text: String,
        /// Most recent summary.
        summary: Summary,
    },
    /// Extraction or summarization faulted. Terminal.
    Faulted {
        /// Display form of the fault.
        reason: String,
    },
}

/// State holder for one interaction. Nothing here survives across interactions.
#[derive(Debug, Clone)]
pub struct Interaction {
    state: InteractionState,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction {
    /// Start an interaction with no document.
    pub fn new() -> Self {
        Self {
            state: InteractionState::AwaitingUpload,
        }
    }

    /// Current state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Extracted text, when the interaction holds any.
    pub fn text(&self) -> Option<&str> {
        match &self.state {
            InteractionState::Ready { text } | InteractionState::Done { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Latest summary, once generated.
    pub fn summary(&self) -> Option<&Summary> {
        match &self.state {
            InteractionState::Done { summary, .. } => Some(summary),
            _ => None,
        }
    }

    /// Guard for receiving a new upload; terminal states refuse it.
    pub(crate) fn ensure_accepting(&self) -> Result<(), PipelineError> {
        match &self.state {
            InteractionState::NoText => {
                Err(PipelineError::Terminated(PipelineError::NoText.to_string()))
            }
            InteractionState::Faulted { reason } => Err(PipelineError::Terminated(reason.clone())),
            _ => Ok(()),
        }
    }

    /// Record the extraction outcome; the empty sentinel ends the interaction.
    pub(crate) fn accept(&mut self, extracted: ExtractedText) -> Result<(), PipelineError> {
        match extracted {
            ExtractedText::Text(text) => {
                self.state = InteractionState::Ready { text };
                Ok(())
            }
            ExtractedText::Empty => {
                self.state = InteractionState::NoText;
                Err(PipelineError::NoText)
            }
        }
    }

    /// Text to hand to the normalizer, or the reason summarization cannot start.
    pub(crate) fn text_to_summarize(&self) -> Result<&str, PipelineError> {
        match &self.state {
            InteractionState::AwaitingUpload => Err(PipelineError::NoInput),
            InteractionState::Ready { text } | InteractionState::Done { text, .. } => {
                if text.trim().is_empty() {
                    Err(PipelineError::NoInput)
                } else {
                    Ok(text)
                }
            }
            InteractionState::NoText => Err(PipelineError::NoText),
            InteractionState::Faulted { reason } => Err(PipelineError::Terminated(reason.clone())),
        }
    }

    /// Store a finished summary alongside the extracted text.
    pub(crate) fn complete(&mut self, summary: Summary) {
        let state = std::mem::replace(&mut self.state, InteractionState::AwaitingUpload);
        self.state = match state {
            InteractionState::Ready { text } | InteractionState::Done { text, .. } => {
                InteractionState::Done { text, summary }
            }
            other => other,
        };
    }

    /// Move to the fault state after an unrecoverable error.
    pub(crate) fn fail(&mut self, error: &PipelineError) {
        self.state = InteractionState::Faulted {
            reason: error.to_string(),
        };
    }
}
