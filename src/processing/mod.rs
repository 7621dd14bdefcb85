//! Summarization pipeline: per-interaction state, normalization, and orchestration.

pub mod interaction;
pub mod normalize;
mod service;
pub mod types;

pub use interaction::{Interaction, InteractionState};
pub use normalize::normalize;
pub use service::{ExtractedDocument, SummaryApi, SummaryService};
pub use types::{
    MAX_LENGTH_RANGE, MIN_LENGTH_RANGE, PipelineError, PipelineSettings, Summary, SummaryDownload,
};
