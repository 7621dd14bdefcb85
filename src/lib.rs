#![deny(missing_docs)]

//! Core library for the document summarizer: upload, extract, normalize, summarize.

/// HTTP routing, upload page, and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Document kinds and text extraction (plain text and PDF).
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Pipeline metrics helpers.
pub mod metrics;
/// Summarization pipeline: interaction state, normalization, orchestration.
pub mod processing;
/// Abstractive summarization clients.
pub mod summarization;
