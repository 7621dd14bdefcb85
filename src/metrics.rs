use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing summarization activity.
#[derive(Default)]
pub struct PipelineMetrics {
    documents_received: AtomicU64,
    summaries_generated: AtomicU64,
    no_text_rejections: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an uploaded document that reached extraction.
    pub fn record_document(&self) {
        self.documents_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a summary returned to the user.
    pub fn record_summary(&self) {
        self.summaries_generated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a document that yielded no readable text.
    pub fn record_no_text(&self) {
        self.no_text_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_received: self.documents_received.load(Ordering::Relaxed),
            summaries_generated: self.summaries_generated.load(Ordering::Relaxed),
            no_text_rejections: self.no_text_rejections.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Documents received since startup.
    pub documents_received: u64,
    /// Summaries generated since startup.
    pub summaries_generated: u64,
    /// Documents rejected because no text could be extracted.
    pub no_text_rejections: u64,
}
