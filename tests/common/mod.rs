#![allow(dead_code)]

use async_trait::async_trait;
use docsum::summarization::{SummarizationClient, SummarizationClientError, SummaryRequest};
use std::sync::Mutex;

mod pdf;

pub use pdf::build_pdf;

pub const BOUNDARY: &str = "docsum-integration-boundary";

/// Summarizer that echoes the input size and records every request it sees.
#[derive(Default)]
pub struct FakeSummarizer {
    calls: Mutex<Vec<SummaryRequest>>,
}

impl FakeSummarizer {
    pub fn calls(&self) -> Vec<SummaryRequest> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl SummarizationClient for FakeSummarizer {
    async fn summarize(&self, request: SummaryRequest) -> Result<String, SummarizationClientError> {
        let chars = request.text.chars().count();
        self.calls.lock().expect("calls lock").push(request);
        Ok(format!("The document repeats a greeting ({chars} characters)."))
    }
}

/// Encode a single-file multipart body with optional text fields.
pub fn multipart_body(
    file: Option<(&str, &str, &[u8])>,
    fields: &[(&str, &str)],
) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
