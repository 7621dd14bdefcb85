//! HTTP surface for the document summarizer.
//!
//! This module exposes a compact Axum router:
//!
//! - `GET /` – Upload page with length sliders, a summary panel, and a download link.
//! - `POST /extract` – Multipart `file` upload; returns the extracted text.
//! - `POST /summarize` – Multipart `file`, `min_length`, `max_length`; returns the summary and
//!   download metadata.
//! - `POST /summarize/download` – Same input; responds with `summary.txt` as an attachment.
//! - `GET /settings` – Slider ranges, defaults, and the input character budget.
//! - `GET /metrics` – Pipeline counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools.

mod page;

use crate::{
    extraction::{Document, ExtractionError},
    metrics::MetricsSnapshot,
    processing::{MAX_LENGTH_RANGE, MIN_LENGTH_RANGE, PipelineError, SummaryApi},
    summarization::SummaryBounds,
};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::{path::Path, sync::Arc};

struct AppState<S> {
    service: Arc<S>,
    background: Option<Arc<str>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            background: self.background.clone(),
        }
    }
}

/// Build the HTTP router exposing the upload and summary surface.
///
/// `background_image` is purely decorative; when it is absent or unreadable the page renders
/// without it.
pub fn create_router<S>(service: Arc<S>, background_image: Option<&Path>) -> Router
where
    S: SummaryApi + 'static,
{
    let background: Option<Arc<str>> = background_image
        .and_then(page::load_background)
        .map(Arc::from);
    Router::new()
        .route("/", get(index_page::<S>))
        .route("/extract", post(extract_text::<S>))
        .route("/summarize", post(summarize::<S>))
        .route("/summarize/download", post(download_summary::<S>))
        .route("/settings", get(get_settings::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(DefaultBodyLimit::disable())
        .with_state(AppState {
            service,
            background,
        })
}

/// Fields collected from a multipart upload.
#[derive(Default)]
struct UploadForm {
    document: Option<Document>,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

/// Read the `file`, `min_length`, and `max_length` parts of a multipart body.
///
/// Browsers submit an empty, unnamed file part when nothing was chosen; that counts as no upload.
async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if bytes.is_empty() && file_name.as_deref().is_none_or(str::is_empty) {
                    continue;
                }
                form.document = Some(
                    Document::from_upload(
                        content_type.as_deref(),
                        file_name.as_deref(),
                        bytes.to_vec(),
                    )
                    .map_err(PipelineError::from)?,
                );
            }
            Some("min_length") => {
                form.min_length = parse_length("min_length", &field.text().await?)?;
            }
            Some("max_length") => {
                form.max_length = parse_length("max_length", &field.text().await?)?;
            }
            _ => {}
        }
    }
    Ok(form)
}

fn parse_length(field: &str, value: &str) -> Result<Option<usize>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("{field} must be a whole number")))
}

/// Resolve the summary bounds for an upload. A missing document is reported before any
/// out-of-range bound.
fn upload_bounds<S>(service: &S, form: &UploadForm) -> Result<SummaryBounds, AppError>
where
    S: SummaryApi,
{
    if form.document.is_none() {
        return Err(PipelineError::NoInput.into());
    }
    Ok(service
        .settings()
        .resolve_bounds(form.min_length, form.max_length)?)
}

/// Render the upload page.
async fn index_page<S>(State(state): State<AppState<S>>) -> Html<String>
where
    S: SummaryApi,
{
    Html(page::render(
        &state.service.settings(),
        state.background.as_deref(),
    ))
}

/// Success response for `POST /extract`.
#[derive(Serialize)]
struct ExtractResponse {
    kind: &'static str,
    text: String,
}

/// Extract text from an upload without summarizing it.
async fn extract_text<S>(
    State(state): State<AppState<S>>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError>
where
    S: SummaryApi,
{
    let form = read_upload(multipart).await?;
    let extracted = state.service.extract_document(form.document).await?;
    Ok(Json(ExtractResponse {
        kind: extracted.kind.mime(),
        text: extracted.text,
    }))
}

/// Download metadata returned alongside a summary.
#[derive(Serialize)]
struct DownloadDescriptor {
    file_name: &'static str,
    mime: &'static str,
}

/// Success response for `POST /summarize`.
#[derive(Serialize)]
struct SummarizeResponse {
    summary: String,
    min_length: usize,
    max_length: usize,
    download: DownloadDescriptor,
}

/// Summarize an uploaded document.
async fn summarize<S>(
    State(state): State<AppState<S>>,
    multipart: Multipart,
) -> Result<Json<SummarizeResponse>, AppError>
where
    S: SummaryApi,
{
    let form = read_upload(multipart).await?;
    let bounds = upload_bounds(state.service.as_ref(), &form)?;
    let summary = state
        .service
        .summarize_document(form.document, bounds)
        .await?;
    let download = summary.download();
    tracing::info!(
        chars = summary.text.chars().count(),
        min_length = bounds.min_length,
        max_length = bounds.max_length,
        "Summarize request completed"
    );
    Ok(Json(SummarizeResponse {
        summary: summary.text,
        min_length: bounds.min_length,
        max_length: bounds.max_length,
        download: DownloadDescriptor {
            file_name: download.file_name,
            mime: download.mime,
        },
    }))
}

/// Summarize an uploaded document and return the summary as `summary.txt`.
async fn download_summary<S>(
    State(state): State<AppState<S>>,
    multipart: Multipart,
) -> Result<Response, AppError>
where
    S: SummaryApi,
{
    let form = read_upload(multipart).await?;
    let bounds = upload_bounds(state.service.as_ref(), &form)?;
    let download = state
        .service
        .summarize_document(form.document, bounds)
        .await?
        .download();
    let headers = [
        (header::CONTENT_TYPE, download.mime.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.file_name),
        ),
    ];
    Ok((headers, download.bytes).into_response())
}

/// Range and default for one length parameter.
#[derive(Serialize)]
struct LengthSetting {
    min: usize,
    max: usize,
    default: usize,
}

/// Response body for `GET /settings`.
#[derive(Serialize)]
struct SettingsResponse {
    max_length: LengthSetting,
    min_length: LengthSetting,
    input_char_limit: usize,
}

/// Report slider ranges and defaults.
async fn get_settings<S>(State(state): State<AppState<S>>) -> Json<SettingsResponse>
where
    S: SummaryApi,
{
    let settings = state.service.settings();
    Json(SettingsResponse {
        max_length: LengthSetting {
            min: *MAX_LENGTH_RANGE.start(),
            max: *MAX_LENGTH_RANGE.end(),
            default: settings.default_bounds.max_length,
        },
        min_length: LengthSetting {
            min: *MIN_LENGTH_RANGE.start(),
            max: *MIN_LENGTH_RANGE.end(),
            default: settings.default_bounds.min_length,
        },
        input_char_limit: settings.input_char_limit,
    })
}

/// Return the pipeline counters.
async fn get_metrics<S>(State(state): State<AppState<S>>) -> Json<MetricsSnapshot>
where
    S: SummaryApi,
{
    Json(state.service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "extract",
                method: "POST",
                path: "/extract",
                description: "Extract text from a multipart `file` upload (text/plain or application/pdf). Response returns { \"kind\": string, \"text\": string }.",
                request_example: None,
            },
            CommandDescriptor {
                name: "summarize",
                method: "POST",
                path: "/summarize",
                description: "Summarize a multipart `file` upload. Optional `min_length` (20-100) and `max_length` (50-300) fields bound the summary in model tokens.",
                request_example: Some(json!({
                    "file": "report.pdf",
                    "min_length": 40,
                    "max_length": 150
                })),
            },
            CommandDescriptor {
                name: "download_summary",
                method: "POST",
                path: "/summarize/download",
                description: "Same input as summarize; responds with the summary as a text/plain `summary.txt` attachment.",
                request_example: None,
            },
            CommandDescriptor {
                name: "settings",
                method: "GET",
                path: "/settings",
                description: "Return length ranges, defaults, and the input character budget.",
                request_example: None,
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return pipeline counters useful for observability dashboards.",
                request_example: None,
            },
        ],
    })
}

enum AppError {
    Pipeline(PipelineError),
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Pipeline(error) => match error {
                PipelineError::NoInput | PipelineError::InvalidBounds { .. } => {
                    StatusCode::BAD_REQUEST
                }
                PipelineError::NoText => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::Terminated(_) => StatusCode::CONFLICT,
                PipelineError::Extraction(ExtractionError::UnsupportedKind(_)) => {
                    StatusCode::UNSUPPORTED_MEDIA_TYPE
                }
                PipelineError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
                PipelineError::Summarization(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn level(&self) -> &'static str {
        match self {
            Self::Pipeline(PipelineError::NoInput) => "warning",
            _ => "error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let level = self.level();
        let message = match &self {
            Self::Pipeline(error) => error.to_string(),
            Self::BadRequest(message) => message.clone(),
        };
        if status.is_server_error() {
            tracing::error!(%status, message = %message, "Request failed");
        }
        (status, Json(json!({ "level": level, "message": message }))).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(inner: PipelineError) -> Self {
        Self::Pipeline(inner)
    }
}

impl From<MultipartError> for AppError {
    fn from(inner: MultipartError) -> Self {
        Self::BadRequest(inner.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::{create_router, get_commands};
    use crate::extraction::{Document, DocumentKind};
    use crate::metrics::MetricsSnapshot;
    use crate::processing::{ExtractedDocument, PipelineError, PipelineSettings, Summary, SummaryApi};
    use crate::summarization::SummaryBounds;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "docsum-test-boundary";

    #[derive(Clone, Debug)]
    struct SummarizeCall {
        document: Option<(DocumentKind, Vec<u8>)>,
        bounds: SummaryBounds,
    }

    struct StubSummaryService {
        calls: Mutex<Vec<SummarizeCall>>,
    }

    impl StubSummaryService {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }

        async fn recorded_calls(&self) -> Vec<SummarizeCall> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl SummaryApi for StubSummaryService {
        async fn extract_document(
            &self,
            document: Option<Document>,
        ) -> Result<ExtractedDocument, PipelineError> {
            let document = document.ok_or(PipelineError::NoInput)?;
            match document.kind() {
                DocumentKind::Pdf => Err(PipelineError::NoText),
                DocumentKind::PlainText => Ok(ExtractedDocument {
                    kind: document.kind(),
                    text: String::from_utf8_lossy(document.bytes()).into_owned(),
                }),
            }
        }

        async fn summarize_document(
            &self,
            document: Option<Document>,
            bounds: SummaryBounds,
        ) -> Result<Summary, PipelineError> {
            self.calls.lock().await.push(SummarizeCall {
                document: document
                    .as_ref()
                    .map(|doc| (doc.kind(), doc.bytes().to_vec())),
                bounds,
            });
            if document.is_none() {
                return Err(PipelineError::NoInput);
            }
            Ok(Summary {
                text: "A short summary.".into(),
            })
        }

        fn settings(&self) -> PipelineSettings {
            PipelineSettings::default()
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot::default()
        }
    }

    enum Part<'a> {
        File {
            file_name: &'a str,
            content_type: &'a str,
            body: &'a [u8],
        },
        Text(&'a str, &'a str),
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File {
                    file_name,
                    content_type,
                    body: bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json body")
    }

    #[tokio::test]
    async fn commands_catalog_exposes_summarize_endpoint() {
        let response = get_commands().await;
        let commands = response.0.commands;
        let summarize = commands
            .iter()
            .find(|cmd| cmd.name == "summarize")
            .expect("summarize command present");

        assert_eq!(summarize.method, "POST");
        assert_eq!(summarize.path, "/summarize");
        assert!(commands.len() >= 3);
    }

    #[tokio::test]
    async fn summarize_route_forwards_upload_and_bounds() {
        let service = StubSummaryService::new();
        let app = create_router(service.clone(), None);

        let response = app
            .oneshot(multipart_request(
                "/summarize",
                &[
                    Part::File {
                        file_name: "notes.txt",
                        content_type: "text/plain",
                        body: b"Hello world. Hello world.",
                    },
                    Part::Text("min_length", "60"),
                    Part::Text("max_length", "200"),
                ],
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["summary"], "A short summary.");
        assert_eq!(json["download"]["file_name"], "summary.txt");
        assert_eq!(json["download"]["mime"], "text/plain");

        let calls = service.recorded_calls().await;
        assert_eq!(calls.len(), 1);
        let (kind, bytes) = calls[0].document.clone().expect("document");
        assert_eq!(kind, DocumentKind::PlainText);
        assert_eq!(bytes, b"Hello world. Hello world.");
        assert_eq!(
            calls[0].bounds,
            SummaryBounds {
                min_length: 60,
                max_length: 200
            }
        );
    }

    #[tokio::test]
    async fn summarize_without_file_is_a_warning() {
        let service = StubSummaryService::new();
        let app = create_router(service.clone(), None);

        let response = app
            .oneshot(multipart_request(
                "/summarize",
                &[
                    Part::File {
                        file_name: "",
                        content_type: "application/octet-stream",
                        body: b"",
                    },
                    Part::Text("max_length", "150"),
                ],
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["level"], "warning");
        assert_eq!(json["message"], "Please upload a file first.");
        assert!(json.get("summary").is_none());
    }

    #[tokio::test]
    async fn missing_file_is_reported_before_out_of_range_bounds() {
        let service = StubSummaryService::new();
        let app = create_router(service.clone(), None);

        for uri in ["/summarize", "/summarize/download"] {
            let response = app
                .clone()
                .oneshot(multipart_request(uri, &[Part::Text("max_length", "1000")]))
                .await
                .expect("router response");

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = json_body(response).await;
            assert_eq!(json["level"], "warning");
            assert_eq!(json["message"], "Please upload a file first.");
        }
        assert!(service.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_bounds_are_rejected_before_summarizing() {
        let service = StubSummaryService::new();
        let app = create_router(service.clone(), None);

        let response = app
            .oneshot(multipart_request(
                "/summarize",
                &[
                    Part::File {
                        file_name: "notes.txt",
                        content_type: "text/plain",
                        body: b"body",
                    },
                    Part::Text("max_length", "1000"),
                ],
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(service.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn unsupported_upload_kind_is_rejected() {
        let app = create_router(StubSummaryService::new(), None);

        let response = app
            .oneshot(multipart_request(
                "/summarize",
                &[Part::File {
                    file_name: "photo.png",
                    content_type: "image/png",
                    body: b"\x89PNG",
                }],
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn extract_reports_missing_text() {
        let app = create_router(StubSummaryService::new(), None);

        let response = app
            .oneshot(multipart_request(
                "/extract",
                &[Part::File {
                    file_name: "scan.pdf",
                    content_type: "application/pdf",
                    body: b"%PDF-1.5",
                }],
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(response).await;
        assert_eq!(json["message"], "No readable text found in the document.");
    }

    #[tokio::test]
    async fn download_route_returns_summary_attachment() {
        let app = create_router(StubSummaryService::new(), None);

        let response = app
            .oneshot(multipart_request(
                "/summarize/download",
                &[Part::File {
                    file_name: "notes.txt",
                    content_type: "text/plain",
                    body: b"Some text",
                }],
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"summary.txt\""
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        assert_eq!(&body[..], b"A short summary.");
    }

    #[tokio::test]
    async fn settings_route_reports_ranges() {
        let app = create_router(StubSummaryService::new(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/settings")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        let json = json_body(response).await;
        assert_eq!(json["max_length"]["min"], 50);
        assert_eq!(json["max_length"]["max"], 300);
        assert_eq!(json["max_length"]["default"], 150);
        assert_eq!(json["min_length"]["default"], 40);
        assert_eq!(json["input_char_limit"], 3000);
    }

    #[tokio::test]
    async fn index_page_renders_form() {
        let app = create_router(StubSummaryService::new(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let html = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(html.contains("Generate Summary"));
    }
}
