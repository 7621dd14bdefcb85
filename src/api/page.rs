//! Single-page upload form served at `GET /`.

use crate::processing::{MAX_LENGTH_RANGE, MIN_LENGTH_RANGE, PipelineSettings};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use std::path::Path;

/// Read the decorative background image and encode it as a CSS data URL.
///
/// A missing or unreadable file returns `None` and the page renders without it.
pub(crate) fn load_background(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let mime = match path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase)
                .as_deref()
            {
                Some("png") => "image/png",
                Some("gif") => "image/gif",
                Some("webp") => "image/webp",
                _ => "image/jpeg",
            };
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "Loaded background image");
            Some(format!("data:{mime};base64,{}", BASE64.encode(bytes)))
        }
        Err(error) => {
            tracing::debug!(path = %path.display(), error = %error, "Background image unavailable");
            None
        }
    }
}

fn background_style(data_url: Option<&str>) -> String {
    let Some(data_url) = data_url else {
        return String::new();
    };
    format!(
        r#"body {{
  background-image: url("{data_url}");
  background-size: cover;
  background-position: center;
  background-attachment: fixed;
}}
body::before {{
  content: "";
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.5);
  z-index: -1;
}}
"#
    )
}

/// Render the upload page with slider ranges and defaults taken from the settings.
pub(crate) fn render(settings: &PipelineSettings, background: Option<&str>) -> String {
    let defaults = settings.default_bounds;
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Text Summarizer</title>
<style>
body {{ font-family: system-ui, sans-serif; margin: 0; color: #eee; background: #222; }}
main {{ max-width: 960px; margin: 2rem auto; padding: 1rem 2rem; background: rgba(20, 20, 20, 0.8); border-radius: 8px; }}
textarea {{ width: 100%; height: 250px; }}
.warning {{ color: #f5c542; }}
.error {{ color: #ff6b6b; }}
.summary {{ color: #7be07b; white-space: pre-wrap; }}
{background_css}</style>
</head>
<body>
<main>
<h1>Text Document Summarizer</h1>
<p>Upload a text or PDF document to generate a summary.</p>
<form id="upload">
  <p><input type="file" name="file" accept=".txt,.pdf,text/plain,application/pdf"></p>
  <p><label>Max Summary Length <output id="max-value">{max_default}</output>
    <input type="range" name="max_length" min="{max_lo}" max="{max_hi}" value="{max_default}"
      oninput="document.getElementById('max-value').value = this.value"></label></p>
  <p><label>Min Summary Length <output id="min-value">{min_default}</output>
    <input type="range" name="min_length" min="{min_lo}" max="{min_hi}" value="{min_default}"
      oninput="document.getElementById('min-value').value = this.value"></label></p>
  <p><button type="submit">Generate Summary</button></p>
</form>
<section id="extracted" hidden>
  <h2>Extracted Text</h2>
  <textarea id="extracted-text" readonly></textarea>
</section>
<p id="status"></p>
<section id="result" hidden>
  <h2>Summary</h2>
  <p class="summary" id="summary"></p>
  <a id="download" download="summary.txt">Download Summary</a>
</section>
</main>
<script>
const form = document.getElementById('upload');
const fileInput = form.elements['file'];
fileInput.addEventListener('change', async () => {{
  const status = document.getElementById('status');
  const extracted = document.getElementById('extracted');
  document.getElementById('result').hidden = true;
  extracted.hidden = true;
  status.className = '';
  status.textContent = '';
  if (!fileInput.files.length) {{
    return;
  }}
  const upload = new FormData();
  upload.append('file', fileInput.files[0]);
  const response = await fetch('/extract', {{ method: 'POST', body: upload }});
  const body = await response.json();
  if (!response.ok) {{
    status.className = body.level || 'error';
    status.textContent = body.message;
    return;
  }}
  document.getElementById('extracted-text').value = body.text;
  extracted.hidden = false;
}});
form.addEventListener('submit', async (event) => {{
  event.preventDefault();
  const status = document.getElementById('status');
  const result = document.getElementById('result');
  result.hidden = true;
  status.className = '';
  status.textContent = 'Generating summary...';
  const response = await fetch('/summarize', {{ method: 'POST', body: new FormData(form) }});
  const body = await response.json();
  if (!response.ok) {{
    status.className = body.level || 'error';
    status.textContent = body.message;
    return;
  }}
  status.textContent = '';
  document.getElementById('summary').textContent = body.summary;
  const link = document.getElementById('download');
  link.href = URL.createObjectURL(new Blob([body.summary], {{ type: body.download.mime }}));
  link.download = body.download.file_name;
  result.hidden = false;
}});
</script>
</body>
</html>
"#,
        background_css = background_style(background),
        max_lo = MAX_LENGTH_RANGE.start(),
        max_hi = MAX_LENGTH_RANGE.end(),
        max_default = defaults.max_length,
        min_lo = MIN_LENGTH_RANGE.start(),
        min_hi = MIN_LENGTH_RANGE.end(),
        min_default = defaults.min_length,
    )
}
