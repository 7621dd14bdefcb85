//! Pre-summarization text normalization.

/// Collapse line breaks into spaces and keep at most `cap` characters.
///
/// Truncation counts Unicode scalar values and may cut mid-word; the cap is a coarse guard for
/// the model's input window, not a token count.
pub fn normalize(text: &str, cap: usize) -> String {
    text.chars()
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .take(cap)
        .collect()
}
