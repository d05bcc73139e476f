//! The default deterministic summarizer.

use praxis_types::{MemoryEntry, MemoryError, Summarizer};

/// Maximum characters of each entry quoted into the summary.
const SNIPPET_CHARS: usize = 100;

/// Deterministic, non-generative summarizer.
///
/// Renders each folded entry as `role: <snippet>...`, preceded by the
/// previous summary when one exists. Used wherever a model-backed
/// summarizer is unavailable or undesirable.
#[derive(Debug, Default, Clone, Copy)]
pub struct TruncatingSummarizer;

impl Summarizer for TruncatingSummarizer {
    fn summarize(
        &self,
        older: &[MemoryEntry],
        previous_summary: &str,
    ) -> Result<String, MemoryError> {
        let mut lines = Vec::with_capacity(older.len() + 1);
        if !previous_summary.is_empty() {
            lines.push(format!("Previously: {previous_summary}"));
        }
        for entry in older {
            lines.push(format!("{}: {}...", entry.role, snippet(&entry.content)));
        }
        Ok(lines.join("\n"))
    }
}

/// First `SNIPPET_CHARS` bytes of `text`, cut back to a char boundary so a
/// multi-byte character is never sliced.
fn snippet(text: &str) -> &str {
    if text.len() <= SNIPPET_CHARS {
        return text;
    }
    let mut boundary = SNIPPET_CHARS;
    while boundary > 0 && !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    &text[..boundary]
}
