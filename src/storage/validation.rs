//! Storage name derivation
//!
//! Helpers deciding how notes are named on disk and recognized at
//! retrieval time.

use std::path::Path;

/// Derive a file name prefix from note text: the alphanumeric characters
/// of the first ten, or "text" when nothing survives.
pub fn note_prefix(text: &str) -> String {
    let prefix: String = text
        .chars()
        .take(10)
        .filter(|c| c.is_alphanumeric())
        .collect();
    if prefix.is_empty() {
        "text".to_string()
    } else {
        prefix
    }
}

/// Whether a stored path is a text note we created.
pub fn is_text_note(path: &Path) -> bool {
    path.extension().map(|ext| ext == "txt").unwrap_or(false)
}
