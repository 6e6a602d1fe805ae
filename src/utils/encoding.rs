//! Lossy UTF-8 reading for content previews.
//!
//! Previews are model context only, so invalid byte sequences are tolerated:
//! a UTF-8 BOM is stripped and malformed sequences become U+FFFD instead of
//! failing the read.

use anyhow::{Context, Result};
use encoding_rs::UTF_8;
use std::path::Path;

/// Read a whole file as UTF-8, replacing invalid sequences.
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let (decoded, _encoding_used, had_errors) = UTF_8.decode(&bytes);
    if had_errors {
        tracing::debug!("Replaced invalid UTF-8 in {}", path.display());
    }
    Ok(decoded.into_owned())
}

/// First `max_chars` characters of `content`, cut on a char boundary.
pub fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Read a preview of at most `max_chars` characters plus the file's line count.
pub fn read_preview(path: &Path, max_chars: usize) -> Result<(String, usize)> {
    let content = read_text_lossy(path)?;
    let line_count = content.lines().count();
    Ok((truncate_chars(&content, max_chars).to_string(), line_count))
}
