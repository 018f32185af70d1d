//! Extraction of Drive IDs from URLs pasted on the command line.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DriveError, Result};

/// URL shapes a Drive item can be shared as, each capturing the id.
static URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https?://drive\.google\.com/drive/(?:u/\d+/)?folders/([a-zA-Z0-9_-]+)",
        r"^https?://drive\.google\.com/file/d/([a-zA-Z0-9_-]+)",
        r"^https?://drive\.google\.com/open\?id=([a-zA-Z0-9_-]+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid Drive URL regex"))
    .collect()
});

/// Valid Drive ID pattern (alphanumeric, underscore, hyphen).
static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Invalid ID regex"));

/// Extract a Drive ID from a URL, or validate a raw ID.
///
/// Supports folder URLs (`/drive/folders/<ID>`, with or without a `/u/N/`
/// segment), file URLs (`/file/d/<ID>/...`), `open?id=<ID>` URLs, and raw
/// ID strings.
///
/// # Examples
///
/// ```
/// use copy_drive::url_parser::extract_id;
///
/// let id = extract_id("https://drive.google.com/drive/folders/1abc123").unwrap();
/// assert_eq!(id, "1abc123");
///
/// let id = extract_id("1abc123").unwrap();
/// assert_eq!(id, "1abc123");
/// ```
pub fn extract_id(url_or_id: &str) -> Result<String> {
    let trimmed = url_or_id.trim();

    for pattern in URL_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(trimmed) {
            if let Some(id) = captures.get(1) {
                return Ok(id.as_str().to_string());
            }
        }
    }

    if !trimmed.is_empty() && ID_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(DriveError::InvalidUrlOrId(url_or_id.to_string()))
}
