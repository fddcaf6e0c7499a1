//! Detection policy
//!
//! The policy is fixed: a file is flagged when its content contains both
//! the `<Link` and `<a` markers, anywhere, in any order. Exact substring
//! containment only; no regex, no tokenization, no normalization.

use std::fs;
use std::path::Path;

use crate::core::model::ScanError;
use crate::core::paths::normalize_path;

/// Marker for a router link component
pub const LINK_MARKER: &str = "<Link";

/// Marker for a raw HTML anchor
pub const ANCHOR_MARKER: &str = "<a";

/// Extensions eligible for content inspection
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "tsx"];

/// Check whether a path is a candidate file
///
/// Non-candidates are never opened, regardless of content.
pub fn is_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Test whether content contains both markers
pub fn has_mixed_links(content: &str) -> bool {
    content.contains(LINK_MARKER) && content.contains(ANCHOR_MARKER)
}

/// Inspect a candidate file
///
/// Reads the whole file as text and applies the marker test. A file that
/// cannot be read (permissions, removed between listing and reading,
/// invalid UTF-8) yields a read error for the caller to log and skip.
pub fn inspect(path: &Path) -> Result<bool, ScanError> {
    let content = fs::read_to_string(path)
        .map_err(|err| ScanError::read(normalize_path(path), err.to_string()))?;
    Ok(has_mixed_links(&content))
}
