//! Scan result model
//!
//! Everything the scanner produces maps to this model before rendering:
//! findings for files that mix both link constructs, and recovered errors
//! for subtrees or files that had to be skipped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A file that contains both link constructs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Finding {
    /// Path as joined from the scanned root, using '/' as separator
    pub path: String,
}

impl Finding {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// The kind of operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Listing a directory (or resolving a root) failed
    Walk,
    /// Reading a candidate file failed
    Read,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Walk => "walk",
            ErrorKind::Read => "read",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recovered error
///
/// The subtree or file it refers to was skipped; the scan itself continued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("cannot {kind} {path}: {message}")]
pub struct ScanError {
    /// Serialized as "op" so it cannot collide with the "kind" record tag
    /// used by the structured renderers.
    #[serde(rename = "op")]
    pub kind: ErrorKind,
    pub path: String,
    pub message: String,
}

impl ScanError {
    /// Create a directory-walk error
    pub fn walk(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Walk,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file-read error
    pub fn read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Read,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Collected scan output: findings plus the errors recovered along the way
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub findings: Vec<Finding>,
    pub errors: Vec<ScanError>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort findings by path for stable output
    ///
    /// Traversal order is unspecified, so structured output is sorted
    /// before rendering.
    pub fn sort(&mut self) {
        self.findings.sort();
        self.errors.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Number of findings (errors are counted separately)
    #[allow(dead_code)]
    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }

    /// True when the report carries neither findings nor errors
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && self.errors.is_empty()
    }
}

/// Counters accumulated over a scan, used for diagnostics and exit policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files visited (any extension)
    pub files_seen: u64,
    /// Files whose extension made them eligible for inspection
    pub candidates: u64,
    /// Files reported as findings
    pub findings: u64,
    /// Errors recovered during the scan
    pub errors: u64,
}

impl ScanSummary {
    /// Fold another summary (e.g. from a sibling root) into this one
    pub fn merge(&mut self, other: ScanSummary) {
        self.files_seen += other.files_seen;
        self.candidates += other.candidates;
        self.findings += other.findings;
        self.errors += other.errors;
    }
}
