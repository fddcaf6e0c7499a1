//! Scanner module - Traversal and detection
//!
//! Provides:
//! - detect: fixed detection policy (markers, candidate extensions)
//! - walk: depth-first traversal with per-directory failure isolation

pub mod detect;
pub mod walk;

pub use walk::{scan_roots, ScanConfig, ScanSink};
