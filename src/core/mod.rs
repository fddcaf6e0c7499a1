//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Scan result model (Finding, ScanError, Report)
//! - Rendering functions for different output formats
//! - Path normalization utilities

pub mod model;
pub mod paths;
pub mod render;
