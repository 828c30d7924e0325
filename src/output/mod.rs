//! Output writers for timing snapshots and charts.
//!
//! This module handles writing data to disk in various formats:
//! - JSON timing snapshots
//! - SVG charts

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{read_snapshot, validate_path, write_snapshot};
pub use svg::write_svg;
