//! Trial file parsing and snapshot schema definitions.
//!
//! This module handles:
//! - Scanning simulator logs for the timing marker line
//! - Classifying trial files (parsed, missing, unusable)
//! - Defining the timing series and its persisted schema

pub mod schema;
pub mod timing;

// Re-export main types
pub use schema::{TimingPoint, TimingSeries, TimingSnapshot};
pub use timing::{is_marker_line, parse_timing_value, read_trial_file, scan_timing, TrialOutcome};
