//! Aggregation of trial files into timing series and scaling metrics.
//!
//! This module transforms simulator output directories into:
//! - Run directory to processor count assignments
//! - Per-run averaged timings
//! - Timing series ready for persisting and plotting
//! - Speedup and efficiency figures

pub mod collector;
pub mod discovery;
pub mod metrics;
pub mod runs;

// Re-export main types and functions
pub use collector::{aggregate_series, AggregationReport, AggregationWarning};
pub use discovery::{assign_runs, list_run_dirs, parse_trailing_count, RunAssignment, RunDir};
pub use metrics::{calculate_scaling, prepend_serial, Baseline, ScalingPoint};
pub use runs::{aggregate_run, mean, resolve_trial_dir, RunSummary};
