//! Scaling Report
//!
//! Aggregation, comparison and charting of parallel scaling benchmarks.
//!
//! The simulator writes one run directory per processor count, each holding
//! trial files with a `timing <seconds>` line. This crate turns those
//! directories into a timing series, persists it as a JSON snapshot, and
//! derives speedup tables and charts from saved snapshots.
//!
//! ## Getting Started
//!
//! ```bash
//! scaling-report aggregate --root out/ss --label "Layer Based" --output strongScaleData.json
//! scaling-report compare ns_round_robin.json ns_layer_based.json --serial 2808
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
