//! Timing series types and the persisted snapshot schema.
//!
//! Snapshot is versioned to allow future evolution.

use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// One aggregate runtime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    pub processor_count: u32,

    /// Mean runtime in seconds
    pub seconds: f64,
}

/// Aggregate runtimes ordered by ascending processor count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSeries {
    pub points: Vec<TimingPoint>,
}

impl TimingSeries {
    pub fn new(points: Vec<TimingPoint>) -> Self {
        Self { points }
    }

    /// Pair counts with timings; extra entries on either side are dropped
    pub fn from_parts(processor_counts: &[u32], timings: &[f64]) -> Self {
        Self {
            points: processor_counts
                .iter()
                .zip(timings)
                .map(|(&processor_count, &seconds)| TimingPoint {
                    processor_count,
                    seconds,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn processor_counts(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.processor_count).collect()
    }

    pub fn timings(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.seconds).collect()
    }
}

/// Top-level snapshot structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSnapshot {
    /// Schema version for compatibility checking
    pub version: String,

    /// Legend label (e.g. "Round Robin")
    pub label: String,

    /// Processor counts, ascending
    pub processor_counts: Vec<u32>,

    /// Mean runtimes in seconds, parallel to `processor_counts`
    pub timings: Vec<f64>,

    /// Trials attempted per run directory
    pub trial_count: usize,

    /// Timestamp when snapshot was generated
    pub generated_at: String,
}

impl TimingSnapshot {
    pub fn new(label: impl Into<String>, series: &TimingSeries, trial_count: usize) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            label: label.into(),
            processor_counts: series.processor_counts(),
            timings: series.timings(),
            trial_count,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn series(&self) -> TimingSeries {
        TimingSeries::from_parts(&self.processor_counts, &self.timings)
    }
}
