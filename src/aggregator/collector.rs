//! Benchmark aggregation over a whole output root.
//!
//! Discovers run directories, matches them to processor counts, averages the
//! trials of each run and returns the resulting timing series together with
//! the per-run summaries and any non-fatal warnings.

use super::discovery::{assign_runs, list_run_dirs};
use super::runs::{aggregate_run, RunSummary};
use crate::parser::schema::{TimingPoint, TimingSeries};
use crate::utils::config::AggregationConfig;
use crate::utils::error::AggregateError;
use log::{info, warn};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions raised during aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationWarning {
    /// Run directories found on disk differ from the expected count
    DirectoryCountMismatch { found: usize, expected: usize },

    /// Aggregates produced differ from the expected count
    SeriesLengthMismatch { produced: usize, expected: usize },

    /// A run directory had no property subdirectory
    TrialDirFallback { dir: PathBuf },
}

impl fmt::Display for AggregationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationWarning::DirectoryCountMismatch { found, expected } => write!(
                f,
                "found {} run directories, expected {}",
                found, expected
            ),
            AggregationWarning::SeriesLengthMismatch { produced, expected } => write!(
                f,
                "number of outputs found ({}) is not equal to number of runs expected ({})",
                produced, expected
            ),
            AggregationWarning::TrialDirFallback { dir } => write!(
                f,
                "no property directory in {}, trials read from the run directory",
                dir.display()
            ),
        }
    }
}

/// Everything one aggregation pass produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationReport {
    pub series: TimingSeries,
    pub runs: Vec<RunSummary>,
    pub warnings: Vec<AggregationWarning>,
    pub discovered_dirs: usize,
}

impl AggregationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn total_missing(&self) -> usize {
        self.runs.iter().map(|r| r.missing).sum()
    }

    pub fn total_unusable(&self) -> usize {
        self.runs.iter().map(|r| r.unusable).sum()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Runs: {} | Directories: {} | Missing trials: {} | Unusable trials: {} | Warnings: {}",
            self.runs.len(),
            self.discovered_dirs,
            self.total_missing(),
            self.total_unusable(),
            self.warnings.len()
        )
    }
}

/// Aggregate every run below `config.output_root`
///
/// **Public** - main entry point for aggregation
///
/// # Returns
/// The timing series in ascending processor-count order. When the number of
/// directories or aggregates differs from the expected counts the partial
/// series is still returned and the mismatch is listed in `warnings`.
///
/// # Errors
/// * `AggregateError::Config` - invalid configuration
/// * `AggregateError::NotADirectory` - output root missing
/// * `AggregateError::EmptyTrialSet` - a run yielded no timing values
/// * `AggregateError::Io` / `AggregateError::Parse` - unreadable directories or files
///
/// # Example
/// ```ignore
/// let config = AggregationConfig::new("out/ss", vec![4, 8, 16]);
/// let report = aggregate_series(&config)?;
/// println!("{:?}", report.series.timings());
/// ```
pub fn aggregate_series(config: &AggregationConfig) -> Result<AggregationReport, AggregateError> {
    config.validate()?;

    let expected = config.processor_counts.len();
    let dirs = list_run_dirs(&config.output_root)?;
    info!(
        "Found {} run directories in {}",
        dirs.len(),
        config.output_root.display()
    );

    let mut warnings = Vec::new();
    if dirs.len() != expected {
        push_warning(
            &mut warnings,
            AggregationWarning::DirectoryCountMismatch {
                found: dirs.len(),
                expected,
            },
        );
    }

    let assignments = assign_runs(&dirs, &config.processor_counts, config.ordering);

    let mut runs = Vec::with_capacity(assignments.len());
    for assignment in &assignments {
        let (summary, fell_back) = aggregate_run(assignment, config)?;
        if fell_back {
            push_warning(
                &mut warnings,
                AggregationWarning::TrialDirFallback {
                    dir: assignment.run.path.clone(),
                },
            );
        }
        runs.push(summary);
    }

    runs.sort_by_key(|r| r.processor_count);

    if runs.len() != expected {
        push_warning(
            &mut warnings,
            AggregationWarning::SeriesLengthMismatch {
                produced: runs.len(),
                expected,
            },
        );
    }

    let series = TimingSeries::new(
        runs.iter()
            .map(|r| TimingPoint {
                processor_count: r.processor_count,
                seconds: r.mean,
            })
            .collect(),
    );

    Ok(AggregationReport {
        series,
        runs,
        warnings,
        discovered_dirs: dirs.len(),
    })
}

fn push_warning(warnings: &mut Vec<AggregationWarning>, warning: AggregationWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}
