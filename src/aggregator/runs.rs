//! Per-run trial collection and averaging.

use super::discovery::{list_subdirs, RunAssignment};
use crate::parser::timing::{read_trial_file, TrialOutcome};
use crate::utils::config::{AggregationConfig, TrialSource};
use crate::utils::error::AggregateError;
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Aggregated result of one run directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub processor_count: u32,

    /// Run directory name
    pub dir_name: String,

    /// Directory the trial files were read from
    pub trial_dir: PathBuf,

    /// Parsed timings, in trial order
    pub samples: Vec<f64>,

    /// Trial files that did not exist
    pub missing: usize,

    /// Trial files without a usable timing line
    pub unusable: usize,

    /// Mean of `samples`
    pub mean: f64,
}

/// Where the trial files of a run directory live
///
/// Returns the chosen directory and whether the run directory itself had to
/// be used because no property subdirectory exists.
pub fn resolve_trial_dir(run_dir: &Path, source: TrialSource) -> Result<(PathBuf, bool), AggregateError> {
    if source == TrialSource::RunDir {
        return Ok((run_dir.to_path_buf(), false));
    }

    let subdirs = list_subdirs(run_dir)?;
    let chosen = match source {
        TrialSource::FirstSubdir => subdirs.first(),
        _ => subdirs.last(),
    };

    match chosen {
        Some(sub) => Ok((sub.path.clone(), false)),
        None => {
            warn!(
                "No property directory in {}, reading trials from the run directory",
                run_dir.display()
            );
            Ok((run_dir.to_path_buf(), true))
        }
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Read every trial of one run and average the timings found
///
/// **Public** - used by the collector for each assigned run
///
/// # Errors
/// * `AggregateError::EmptyTrialSet` - no trial produced a value
/// * `AggregateError::Parse` - a trial file exists but cannot be read
/// * `AggregateError::Io` - the property directory cannot be listed
pub fn aggregate_run(
    assignment: &RunAssignment,
    config: &AggregationConfig,
) -> Result<(RunSummary, bool), AggregateError> {
    let (trial_dir, fell_back) = resolve_trial_dir(&assignment.run.path, config.trial_source)?;

    let mut samples = Vec::with_capacity(config.trial_count);
    let mut missing = 0;
    let mut unusable = 0;

    for trial in 0..config.trial_count {
        let path = trial_dir.join(config.trial_file_name(trial));
        let outcome = read_trial_file(&path, &config.marker)?;

        match outcome {
            TrialOutcome::Parsed(value) => samples.push(value),
            TrialOutcome::Missing => missing += 1,
            TrialOutcome::NoMarker | TrialOutcome::Malformed(_) => unusable += 1,
        }
    }

    let mean = mean(&samples).ok_or_else(|| AggregateError::EmptyTrialSet {
        dir: assignment.run.path.clone(),
        processor_count: assignment.processor_count,
    })?;

    debug!(
        "{} processors ({}): {} samples, {} missing, {} unusable, mean {:.4} s",
        assignment.processor_count,
        assignment.run.name,
        samples.len(),
        missing,
        unusable,
        mean
    );

    Ok((
        RunSummary {
            processor_count: assignment.processor_count,
            dir_name: assignment.run.name.clone(),
            trial_dir,
            samples,
            missing,
            unusable,
            mean,
        },
        fell_back,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[4.0]), Some(4.0));
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_resolve_trial_dir_picks_sorted_subdirs() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("prop_b")).unwrap();
        std::fs::create_dir(root.path().join("prop_a")).unwrap();

        let (first, _) = resolve_trial_dir(root.path(), TrialSource::FirstSubdir).unwrap();
        let (last, _) = resolve_trial_dir(root.path(), TrialSource::LastSubdir).unwrap();
        let (own, _) = resolve_trial_dir(root.path(), TrialSource::RunDir).unwrap();

        assert_eq!(first, root.path().join("prop_a"));
        assert_eq!(last, root.path().join("prop_b"));
        assert_eq!(own, root.path());
    }

    #[test]
    fn test_resolve_trial_dir_falls_back_without_subdirs() {
        let root = tempfile::tempdir().unwrap();
        let (dir, fell_back) = resolve_trial_dir(root.path(), TrialSource::FirstSubdir).unwrap();
        assert_eq!(dir, root.path());
        assert!(fell_back);
    }
}
