//! Configuration and constants for the CLI.
//!
//! Benchmark campaigns are described by an [`AggregationConfig`], which can be
//! built from defaults, loaded from a TOML file, and overridden from the CLI.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current snapshot schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Token that opens the timing line in a trial file
pub const DEFAULT_MARKER: &str = "timing";

/// Trial file name; `{trial}` is replaced by the trial index
pub const DEFAULT_TRIAL_TEMPLATE: &str = "{trial}_0.raw";

/// Placeholder substituted in the trial file template
pub const TRIAL_PLACEHOLDER: &str = "{trial}";

/// Trials attempted per run directory
pub const DEFAULT_TRIAL_COUNT: usize = 10;

/// Processor counts used by the strong and weak scaling campaigns
pub const DEFAULT_PROCESSOR_COUNTS: &[u32] = &[4, 8, 12, 16, 20, 24, 36, 64, 128, 256];

/// Default snapshot file, relative to the working directory
pub const DEFAULT_SNAPSHOT_PATH: &str = "scaling_series.json";

/// How run directories are matched to processor counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DirectoryOrdering {
    /// Sort names ascending; the last directory is the smallest processor count
    #[default]
    ReverseLexicographic,
    /// Parse the trailing integer of the directory name (`ss_04` -> 4)
    ParsedCount,
}

/// Where trial files live inside a run directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TrialSource {
    /// First property subdirectory (sorted by name)
    #[default]
    FirstSubdir,
    /// Last property subdirectory (sorted by name)
    LastSubdir,
    /// The run directory itself
    RunDir,
}

/// Parameters of one aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Directory whose children are the run directories
    pub output_root: PathBuf,

    /// Expected processor counts, strictly increasing
    pub processor_counts: Vec<u32>,

    /// Trial files attempted per run directory
    pub trial_count: usize,

    pub ordering: DirectoryOrdering,

    pub trial_source: TrialSource,

    /// Line prefix that identifies the timing line
    pub marker: String,

    /// Trial file name template containing `{trial}`
    pub trial_file_template: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("out"),
            processor_counts: DEFAULT_PROCESSOR_COUNTS.to_vec(),
            trial_count: DEFAULT_TRIAL_COUNT,
            ordering: DirectoryOrdering::default(),
            trial_source: TrialSource::default(),
            marker: DEFAULT_MARKER.to_string(),
            trial_file_template: DEFAULT_TRIAL_TEMPLATE.to_string(),
        }
    }
}

impl AggregationConfig {
    pub fn new(output_root: impl Into<PathBuf>, processor_counts: Vec<u32>) -> Self {
        Self {
            output_root: output_root.into(),
            processor_counts,
            ..Self::default()
        }
    }

    pub fn with_trial_count(mut self, trial_count: usize) -> Self {
        self.trial_count = trial_count;
        self
    }

    pub fn with_ordering(mut self, ordering: DirectoryOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_trial_source(mut self, trial_source: TrialSource) -> Self {
        self.trial_source = trial_source;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// File name of trial `index`
    pub fn trial_file_name(&self, index: usize) -> String {
        self.trial_file_template
            .replace(TRIAL_PLACEHOLDER, &index.to_string())
    }

    /// Check the invariants the aggregator relies on
    ///
    /// # Errors
    /// * `ConfigError::Invalid` - empty or non-increasing counts, zero trials,
    ///   empty marker, or a template without `{trial}`
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_processor_counts(&self.processor_counts)?;

        if self.trial_count == 0 {
            return Err(ConfigError::Invalid(
                "trial_count must be greater than 0".to_string(),
            ));
        }

        if self.marker.trim().is_empty() {
            return Err(ConfigError::Invalid("marker cannot be empty".to_string()));
        }

        if !self.trial_file_template.contains(TRIAL_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "trial_file_template must contain {}",
                TRIAL_PLACEHOLDER
            )));
        }

        Ok(())
    }
}

/// Processor counts must be non-empty, positive and strictly increasing
pub fn validate_processor_counts(counts: &[u32]) -> Result<(), ConfigError> {
    if counts.is_empty() {
        return Err(ConfigError::Invalid(
            "processor_counts cannot be empty".to_string(),
        ));
    }

    if counts.contains(&0) {
        return Err(ConfigError::Invalid(
            "processor_counts must be positive".to_string(),
        ));
    }

    if let Some(pair) = counts.windows(2).find(|w| w[0] >= w[1]) {
        return Err(ConfigError::Invalid(format!(
            "processor_counts must be strictly increasing ({} then {})",
            pair[0], pair[1]
        )));
    }

    Ok(())
}

/// Campaign file: an aggregation config plus snapshot metadata
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CampaignFile {
    /// Legend label stored in the snapshot
    pub label: Option<String>,

    /// Snapshot output path
    pub output: Option<PathBuf>,

    #[serde(flatten)]
    pub aggregation: AggregationConfig,
}

/// Load a campaign description from a TOML file
///
/// # Example
/// ```ignore
/// let campaign = load_campaign("strong_scaling.toml")?;
/// campaign.aggregation.validate()?;
/// ```
pub fn load_campaign(path: impl AsRef<Path>) -> Result<CampaignFile, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let campaign: CampaignFile = toml::from_str(&contents)?;
    Ok(campaign)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AggregationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_trial_file_name() {
        let config = AggregationConfig::default();
        assert_eq!(config.trial_file_name(0), "0_0.raw");
        assert_eq!(config.trial_file_name(9), "9_0.raw");
    }

    #[test]
    fn test_rejects_non_increasing_counts() {
        assert!(validate_processor_counts(&[4, 8, 8]).is_err());
        assert!(validate_processor_counts(&[8, 4]).is_err());
        assert!(validate_processor_counts(&[]).is_err());
        assert!(validate_processor_counts(&[0, 4]).is_err());
        assert!(validate_processor_counts(&[1, 4, 16]).is_ok());
    }

    #[test]
    fn test_rejects_zero_trials() {
        let config = AggregationConfig::default().with_trial_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let config = AggregationConfig {
            trial_file_template: "trial.raw".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_campaign_from_toml() {
        let campaign: CampaignFile = toml::from_str(
            r#"
label = "Layer Based"
output = "strongScaleData.json"
output_root = "out/ss"
processor_counts = [4, 8, 16]
trial_count = 3
ordering = "parsed-count"
trial_source = "last-subdir"
"#,
        )
        .unwrap();

        assert_eq!(campaign.label.as_deref(), Some("Layer Based"));
        assert_eq!(campaign.aggregation.output_root, PathBuf::from("out/ss"));
        assert_eq!(campaign.aggregation.processor_counts, vec![4, 8, 16]);
        assert_eq!(campaign.aggregation.trial_count, 3);
        assert_eq!(campaign.aggregation.ordering, DirectoryOrdering::ParsedCount);
        assert_eq!(campaign.aggregation.trial_source, TrialSource::LastSubdir);
        assert_eq!(campaign.aggregation.marker, DEFAULT_MARKER);
    }
}
