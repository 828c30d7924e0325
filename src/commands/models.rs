use crate::chart::ChartConfig;
use crate::utils::config::{AggregationConfig, DEFAULT_SNAPSHOT_PATH};
use std::path::PathBuf;

/// Arguments for the aggregate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    /// Aggregation parameters (root, counts, trials, layout)
    pub config: AggregationConfig,

    /// Legend label stored in the snapshot
    pub label: String,

    /// Output path for the JSON snapshot
    pub output: PathBuf,

    /// Print per-run table to stdout
    pub print_summary: bool,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            config: AggregationConfig::default(),
            label: "series".to_string(),
            output: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            print_summary: false,
        }
    }
}

/// Arguments for the compare command
#[derive(Debug, Clone, Default)]
pub struct CompareArgs {
    /// Snapshots to compare, in legend order
    pub snapshots: Vec<PathBuf>,

    /// Serial runtime in seconds; speedup is relative to the first point otherwise
    pub serial: Option<f64>,

    /// Optional JSON output of the computed metrics
    pub output: Option<PathBuf>,
}

/// Arguments for the plot command
#[derive(Debug, Clone)]
pub struct PlotArgs {
    /// Snapshots to draw, in legend order
    pub snapshots: Vec<PathBuf>,

    /// Output path; `.png`/`.jpeg` give a raster image, anything else SVG
    pub output: PathBuf,

    /// Serial runtime: a one-processor point on runtime charts, the
    /// baseline on speedup charts
    pub serial: Option<f64>,

    /// Draw speedup with an ideal line instead of runtime
    pub speedup: bool,

    pub chart_config: ChartConfig,
}

impl Default for PlotArgs {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
            output: PathBuf::from("scaling.svg"),
            serial: None,
            speedup: false,
            chart_config: ChartConfig::default(),
        }
    }
}
