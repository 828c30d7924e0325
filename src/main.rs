//! Scaling Report CLI
//!
//! Aggregates benchmark logs of a parallel simulator into timing series,
//! compares saved series and renders them as charts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use scaling_report::chart::ChartConfig;
use scaling_report::commands::{
    display_schema, display_version, execute_aggregate, execute_compare, execute_plot,
    validate_args, validate_snapshot_file, AggregateArgs, CompareArgs, PlotArgs,
};
use scaling_report::utils::config::{
    load_campaign, CampaignFile, DirectoryOrdering, TrialSource, DEFAULT_SNAPSHOT_PATH,
};

/// Scaling Report - benchmark log aggregation for parallel simulations
#[derive(Parser, Debug)]
#[command(name = "scaling-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate run directories into a timing snapshot
    Aggregate {
        /// Directory containing one run directory per processor count
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Campaign TOML file; flags override its values
        #[arg(short, long, env = "SCALING_REPORT_CONFIG")]
        config: Option<PathBuf>,

        /// Expected processor counts, ascending (e.g. 4,8,16)
        #[arg(long, value_delimiter = ',')]
        counts: Option<Vec<u32>>,

        /// Trial files attempted per run directory
        #[arg(short, long)]
        trials: Option<usize>,

        /// How run directories map to processor counts
        #[arg(long, value_enum)]
        ordering: Option<DirectoryOrdering>,

        /// Where trial files live inside a run directory
        #[arg(long, value_enum)]
        trial_source: Option<TrialSource>,

        /// Line prefix of the timing line
        #[arg(long)]
        marker: Option<String>,

        /// Trial file name template containing {trial}
        #[arg(long)]
        trial_template: Option<String>,

        /// Legend label stored in the snapshot
        #[arg(short, long)]
        label: Option<String>,

        /// Output path for the JSON snapshot
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print per-run table to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Compare snapshots: runtime, speedup and efficiency
    Compare {
        /// Snapshot files
        #[arg(required = true)]
        snapshots: Vec<PathBuf>,

        /// Serial runtime in seconds used as speedup baseline
        #[arg(long)]
        serial: Option<f64>,

        /// Write computed metrics as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render snapshots as a line chart (SVG, or PNG/JPEG with the raster feature)
    Plot {
        /// Snapshot files
        #[arg(required = true)]
        snapshots: Vec<PathBuf>,

        /// Output path for the chart; the extension picks the format
        #[arg(short, long, default_value = "scaling.svg")]
        output: PathBuf,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Logarithmic processor axis
        #[arg(long)]
        log_x: bool,

        /// Logarithmic runtime axis
        #[arg(long)]
        log_y: bool,

        /// Serial runtime: one-processor point, or speedup baseline with --speedup
        #[arg(long)]
        serial: Option<f64>,

        /// Plot speedup against an ideal line instead of runtime
        #[arg(long)]
        speedup: bool,

        /// Chart width in pixels
        #[arg(long, default_value = "900")]
        width: u32,

        /// Chart height in pixels
        #[arg(long, default_value = "500")]
        height: u32,
    },

    /// Validate a snapshot JSON file
    Validate {
        /// Path to snapshot JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Aggregate {
            root,
            config,
            counts,
            trials,
            ordering,
            trial_source,
            marker,
            trial_template,
            label,
            output,
            summary,
        } => {
            let campaign = match config {
                Some(path) => load_campaign(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => CampaignFile::default(),
            };

            let mut aggregation = campaign.aggregation;
            if let Some(root) = root {
                aggregation.output_root = root;
            }
            if let Some(counts) = counts {
                aggregation.processor_counts = counts;
            }
            if let Some(trials) = trials {
                aggregation.trial_count = trials;
            }
            if let Some(ordering) = ordering {
                aggregation.ordering = ordering;
            }
            if let Some(trial_source) = trial_source {
                aggregation.trial_source = trial_source;
            }
            if let Some(marker) = marker {
                aggregation.marker = marker;
            }
            if let Some(template) = trial_template {
                aggregation.trial_file_template = template;
            }

            let args = AggregateArgs {
                config: aggregation,
                label: label.or(campaign.label).unwrap_or_else(|| "series".to_string()),
                output: output
                    .or(campaign.output)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute aggregation
            execute_aggregate(args)?;
        }

        Commands::Compare {
            snapshots,
            serial,
            output,
        } => {
            execute_compare(CompareArgs {
                snapshots,
                serial,
                output,
            })?;
        }

        Commands::Plot {
            snapshots,
            output,
            title,
            log_x,
            log_y,
            serial,
            speedup,
            width,
            height,
        } => {
            let mut chart_config = ChartConfig::new().with_log_axes(log_x, log_y);
            if let Some(title) = title {
                chart_config = chart_config.with_title(title);
            }
            chart_config.width = width;
            chart_config.height = height;

            execute_plot(PlotArgs {
                snapshots,
                output,
                serial,
                speedup,
                chart_config,
            })?;
        }

        Commands::Validate { file } => {
            validate_snapshot_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
