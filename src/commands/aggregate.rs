//! Aggregate command implementation.
//!
//! The aggregate command:
//! 1. Discovers run directories and matches them to processor counts
//! 2. Averages the trial timings of every run
//! 3. Writes the timing series snapshot

use super::models::AggregateArgs;
use crate::aggregator::{aggregate_series, AggregationReport};
use crate::output::write_snapshot;
use crate::parser::schema::TimingSnapshot;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The aggregation report, after the snapshot has been written
///
/// # Errors
/// * Invalid configuration
/// * Unreadable output root or trial files
/// * A run directory without any usable trial
/// * Snapshot write errors
pub fn execute_aggregate(args: AggregateArgs) -> Result<AggregationReport> {
    let start_time = Instant::now();

    info!(
        "Aggregating {} in {}",
        args.label,
        args.config.output_root.display()
    );

    // Step 1: Aggregate
    info!("Step 1/2: Reading trial files...");
    let report = aggregate_series(&args.config).with_context(|| {
        format!(
            "Failed to aggregate runs in {}",
            args.config.output_root.display()
        )
    })?;

    info!("{}", report.summary());
    debug!("Timings: {:?}", report.series.timings());

    // Step 2: Persist
    info!("Step 2/2: Writing snapshot...");
    let snapshot = TimingSnapshot::new(&args.label, &report.series, args.config.trial_count);
    write_snapshot(&snapshot, &args.output).context("Failed to write timing snapshot")?;

    info!("✓ Snapshot written to: {}", args.output.display());

    if args.print_summary {
        println!("\n{}", render_run_table(&report));
    }

    let elapsed = start_time.elapsed();
    info!("Aggregation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate aggregate arguments
///
/// **Public** - can be called before execute_aggregate for early validation
pub fn validate_args(args: &AggregateArgs) -> Result<()> {
    args.config.validate()?;

    if args.label.trim().is_empty() {
        anyhow::bail!("Label cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    Ok(())
}

/// Per-run table for the terminal
pub fn render_run_table(report: &AggregationReport) -> String {
    let mut lines = Vec::new();

    lines.push("=".repeat(72));
    lines.push(format!(
        "{:>6}  {:<24} {:>7} {:>7} {:>8} {:>12}",
        "PROCS", "RUN DIRECTORY", "TRIALS", "MISSING", "UNUSABLE", "MEAN (s)"
    ));
    lines.push("-".repeat(72));

    for run in &report.runs {
        lines.push(format!(
            "{:>6}  {:<24} {:>7} {:>7} {:>8} {:>12.4}",
            run.processor_count,
            truncate(&run.dir_name, 24),
            run.samples.len(),
            run.missing,
            run.unusable,
            run.mean
        ));
    }

    lines.push("=".repeat(72));

    for warning in &report.warnings {
        lines.push(format!("WARNING: {}", warning));
    }

    lines.join("\n")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let skip = s.chars().count() - max.saturating_sub(3);
    let tail: String = s.chars().skip(skip).collect();
    format!("...{}", tail)
}
