//! Plot command implementation.
//! Draws snapshots as runtime or speedup line charts, in SVG or raster form.

use super::models::PlotArgs;
use crate::aggregator::{calculate_scaling, prepend_serial, Baseline};
use crate::chart::{render_chart, render_raster, ChartFormat, ChartSeries};
use crate::output::json::create_parent_dirs;
use crate::output::{read_snapshot, validate_path, write_svg};
use crate::parser::schema::TimingSnapshot;
use anyhow::{Context, Result};
use log::info;

/// Execute the plot command
pub fn execute_plot(args: PlotArgs) -> Result<()> {
    if args.snapshots.is_empty() {
        anyhow::bail!("At least one snapshot is required");
    }

    // Step 1: Load snapshots
    let mut snapshots = Vec::with_capacity(args.snapshots.len());
    for path in &args.snapshots {
        let snapshot = read_snapshot(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        snapshots.push(snapshot);
    }

    // Step 2: Build series
    let mut chart_config = args.chart_config.clone();
    let series = if args.speedup {
        chart_config = chart_config.with_y_label("Speedup");
        speedup_series(&snapshots, args.serial)?
    } else {
        runtime_series(snapshots, args.serial)
    };

    // Step 3: Render and write
    match ChartFormat::from_path(&args.output) {
        ChartFormat::Svg => {
            let svg = render_chart(&series, Some(&chart_config)).context("Failed to render chart")?;
            write_svg(&svg, &args.output).context("Failed to write chart SVG")?;
        }
        ChartFormat::Raster => {
            validate_path(&args.output)?;
            create_parent_dirs(&args.output)?;
            render_raster(&series, Some(&chart_config), &args.output)
                .context("Failed to render raster chart")?;
        }
    }
    info!("✓ Chart written to: {}", args.output.display());

    Ok(())
}

/// Runtime per snapshot, optionally starting at the serial runtime
fn runtime_series(snapshots: Vec<TimingSnapshot>, serial: Option<f64>) -> Vec<ChartSeries> {
    snapshots
        .into_iter()
        .map(|snapshot| {
            let mut timings = snapshot.series();
            if let Some(seconds) = serial {
                timings = prepend_serial(&timings, seconds);
            }
            ChartSeries::new(snapshot.label, timings)
        })
        .collect()
}

/// Ideal speedup line followed by the measured speedup of each snapshot
fn speedup_series(snapshots: &[TimingSnapshot], serial: Option<f64>) -> Result<Vec<ChartSeries>> {
    let baseline = serial.map_or(Baseline::FirstPoint, Baseline::Serial);

    let mut scaling = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        let points = calculate_scaling(&snapshot.series(), baseline)
            .with_context(|| format!("Failed to compute speedup for '{}'", snapshot.label))?;
        scaling.push(points);
    }

    let mut series = Vec::with_capacity(snapshots.len() + 1);
    series.push(ChartSeries::ideal_speedup(scaling.iter().map(Vec::as_slice)));
    for (snapshot, points) in snapshots.iter().zip(&scaling) {
        series.push(ChartSeries::speedup(snapshot.label.as_str(), points));
    }

    Ok(series)
}
