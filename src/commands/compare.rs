//! Compare command implementation.
//! Loads several snapshots and reports runtime, speedup and efficiency side by side.

use super::models::CompareArgs;
use crate::aggregator::{calculate_scaling, Baseline, ScalingPoint};
use crate::output::read_snapshot;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs;

/// Scaling metrics of one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonEntry {
    pub label: String,
    pub points: Vec<ScalingPoint>,
}

/// Execute the compare command
pub fn execute_compare(args: CompareArgs) -> Result<Vec<ComparisonEntry>> {
    if args.snapshots.is_empty() {
        anyhow::bail!("At least one snapshot is required");
    }

    let baseline = match args.serial {
        Some(seconds) => Baseline::Serial(seconds),
        None => Baseline::FirstPoint,
    };

    // Step 1: Load snapshots and derive metrics
    let mut entries = Vec::with_capacity(args.snapshots.len());
    for path in &args.snapshots {
        let snapshot = read_snapshot(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let points = calculate_scaling(&snapshot.series(), baseline)
            .with_context(|| format!("Cannot derive scaling metrics for {}", snapshot.label))?;
        entries.push(ComparisonEntry {
            label: snapshot.label,
            points,
        });
    }

    // Step 2: Write output if requested
    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(path, json).context("Failed to write comparison JSON")?;
        println!(
            "📊 Comparison written to {}",
            path.display().to_string().cyan()
        );
    }

    // Step 3: Terminal summary
    println!("{}", render_comparison(&entries, baseline));

    Ok(entries)
}

/// Render a comparison table for the terminal
pub fn render_comparison(entries: &[ComparisonEntry], baseline: Baseline) -> String {
    let mut out = String::new();

    out.push_str("\n📊 ");
    out.push_str(&"Scaling Comparison".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    match baseline {
        Baseline::Serial(seconds) => {
            out.push_str(&format!("Baseline: serial run, {} s\n", seconds));
        }
        Baseline::FirstPoint => {
            out.push_str("Baseline: first point of each series\n");
        }
    }
    out.push_str("---------------------------------------------------\n");

    for entry in entries {
        out.push_str(&format!("\n{}\n", entry.label.bold()));
        out.push_str(&format!(
            "  {:>6} {:>12} {:>9} {:>9} {:>11}\n",
            "PROCS", "RUNTIME (s)", "SPEEDUP", "IDEAL", "EFFICIENCY"
        ));

        for p in &entry.points {
            let efficiency = format!("{:>10.1}%", p.efficiency * 100.0);
            let efficiency = if p.efficiency >= 0.8 {
                efficiency.green()
            } else if p.efficiency >= 0.5 {
                efficiency.yellow()
            } else {
                efficiency.red()
            };
            out.push_str(&format!(
                "  {:>6} {:>12.3} {:>9.2} {:>9.2} {}\n",
                p.processor_count, p.seconds, p.speedup, p.ideal_speedup, efficiency
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_comparison_lists_every_point() {
        colored::control::set_override(false);

        let entries = vec![ComparisonEntry {
            label: "Layer Based".to_string(),
            points: vec![
                ScalingPoint {
                    processor_count: 4,
                    seconds: 700.0,
                    speedup: 4.0,
                    ideal_speedup: 4.0,
                    efficiency: 1.0,
                },
                ScalingPoint {
                    processor_count: 8,
                    seconds: 700.0,
                    speedup: 4.0,
                    ideal_speedup: 8.0,
                    efficiency: 0.5,
                },
            ],
        }];

        let out = render_comparison(&entries, Baseline::Serial(2800.0));

        assert!(out.contains("Layer Based"));
        assert!(out.contains("serial run, 2800 s"));
        assert!(out.contains("100.0%"));
        assert!(out.contains("50.0%"));
    }
}
