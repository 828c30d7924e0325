use crate::output::read_snapshot;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a snapshot JSON file
pub fn validate_snapshot_file(file_path: PathBuf) -> Result<()> {
    println!("Validating snapshot: {}", file_path.display());

    let snapshot = read_snapshot(&file_path)?;

    println!("✓ Valid snapshot JSON");
    println!("  Version: {}", snapshot.version);
    println!("  Label: {}", snapshot.label);
    println!("  Trials per run: {}", snapshot.trial_count);
    println!("  Points: {}", snapshot.timings.len());
    for (count, seconds) in snapshot.processor_counts.iter().zip(&snapshot.timings) {
        println!("    {:>6} processors: {} s", count, seconds);
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Scaling Report Snapshot Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  label: string              - Legend label of the series");
        println!("  processor_counts: array    - Processor counts, ascending");
        println!("  timings: array             - Mean runtime in seconds per processor count");
        println!("  trial_count: number        - Trials attempted per run directory");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Scaling Report v{}", env!("CARGO_PKG_VERSION"));
    println!("Snapshot Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Aggregation and charting of parallel scaling benchmark logs.");
}
