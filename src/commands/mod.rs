//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod aggregate;
pub mod compare;
pub mod models;
pub mod plot;
pub mod utils;

// Re-export main command functions
pub use aggregate::{execute_aggregate, render_run_table, validate_args};
pub use compare::{execute_compare, render_comparison, ComparisonEntry};
pub use models::{AggregateArgs, CompareArgs, PlotArgs};
pub use plot::execute_plot;
pub use utils::{display_schema, display_version, validate_snapshot_file};
