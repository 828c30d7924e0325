//! Run directory discovery.
//!
//! Lists the run directories below the output root and matches each one to
//! the processor count it was run with.

use crate::utils::config::DirectoryOrdering;
use crate::utils::error::AggregateError;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A run directory found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    pub name: String,
    pub path: PathBuf,
}

/// A run directory matched to its processor count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAssignment {
    pub processor_count: u32,
    pub run: RunDir,
}

/// List immediate child directories of `root`, sorted by name
///
/// # Errors
/// * `AggregateError::NotADirectory` - `root` is missing or not a directory
/// * `AggregateError::Io` - listing failed
pub fn list_run_dirs(root: &Path) -> Result<Vec<RunDir>, AggregateError> {
    if !root.is_dir() {
        return Err(AggregateError::NotADirectory(root.to_path_buf()));
    }
    list_subdirs(root)
}

/// Sorted child directories of `dir`
pub(crate) fn list_subdirs(dir: &Path) -> Result<Vec<RunDir>, AggregateError> {
    let io_err = |source| AggregateError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        dirs.push(RunDir {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
        });
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dirs)
}

/// Trailing integer of a directory name (`ss_04` -> 4, `run-128` -> 128)
pub fn parse_trailing_count(name: &str) -> Option<u32> {
    let digits = name.len() - name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    name[name.len() - digits..].parse().ok()
}

/// Match run directories to processor counts
///
/// **Public** - main entry point for discovery
///
/// The result is ordered by ascending processor count. Counts with no
/// matching directory are left out.
///
/// # Arguments
/// * `dirs` - Run directories, sorted by name
/// * `counts` - Expected processor counts, ascending
/// * `ordering` - Matching rule
pub fn assign_runs(dirs: &[RunDir], counts: &[u32], ordering: DirectoryOrdering) -> Vec<RunAssignment> {
    match ordering {
        DirectoryOrdering::ReverseLexicographic => assign_reverse_lexicographic(dirs, counts),
        DirectoryOrdering::ParsedCount => assign_parsed_count(dirs, counts),
    }
}

/// Directory `i` counted from the end of the sorted list runs `counts[i]`
fn assign_reverse_lexicographic(dirs: &[RunDir], counts: &[u32]) -> Vec<RunAssignment> {
    counts
        .iter()
        .zip(dirs.iter().rev())
        .map(|(&processor_count, run)| {
            debug!("{} -> {} processors", run.name, processor_count);
            RunAssignment {
                processor_count,
                run: run.clone(),
            }
        })
        .collect()
}

fn assign_parsed_count(dirs: &[RunDir], counts: &[u32]) -> Vec<RunAssignment> {
    let mut by_count: BTreeMap<u32, &RunDir> = BTreeMap::new();

    for run in dirs {
        match parse_trailing_count(&run.name) {
            Some(count) => {
                if let Some(existing) = by_count.get(&count) {
                    warn!(
                        "Run directories {} and {} both claim {} processors, keeping {}",
                        existing.name, run.name, count, existing.name
                    );
                } else {
                    by_count.insert(count, run);
                }
            }
            None => warn!("Cannot parse a processor count from directory name: {}", run.name),
        }
    }

    for (count, run) in &by_count {
        if !counts.contains(count) {
            debug!("Ignoring {} ({} processors not expected)", run.name, count);
        }
    }

    counts
        .iter()
        .filter_map(|&processor_count| {
            by_count.get(&processor_count).map(|run| RunAssignment {
                processor_count,
                run: (*run).clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str) -> RunDir {
        RunDir {
            name: name.to_string(),
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn test_parse_trailing_count() {
        assert_eq!(parse_trailing_count("ss_04"), Some(4));
        assert_eq!(parse_trailing_count("run-128"), Some(128));
        assert_eq!(parse_trailing_count("256"), Some(256));
        assert_eq!(parse_trailing_count("case"), None);
        assert_eq!(parse_trailing_count(""), None);
    }

    #[test]
    fn test_reverse_lexicographic_maps_last_dir_to_first_count() {
        let dirs = vec![run("A"), run("B")];
        let assigned = assign_runs(&dirs, &[4, 8], DirectoryOrdering::ReverseLexicographic);

        assert_eq!(assigned.len(), 2);
        assert_eq!(assigned[0].processor_count, 4);
        assert_eq!(assigned[0].run.name, "B");
        assert_eq!(assigned[1].processor_count, 8);
        assert_eq!(assigned[1].run.name, "A");
    }

    #[test]
    fn test_reverse_lexicographic_with_fewer_dirs() {
        let dirs = vec![run("only")];
        let assigned = assign_runs(&dirs, &[4, 8, 16], DirectoryOrdering::ReverseLexicographic);
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].processor_count, 4);
    }

    #[test]
    fn test_parsed_count_ignores_listing_order() {
        let dirs = vec![run("ss_128"), run("ss_04"), run("ss_16"), run("notes")];
        let assigned = assign_runs(&dirs, &[4, 16, 64, 128], DirectoryOrdering::ParsedCount);

        let pairs: Vec<(u32, &str)> = assigned
            .iter()
            .map(|a| (a.processor_count, a.run.name.as_str()))
            .collect();
        assert_eq!(pairs, vec![(4, "ss_04"), (16, "ss_16"), (128, "ss_128")]);
    }
}
