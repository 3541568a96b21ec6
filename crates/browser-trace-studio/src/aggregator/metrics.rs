//! Rank aggregated functions and call paths.
//!
//! The call tree walk fills name-keyed accumulators; this module turns them
//! into sorted, truncated result rows with percentages of the total time.

use super::schema::{FunctionStats, HotPath};
use log::debug;
use std::collections::HashMap;

/// Per-function totals collected during the walk
#[derive(Debug, Clone, Default)]
pub struct FunctionAccumulator {
    pub self_time_ms: f64,
    pub running_time_ms: f64,
    pub self_samples: u64,
    pub resource: Option<String>,
}

/// Per-path totals collected during the walk
#[derive(Debug, Clone, Default)]
pub struct PathAccumulator {
    pub frames: Vec<String>,
    pub time_ms: f64,
    pub samples: u64,
}

/// Turn function accumulators into rows sorted by self time
///
/// **Public** - used by the call tree analysis
///
/// Ties are broken by name so the output is deterministic.
pub fn rank_functions(
    functions: HashMap<String, FunctionAccumulator>,
    total_time_ms: f64,
    limit: usize,
) -> Vec<FunctionStats> {
    debug!("Ranking {} functions (limit {})", functions.len(), limit);

    let mut rows: Vec<FunctionStats> = functions
        .into_iter()
        .map(|(name, acc)| FunctionStats {
            name,
            self_time_ms: acc.self_time_ms,
            running_time_ms: acc.running_time_ms,
            self_samples: acc.self_samples,
            self_percent: percentage(acc.self_time_ms, total_time_ms),
            running_percent: percentage(acc.running_time_ms, total_time_ms),
            resource: acc.resource,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.self_time_ms
            .total_cmp(&a.self_time_ms)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows.truncate(limit);
    rows
}

/// Turn path accumulators into hot paths sorted by time
pub fn rank_hot_paths(
    paths: HashMap<String, PathAccumulator>,
    total_time_ms: f64,
    limit: usize,
) -> Vec<HotPath> {
    let mut rows: Vec<HotPath> = paths
        .into_values()
        .map(|acc| create_hot_path(acc.frames, acc.time_ms, acc.samples, total_time_ms))
        .collect();

    rows.sort_by(|a, b| {
        b.self_time_ms
            .total_cmp(&a.self_time_ms)
            .then_with(|| a.frames.cmp(&b.frames))
    });
    rows.truncate(limit);
    rows
}

/// Create a HotPath with its share of the total time
pub fn create_hot_path(
    frames: Vec<String>,
    time_ms: f64,
    samples: u64,
    total_time_ms: f64,
) -> HotPath {
    HotPath {
        frames,
        self_time_ms: time_ms,
        sample_count: samples,
        percentage: percentage(time_ms, total_time_ms),
    }
}

fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(self_time: f64, running: f64) -> FunctionAccumulator {
        FunctionAccumulator {
            self_time_ms: self_time,
            running_time_ms: running,
            self_samples: self_time as u64,
            resource: None,
        }
    }

    #[test]
    fn test_rank_functions_sorted_and_truncated() {
        let mut functions = HashMap::new();
        functions.insert("paint".to_string(), acc(30.0, 30.0));
        functions.insert("main".to_string(), acc(0.0, 100.0));
        functions.insert("layout".to_string(), acc(70.0, 80.0));

        let rows = rank_functions(functions, 100.0, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "layout");
        assert_eq!(rows[0].self_percent, 70.0);
        assert_eq!(rows[0].running_percent, 80.0);
        assert_eq!(rows[1].name, "paint");
    }

    #[test]
    fn test_rank_functions_tie_break_by_name() {
        let mut functions = HashMap::new();
        functions.insert("b".to_string(), acc(5.0, 5.0));
        functions.insert("a".to_string(), acc(5.0, 5.0));

        let rows = rank_functions(functions, 10.0, 10);
        assert_eq!(rows[0].name, "a");
        assert_eq!(rows[1].name, "b");
    }

    #[test]
    fn test_create_hot_path_zero_total() {
        let path = create_hot_path(vec!["main".to_string()], 5.0, 5, 0.0);
        assert_eq!(path.percentage, 0.0);
        assert_eq!(path.display(), "main");
    }
}
