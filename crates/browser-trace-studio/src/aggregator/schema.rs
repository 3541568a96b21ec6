//! Call tree result types.

use serde::{Deserialize, Serialize};

/// Result of a call tree analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallTreeAnalysis {
    /// Time covered by all attributed samples
    pub total_time_ms: f64,

    /// Number of attributed samples
    pub total_samples: u64,

    /// Functions ranked by self time
    pub top_functions: Vec<FunctionStats>,

    /// Call paths ranked by self time
    pub hot_paths: Vec<HotPath>,

    /// Matched thread name, or "All threads"
    pub thread_name: String,
}

/// Aggregated timing for one function name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionStats {
    pub name: String,

    /// Time spent as the leaf frame
    pub self_time_ms: f64,

    /// Time spent anywhere on the stack
    pub running_time_ms: f64,

    /// Samples where the function was the leaf
    pub self_samples: u64,

    /// Self time as a percentage of the total
    pub self_percent: f64,

    /// Running time as a percentage of the total
    pub running_percent: f64,

    /// Script or library the function came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

/// A hot call path (up to five frames, root to leaf)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotPath {
    /// Function names, root first
    pub frames: Vec<String>,

    /// Time of the stacks rendering to this path
    pub self_time_ms: f64,

    /// Samples of the stacks rendering to this path
    pub sample_count: u64,

    /// Percentage of the total time
    pub percentage: f64,
}

impl HotPath {
    /// Display form, e.g. "main -> run -> paint"
    pub fn display(&self) -> String {
        self.frames.join(" -> ")
    }
}
