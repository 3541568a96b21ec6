//! Normalized trace data model.
//!
//! The layout follows the Firefox processed profile: each thread owns a set of
//! columnar tables that reference one another by index. To find the function
//! name of a sample:
//!
//! ```text
//! samples.stack[i] -> stackTable.frame[s] -> frameTable.func[f]
//!                  -> funcTable.name[n]   -> stringArray[name]
//! ```
//!
//! Indices are thread-local. Chrome exports converted by the loader use `-1`
//! for "no value", so every index column is signed and every lookup is
//! fallible. Columns default to empty so partial profiles still deserialize.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::utils::config::DEFAULT_SAMPLING_INTERVAL_MS;

/// Index into one of a thread's tables. Negative values mean "unknown".
pub type TableIndex = i64;

/// One captured performance trace
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Profile-wide metadata
    pub meta: ProfileMeta,

    /// All threads, flattened across processes
    pub threads: Vec<Thread>,

    /// Tables shared by every thread (newer Firefox exports)
    pub shared: SharedTables,
}

/// Profile-wide metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileMeta {
    /// Sampling interval in milliseconds
    pub interval: f64,

    /// Wall-clock start of the main process (ms since epoch)
    pub start_time: f64,

    /// Start of the recorded range, relative to `start_time`
    pub profiling_start_time: Option<f64>,

    /// End of the recorded range, relative to `start_time`
    pub profiling_end_time: Option<f64>,

    /// Category table referenced by markers and frames
    pub categories: Vec<Category>,

    /// Installed extensions at capture time
    pub extensions: ExtensionTable,

    /// Browser product name, e.g. "Firefox"
    pub product: String,
}

impl Default for ProfileMeta {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SAMPLING_INTERVAL_MS,
            start_time: 0.0,
            profiling_start_time: None,
            profiling_end_time: None,
            categories: Vec::new(),
            extensions: ExtensionTable::default(),
            product: String::new(),
        }
    }
}

/// Entry of the category table
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Category {
    pub name: String,
    pub color: String,
}

/// Columnar table of installed extensions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtensionTable {
    pub id: Vec<String>,
    pub name: Vec<String>,
    #[serde(rename = "baseURL")]
    pub base_url: Vec<String>,
}

/// Tables shared across threads
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedTables {
    pub string_array: Vec<String>,
}

/// Process or thread identifier; numeric in most exports, a string in merged ones
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ProcessId {
    Number(i64),
    Text(String),
}

impl Default for ProcessId {
    fn default() -> Self {
        ProcessId::Number(0)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Number(n) => write!(f, "{}", n),
            ProcessId::Text(s) => f.write_str(s),
        }
    }
}

/// One execution context with its own samples, markers and tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thread {
    pub name: String,
    pub process_type: String,
    pub process_name: String,
    pub pid: ProcessId,
    pub tid: ProcessId,
    pub is_main_thread: bool,
    pub func_table: FuncTable,
    pub frame_table: FrameTable,
    pub stack_table: StackTable,
    pub resource_table: ResourceTable,
    pub samples: SamplesTable,
    pub markers: RawMarkerTable,
    /// Thread-local interned strings; empty when the profile-wide array is used
    pub string_array: Vec<String>,
}

/// De-duplicated functions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FuncTable {
    pub name: Vec<TableIndex>,
    pub file_name: Vec<Option<TableIndex>>,
    pub resource: Vec<TableIndex>,
    #[serde(rename = "isJS")]
    pub is_js: Vec<bool>,
}

/// Call-site instances of functions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrameTable {
    pub func: Vec<TableIndex>,
    pub category: Vec<Option<TableIndex>>,
}

/// Tree of unique call stacks, encoded through the `prefix` (parent) column
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StackTable {
    pub frame: Vec<TableIndex>,
    pub prefix: Vec<Option<TableIndex>>,
    pub category: Vec<Option<TableIndex>>,
}

/// Script and library origins of functions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceTable {
    pub name: Vec<TableIndex>,
    pub lib: Vec<Option<TableIndex>>,
}

/// Periodic stack snapshots
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SamplesTable {
    pub stack: Vec<Option<TableIndex>>,

    /// Absolute sample times in ms
    pub time: Vec<f64>,

    /// Delta-encoded sample times, used when `time` is absent
    pub time_deltas: Vec<f64>,

    /// CPU time consumed since the previous sample, in nanoseconds
    #[serde(rename = "threadCPUDelta")]
    pub thread_cpu_delta: Option<Vec<Option<f64>>>,
}

/// Raw marker columns as recorded by the profiler
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMarkerTable {
    pub data: Vec<Option<Value>>,
    pub name: Vec<TableIndex>,
    pub start_time: Vec<Option<f64>>,
    pub end_time: Vec<Option<f64>>,
    pub phase: Vec<u8>,
    pub category: Vec<TableIndex>,
}

/// Marker phase as encoded in `RawMarkerTable::phase`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPhase {
    Instant,
    Interval,
    IntervalStart,
    IntervalEnd,
}

impl MarkerPhase {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Instant),
            1 => Some(Self::Interval),
            2 => Some(Self::IntervalStart),
            3 => Some(Self::IntervalEnd),
            _ => None,
        }
    }
}
