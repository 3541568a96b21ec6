//! Configuration and constants for the analysis engine and the CLI.

use super::error::ConfigError;
use crate::commands::models::OutputFormat;
use crate::diagnostics::Severity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current report envelope schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Stack prefix walks stop after this many frames (malformed or cyclic tables)
pub const MAX_STACK_DEPTH: usize = 50;

/// Result limit used when callers pass 0
pub const DEFAULT_TOP_LIMIT: usize = 20;

/// Number of frames kept when rendering a hot path
pub const HOT_PATH_MAX_FRAMES: usize = 5;

/// Function names longer than this are shortened in hot paths
pub const MAX_FUNCTION_NAME_LEN: usize = 50;

/// Sampling interval assumed when the profile does not declare one
pub const DEFAULT_SAMPLING_INTERVAL_MS: f64 = 1.0;

/// Category label for markers whose category index cannot be resolved
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// Field names differ between Firefox and Chrome exports.
// Each pair is (alias, canonical key) in the normalized marker payload.
pub const PAYLOAD_ALIASES: &[(&str, &str)] = &[
    ("URI", "url"),
    ("uri", "url"),
    ("URL", "url"),
    ("isSync", "sync"),
    ("is_sync", "sync"),
    ("event_type", "eventType"),
    ("actorName", "actor"),
];

// Long tasks
pub const LONG_TASK_MARKER: &str = "MainThreadLongTask";
pub const LONG_TASK_MIN_MS: f64 = 50.0;
pub const LONG_TASK_MAX_MS: f64 = 10_000.0;

// GC pressure
pub const GC_CATEGORY: &str = "GC / CC";
pub const GC_MAX_MS: f64 = 5_000.0;
pub const GC_SUPPRESS_BELOW_TOTAL_MS: f64 = 500.0;

// Sync IPC
pub const IPC_CATEGORY: &str = "IPC";
pub const IPC_MAX_MS: f64 = 2_000.0;
pub const IPC_IMPLICIT_SYNC_MS: f64 = 10.0;

// Layout thrashing
pub const LAYOUT_CATEGORY: &str = "Layout";
pub const LAYOUT_MAX_MS: f64 = 1_000.0;
pub const LAYOUT_RAPID_GAP_MS: f64 = 100.0;
pub const LAYOUT_MIN_RAPID_PAIRS: usize = 5;

// Network blocking
pub const NETWORK_CATEGORY: &str = "Network";
pub const NETWORK_MARKER_NAMES: &[&str] = &["ChannelMarker", "HostResolver"];
pub const NETWORK_MIN_MS: f64 = 1_000.0;
pub const NETWORK_MAX_MS: f64 = 30_000.0;

// Extension overhead
pub const EXTENSION_MESSAGE_MARKERS: &[&str] = &["JSActorMessage", "FrameMessage"];
pub const EXTENSION_ACTOR_KEYWORDS: &[&str] = &[
    "WebExtension",
    "Conduits",
    "ExtensionContent",
    "ExtensionProcessScript",
];
pub const EXTENSION_MIN_TOTAL_MS: f64 = 100.0;
pub const EXTENSION_MIN_COUNT: usize = 50;

/// Markers within this many ms of each other on different threads form one IPC wait
pub const IPC_CLUSTER_WINDOW_MS: f64 = 10.0;

// Worker classification (matched case-insensitively against thread names)
pub const WORKER_INCLUDE_PATTERNS: &[&str] = &[
    "dom worker",
    "dedicatedworker",
    "sharedworker",
    "serviceworker",
];
pub const WORKER_GENERIC_PATTERN: &str = "worker";
pub const WORKER_EXCLUDE_PATTERNS: &[&str] = &[
    "threadpool",
    "thread pool",
    "compositortileworker",
    "compositor tile",
    "audioworklet",
    "audio worklet",
    "profiler",
    "samplerthread",
    "taskcontroller",
];

// Delimiter markers
pub const DELIMITER_MARKER_TYPES: &[&str] = &[
    "DOMEvent",
    "EventDispatch",
    "UserTiming",
    "Styles",
    "UpdateLayoutTree",
    "Reflow",
    "Paint",
    "Composite",
    "MainThreadLongTask",
    "Navigation",
    "Load",
];
pub const DELIMITER_CATEGORIES: &[&str] = &["Layout", "Graphics", "DOM", "UserTiming"];

/// Optional analysis settings loaded from a TOML file
///
/// ```toml
/// [call_tree]
/// limit = 30
/// thread = "GeckoMain"
///
/// [report]
/// min_severity = "medium"
/// format = "json"
///
/// [extensions]
/// base_urls = ["moz-extension://1234-abcd/"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub call_tree: CallTreeConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub extensions: ExtensionConfig,
}

/// Call tree defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CallTreeConfig {
    /// Number of functions and hot paths to keep
    pub limit: Option<usize>,

    /// Thread name filter (case-insensitive substring)
    pub thread: Option<String>,
}

/// Report rendering defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Hide bottlenecks below this severity
    pub min_severity: Option<Severity>,

    /// Output format when `--format` is not given
    pub format: Option<OutputFormat>,
}

/// Extension base URLs added to the ones recorded in the profile
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExtensionConfig {
    #[serde(default)]
    pub base_urls: Vec<String>,
}

/// Load analysis settings from a TOML file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidValue` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if let Some(url) = config
        .extensions
        .base_urls
        .iter()
        .find(|url| !url.contains("://"))
    {
        return Err(ConfigError::InvalidValue(format!(
            "extension base URL must include a scheme: {}",
            url
        )));
    }
    Ok(())
}
