use crate::delimiter::MeasureOptions;
use crate::diagnostics::Severity;
use crate::utils::config::{AnalysisConfig, SCHEMA_VERSION};
use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How results are printed to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored terminal report
    #[default]
    Text,
    /// Pretty JSON envelope
    Json,
}

/// Where and how a command reports its result
///
/// **Public** - built by main.rs from global flags and the config file
#[derive(Debug, Clone, Default)]
pub struct OutputSettings {
    pub format: OutputFormat,

    /// Also write the JSON envelope to this file
    pub output: Option<PathBuf>,

    pub config: AnalysisConfig,
}

impl OutputSettings {
    /// Flags win over the config file, which wins over defaults
    pub fn resolve(
        format: Option<OutputFormat>,
        output: Option<PathBuf>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            format: format.or(config.report.format).unwrap_or_default(),
            output,
            config,
        }
    }
}

/// JSON wrapper around every command result
#[derive(Debug, Clone, Serialize)]
pub struct ReportEnvelope<'a, T: Serialize> {
    pub tool_version: &'static str,
    pub schema_version: &'static str,
    /// RFC 3339 timestamp
    pub generated_at: String,
    /// Profile file(s) the result was computed from
    pub source: String,
    pub result: &'a T,
}

impl<'a, T: Serialize> ReportEnvelope<'a, T> {
    pub fn new(source: String, result: &'a T) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION"),
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            source,
            result,
        }
    }
}

/// Arguments for the bottlenecks command
#[derive(Debug, Clone)]
pub struct BottlenecksArgs {
    pub profile: PathBuf,

    /// Hide findings below this severity
    pub min_severity: Option<Severity>,
}

/// Arguments for the calltree command
#[derive(Debug, Clone)]
pub struct CallTreeArgs {
    pub profile: PathBuf,

    /// Thread name filter (case-insensitive substring)
    pub thread: Option<String>,

    /// Number of functions and hot paths to show
    pub limit: Option<usize>,
}

/// Arguments for the scaling comparison
#[derive(Debug, Clone)]
pub struct CompareScalingArgs {
    pub baseline: PathBuf,
    pub target: PathBuf,
}

/// Arguments for the markers command
#[derive(Debug, Clone)]
pub struct MarkersArgs {
    pub profile: PathBuf,
    pub category: Option<String>,
}

/// Arguments for the measure command
#[derive(Debug, Clone)]
pub struct MeasureArgs {
    pub profile: PathBuf,
    pub options: MeasureOptions,
}

/// Arguments for the measure-index command
#[derive(Debug, Clone)]
pub struct MeasureIndexArgs {
    pub profile: PathBuf,
    pub category: Option<String>,
    pub start: usize,
    pub end: usize,
}

/// Display form of a profile path for the envelope's `source`
pub fn source_label(path: &Path) -> String {
    path.display().to_string()
}
