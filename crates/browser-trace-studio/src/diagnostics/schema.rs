//! Result types of the diagnostic engine.
//!
//! Defines the structures that describe bottlenecks, thread contention and
//! parallel scaling in a profile.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered urgency of a finding (`Low < Medium < High`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth a look
    Low,
    /// Noticeable user impact
    Medium,
    /// Urgent performance issue
    High,
}

impl Severity {
    /// Points deducted from the health score for one finding
    pub fn penalty(self) -> u32 {
        match self {
            Severity::High => 20,
            Severity::Medium => 10,
            Severity::Low => 5,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(label)
    }
}

/// Kind of bottleneck a detector reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckKind {
    LongTasks,
    GcPressure,
    SyncIpc,
    LayoutThrashing,
    NetworkBlocking,
    ExtensionOverhead,
}

impl fmt::Display for BottleneckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BottleneckKind::LongTasks => "Long Tasks",
            BottleneckKind::GcPressure => "GC Pressure",
            BottleneckKind::SyncIpc => "Synchronous IPC",
            BottleneckKind::LayoutThrashing => "Layout Thrashing",
            BottleneckKind::NetworkBlocking => "Network Blocking",
            BottleneckKind::ExtensionOverhead => "Extension Overhead",
        };
        f.write_str(label)
    }
}

/// A single diagnostic finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    #[serde(rename = "type")]
    pub kind: BottleneckKind,
    pub severity: Severity,
    /// Number of markers involved
    pub count: usize,
    /// Sum of durations in ms
    pub total_duration: f64,
    /// Mean duration in ms
    pub avg_duration: f64,
    /// Longest duration in ms
    pub max_duration: f64,
    pub description: String,
    pub recommendation: String,
    /// Where the worst occurrences happened ("thread @ time (duration)")
    pub locations: Vec<String>,
}

/// All findings of a profile plus a health score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BottleneckReport {
    pub bottlenecks: Vec<Bottleneck>,
    /// 100 minus severity penalties, floored at 0
    pub score: u32,
    pub summary: String,
    pub profile_duration_ms: f64,
    /// Markers inspected by the detectors
    pub marker_count: usize,
}

/// Inputs the detectors need besides the markers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionContext {
    /// Wall-clock duration of the profile in ms
    pub profile_duration_ms: f64,
    /// Base URLs of installed extensions
    pub extension_base_urls: Vec<String>,
}

/// Kind of cross-thread contention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentionKind {
    GcPause,
    IpcWait,
}

/// Overall contention level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentionSeverity {
    Unknown,
    Minimal,
    Low,
    Medium,
    High,
}

impl fmt::Display for ContentionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentionSeverity::Unknown => "unknown",
            ContentionSeverity::Minimal => "minimal",
            ContentionSeverity::Low => "low",
            ContentionSeverity::Medium => "medium",
            ContentionSeverity::High => "high",
        };
        f.write_str(label)
    }
}

/// One moment where several threads were held up by the same cause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentionEvent {
    #[serde(rename = "type")]
    pub kind: ContentionKind,
    pub start_time: f64,
    pub duration: f64,
    /// Threads affected
    pub threads: Vec<String>,
    /// Duration multiplied by the number of affected threads
    pub impact_ms: f64,
    pub description: String,
}

/// Thread contention across a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentionAnalysis {
    pub events: Vec<ContentionEvent>,
    pub gc_contention_count: usize,
    pub ipc_contention_count: usize,
    pub total_impact_ms: f64,
    /// Impact as a percentage of the profile duration
    pub impact_percent: f64,
    pub severity: ContentionSeverity,
    pub worker_threads: Vec<String>,
    pub recommendations: Vec<String>,
}

/// What limits parallel speedup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingBottleneck {
    Serialization,
    Contention,
    Overhead,
    Minimal,
    #[serde(rename = "none")]
    NoBottleneck,
}

impl fmt::Display for ScalingBottleneck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScalingBottleneck::Serialization => "serialization",
            ScalingBottleneck::Contention => "contention",
            ScalingBottleneck::Overhead => "overhead",
            ScalingBottleneck::Minimal => "minimal",
            ScalingBottleneck::NoBottleneck => "none",
        };
        f.write_str(label)
    }
}

/// Parallel scaling efficiency of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingAnalysis {
    pub worker_count: usize,
    pub worker_threads: Vec<String>,
    pub wall_clock_ms: f64,
    /// CPU time of workers and main threads
    pub total_work_ms: f64,
    pub main_thread_work_ms: f64,
    pub worker_work_ms: f64,
    pub theoretical_speedup: f64,
    pub actual_speedup: f64,
    /// Speedup per worker in percent, capped at 100
    pub efficiency: f64,
    pub bottleneck: ScalingBottleneck,
    pub recommendations: Vec<String>,
}

/// Scaling of two profiles side by side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingComparison {
    pub baseline: ScalingAnalysis,
    pub target: ScalingAnalysis,
    pub efficiency_change_percent: f64,
    pub wall_clock_change_percent: f64,
    pub speedup_change_percent: f64,
    pub summary: String,
}
