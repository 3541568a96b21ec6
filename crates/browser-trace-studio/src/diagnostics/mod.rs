//! Performance diagnostics.
//!
//! This module inspects a profile's markers and samples and reports:
//! - Bottlenecks from six independent detectors, with a health score
//! - Contention between threads (GC pauses, simultaneous sync IPC)
//! - Parallel scaling efficiency of worker threads
//!
//! # Example
//! ```ignore
//! use browser_trace_studio::diagnostics::{detect_bottlenecks, filter_by_severity, Severity};
//! use browser_trace_studio::output::json::read_profile;
//!
//! let profile = read_profile("profile.json")?;
//! let report = detect_bottlenecks(&profile);
//! let urgent = filter_by_severity(&report.bottlenecks, Severity::High);
//! ```

mod analyzer;
mod contention;
pub mod detectors;
mod output;
mod scaling;
mod schema;

// Public API exports
pub use analyzer::{
    calculate_score, detect_bottlenecks, detect_bottlenecks_with_context, filter_by_severity,
    generate_summary, run_detectors,
};
pub use contention::analyze_contention;
pub use output::{
    render_bottleneck_report, render_contention, render_scaling, render_scaling_comparison,
};
pub use scaling::{
    analyze_scaling, compare_scaling, compare_scaling_analyses, is_worker_thread, safe_percentage,
};
pub use schema::{
    Bottleneck, BottleneckKind, BottleneckReport, ContentionAnalysis, ContentionEvent,
    ContentionKind, ContentionSeverity, DetectionContext, ScalingAnalysis, ScalingBottleneck,
    ScalingComparison, Severity,
};
