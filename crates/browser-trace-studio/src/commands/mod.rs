//! CLI command implementations.
//!
//! Each command reads a profile, runs one analysis and reports the result
//! as colored text or a JSON envelope.

pub mod calltree;
pub mod diagnose;
mod emit;
pub mod measure;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use calltree::execute_calltree;
pub use diagnose::{
    execute_bottlenecks, execute_compare_scaling, execute_contention, execute_scaling,
};
pub use emit::emit;
pub use measure::{execute_markers, execute_measure, execute_measure_index};
pub use models::{
    BottlenecksArgs, CallTreeArgs, CompareScalingArgs, MarkersArgs, MeasureArgs, MeasureIndexArgs,
    OutputFormat, OutputSettings, ReportEnvelope,
};
pub use utils::display_version;
