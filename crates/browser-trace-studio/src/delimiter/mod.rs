//! Operation timing between delimiter markers.
//!
//! A delimiter marker is a marker that can bound a user-visible operation:
//! DOM events, user timings, style/layout/paint passes, navigations. This
//! module lists them and measures the time between a start and an end marker
//! selected by `"Type"` / `"Type:subtype"` patterns or by index.
//!
//! # Example
//! ```ignore
//! use browser_trace_studio::delimiter::measure_operation;
//!
//! let m = measure_operation(&profile, "DOMEvent:click", "Paint")?;
//! println!("click to paint: {:.1}ms", m.duration_ms);
//! ```

mod markers;
mod measure;
mod pattern;

pub use markers::{get_delimiter_markers, is_delimiter_marker, DelimiterMarker};
pub use measure::{
    measure_by_index, measure_operation, measure_operation_advanced, MeasureOptions,
    OperationMeasurement,
};
pub use pattern::MarkerPattern;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DelimiterError {
    #[error("no delimiter markers found")]
    NoDelimiterMarkers,

    #[error("start pattern not found: {0}")]
    StartNotFound(String),

    #[error("end pattern not found: {0}")]
    EndNotFound(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("marker index {index} out of range ({len} delimiter markers)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("end index {end} must be greater than start index {start}")]
    InvalidRange { start: usize, end: usize },
}

#[cfg(test)]
mod tests;
