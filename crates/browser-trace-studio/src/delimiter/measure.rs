//! Measure the time between two delimiter markers.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::markers::{get_delimiter_markers, DelimiterMarker};
use super::pattern::MarkerPattern;
use super::DelimiterError;
use crate::model::Profile;

/// Selection rules for a pattern-based measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureOptions {
    pub start_pattern: String,
    pub end_pattern: String,
    /// Ignore start candidates before this time (ms)
    pub start_after_ms: Option<f64>,
    /// Ignore end candidates after this time (ms)
    pub end_before_ms: Option<f64>,
    pub start_min_duration_ms: f64,
    pub end_min_duration_ms: f64,
    /// Use the last matching end marker instead of the first
    pub find_last: bool,
    /// Only consider delimiter markers of this category
    pub category_filter: Option<String>,
}

impl MeasureOptions {
    pub fn new(start_pattern: impl Into<String>, end_pattern: impl Into<String>) -> Self {
        Self {
            start_pattern: start_pattern.into(),
            end_pattern: end_pattern.into(),
            ..Self::default()
        }
    }
}

/// Time between a start and an end marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationMeasurement {
    pub start_marker: DelimiterMarker,
    pub end_marker: DelimiterMarker,
    /// End marker start time minus start marker start time
    pub duration_ms: f64,
}

impl OperationMeasurement {
    fn between(start_marker: DelimiterMarker, end_marker: DelimiterMarker) -> Self {
        let duration_ms = end_marker.marker.start_time - start_marker.marker.start_time;
        Self {
            start_marker,
            end_marker,
            duration_ms,
        }
    }
}

/// Measure between the first start match and the following end match
///
/// **Public** - shortcut for [`measure_operation_advanced`] with default options
pub fn measure_operation(
    profile: &Profile,
    start_pattern: &str,
    end_pattern: &str,
) -> Result<OperationMeasurement, DelimiterError> {
    measure_operation_advanced(profile, &MeasureOptions::new(start_pattern, end_pattern))
}

/// Measure an operation delimited by two marker patterns
///
/// The start marker is the first delimiter marker at or after
/// `start_after_ms`, at least `start_min_duration_ms` long, that matches the
/// start pattern. End candidates come strictly after the start marker in
/// sorted order, no later than `end_before_ms` and at least
/// `end_min_duration_ms` long.
///
/// # Errors
/// * `DelimiterError::NoDelimiterMarkers` - Profile has no eligible markers
/// * `DelimiterError::InvalidPattern` - A pattern has an empty type
/// * `DelimiterError::StartNotFound` / `EndNotFound` - No marker matched
pub fn measure_operation_advanced(
    profile: &Profile,
    opts: &MeasureOptions,
) -> Result<OperationMeasurement, DelimiterError> {
    let markers = get_delimiter_markers(profile, opts.category_filter.as_deref());
    if markers.is_empty() {
        return Err(DelimiterError::NoDelimiterMarkers);
    }

    let start_pattern = MarkerPattern::parse(&opts.start_pattern)?;
    let end_pattern = MarkerPattern::parse(&opts.end_pattern)?;

    debug!(
        "Measuring '{}' -> '{}' over {} delimiter markers",
        opts.start_pattern,
        opts.end_pattern,
        markers.len()
    );

    let start_pos = markers
        .iter()
        .position(|m| {
            opts.start_after_ms.map_or(true, |t| m.marker.start_time >= t)
                && m.marker.duration >= opts.start_min_duration_ms
                && start_pattern.matches(&m.marker)
        })
        .ok_or_else(|| DelimiterError::StartNotFound(opts.start_pattern.clone()))?;

    let mut end_candidates = markers[start_pos + 1..].iter().filter(|m| {
        opts.end_before_ms.map_or(true, |t| m.marker.start_time <= t)
            && m.marker.duration >= opts.end_min_duration_ms
            && end_pattern.matches(&m.marker)
    });
    let end_match = if opts.find_last {
        end_candidates.last()
    } else {
        end_candidates.next()
    };
    let end_marker =
        end_match.ok_or_else(|| DelimiterError::EndNotFound(opts.end_pattern.clone()))?;

    let measurement = OperationMeasurement::between(markers[start_pos].clone(), end_marker.clone());
    info!(
        "Measured {:.1}ms between markers #{} and #{}",
        measurement.duration_ms, measurement.start_marker.index, measurement.end_marker.index
    );
    Ok(measurement)
}

/// Measure between two markers of the delimiter list by index
///
/// # Errors
/// * `DelimiterError::NoDelimiterMarkers` - Profile has no eligible markers
/// * `DelimiterError::IndexOutOfRange` - An index is past the end of the list
/// * `DelimiterError::InvalidRange` - `end_index` is not after `start_index`
pub fn measure_by_index(
    profile: &Profile,
    category_filter: Option<&str>,
    start_index: usize,
    end_index: usize,
) -> Result<OperationMeasurement, DelimiterError> {
    let markers = get_delimiter_markers(profile, category_filter);
    if markers.is_empty() {
        return Err(DelimiterError::NoDelimiterMarkers);
    }

    for index in [start_index, end_index] {
        if index >= markers.len() {
            return Err(DelimiterError::IndexOutOfRange {
                index,
                len: markers.len(),
            });
        }
    }
    if end_index <= start_index {
        return Err(DelimiterError::InvalidRange {
            start: start_index,
            end: end_index,
        });
    }

    Ok(OperationMeasurement::between(
        markers[start_index].clone(),
        markers[end_index].clone(),
    ))
}
