//! Delimiter marker selection.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::markers::{extract_all_markers, ParsedMarker};
use crate::model::Profile;
use crate::utils::config::{DELIMITER_CATEGORIES, DELIMITER_MARKER_TYPES};

/// A marker eligible as a measurement boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelimiterMarker {
    /// Position in the time-sorted delimiter list
    pub index: usize,
    #[serde(flatten)]
    pub marker: ParsedMarker,
}

/// Whether a marker can start or end a measured operation
pub fn is_delimiter_marker(marker: &ParsedMarker) -> bool {
    DELIMITER_MARKER_TYPES
        .iter()
        .any(|t| *t == marker.marker_type || *t == marker.name)
        || DELIMITER_CATEGORIES.contains(&marker.category.as_str())
}

/// Delimiter markers of all threads, sorted by start time
///
/// **Public** - index space used by `measure_by_index`
///
/// Markers with equal start times keep their extraction order. The optional
/// category filter is compared case-insensitively.
pub fn get_delimiter_markers(
    profile: &Profile,
    category_filter: Option<&str>,
) -> Vec<DelimiterMarker> {
    let category_filter = category_filter.map(str::trim).filter(|c| !c.is_empty());

    let mut markers: Vec<ParsedMarker> = extract_all_markers(profile)
        .into_iter()
        .filter(is_delimiter_marker)
        .filter(|m| category_filter.map_or(true, |c| m.category.eq_ignore_ascii_case(c)))
        .collect();
    markers.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    debug!("Found {} delimiter markers", markers.len());

    markers
        .into_iter()
        .enumerate()
        .map(|(index, marker)| DelimiterMarker { index, marker })
        .collect()
}
