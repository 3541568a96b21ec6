//! Pure filter helpers over marker slices.

use super::schema::ParsedMarker;

/// Markers whose type equals `marker_type`
pub fn by_type<'a>(markers: &'a [ParsedMarker], marker_type: &str) -> Vec<&'a ParsedMarker> {
    markers
        .iter()
        .filter(|m| m.marker_type == marker_type)
        .collect()
}

/// Markers whose category equals `category`
pub fn by_category<'a>(markers: &'a [ParsedMarker], category: &str) -> Vec<&'a ParsedMarker> {
    markers.iter().filter(|m| m.category == category).collect()
}

/// Markers with `min_ms <= duration`, and `duration <= max_ms` when a maximum is given
pub fn by_duration(
    markers: &[ParsedMarker],
    min_ms: f64,
    max_ms: Option<f64>,
) -> Vec<&ParsedMarker> {
    markers
        .iter()
        .filter(|m| m.duration >= min_ms && max_ms.map_or(true, |max| m.duration <= max))
        .collect()
}

/// Markers whose name contains `needle`
pub fn by_name<'a>(markers: &'a [ParsedMarker], needle: &str) -> Vec<&'a ParsedMarker> {
    markers.iter().filter(|m| m.name.contains(needle)).collect()
}
