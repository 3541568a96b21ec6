//! `"Type"` / `"Type:subtype"` marker patterns.

use serde_json::Value;

use super::DelimiterError;
use crate::markers::ParsedMarker;

/// Subtype checks, tried in order; the first hit wins
const SUBTYPE_CHECKS: &[fn(&ParsedMarker, &str) -> bool] = &[
    payload_type_equals,
    event_type_equals,
    name_contains,
    payload_name_contains,
];

/// Parsed start or end pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPattern {
    /// Marker type or name, compared case-insensitively
    pub kind: String,
    /// Optional refinement, lowercased
    pub subtype: Option<String>,
}

impl MarkerPattern {
    pub fn parse(pattern: &str) -> Result<Self, DelimiterError> {
        let (kind, subtype) = match pattern.split_once(':') {
            Some((kind, subtype)) => (kind.trim(), Some(subtype.trim())),
            None => (pattern.trim(), None),
        };
        if kind.is_empty() {
            return Err(DelimiterError::InvalidPattern(pattern.to_string()));
        }

        Ok(Self {
            kind: kind.to_string(),
            subtype: subtype
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
        })
    }

    pub fn matches(&self, marker: &ParsedMarker) -> bool {
        let kind_matches = marker.marker_type.eq_ignore_ascii_case(&self.kind)
            || marker.name.eq_ignore_ascii_case(&self.kind);
        if !kind_matches {
            return false;
        }

        match &self.subtype {
            None => true,
            Some(subtype) => SUBTYPE_CHECKS.iter().any(|check| check(marker, subtype)),
        }
    }
}

fn payload_field_lowercase(marker: &ParsedMarker, key: &str) -> Option<String> {
    marker
        .data
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_lowercase)
}

fn payload_type_equals(marker: &ParsedMarker, subtype: &str) -> bool {
    payload_field_lowercase(marker, "type").is_some_and(|v| v == subtype)
}

fn event_type_equals(marker: &ParsedMarker, subtype: &str) -> bool {
    payload_field_lowercase(marker, "eventType").is_some_and(|v| v == subtype)
}

fn name_contains(marker: &ParsedMarker, subtype: &str) -> bool {
    marker.name.to_lowercase().contains(subtype)
}

fn payload_name_contains(marker: &ParsedMarker, subtype: &str) -> bool {
    payload_field_lowercase(marker, "name").is_some_and(|v| v.contains(subtype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{marker, with_data};
    use serde_json::json;

    #[test]
    fn test_parse() {
        let pattern = MarkerPattern::parse("DOMEvent:Click").unwrap();
        assert_eq!(pattern.kind, "DOMEvent");
        assert_eq!(pattern.subtype.as_deref(), Some("click"));

        let pattern = MarkerPattern::parse(" Paint ").unwrap();
        assert_eq!(pattern.kind, "Paint");
        assert_eq!(pattern.subtype, None);

        assert_eq!(MarkerPattern::parse("Paint:").unwrap().subtype, None);
    }

    #[test]
    fn test_empty_type_is_invalid() {
        assert_eq!(
            MarkerPattern::parse(":click"),
            Err(DelimiterError::InvalidPattern(":click".to_string()))
        );
        assert!(MarkerPattern::parse("").is_err());
    }

    #[test]
    fn test_kind_is_case_insensitive_on_type_or_name() {
        let m = with_data(marker("Reflow", "Layout", 0.0, 1.0), json!({"type": "Styles"}));
        assert!(MarkerPattern::parse("styles").unwrap().matches(&m));
        assert!(MarkerPattern::parse("REFLOW").unwrap().matches(&m));
        assert!(!MarkerPattern::parse("Paint").unwrap().matches(&m));
    }

    #[test]
    fn test_subtype_candidates() {
        let click = with_data(
            marker("DOMEvent", "DOM", 0.0, 1.0),
            json!({"type": "DOMEvent", "eventType": "click"}),
        );
        assert!(MarkerPattern::parse("DOMEvent:click").unwrap().matches(&click));
        assert!(!MarkerPattern::parse("DOMEvent:hover").unwrap().matches(&click));

        let timing = with_data(
            marker("UserTiming", "UserTiming", 0.0, 1.0),
            json!({"name": "app-render-start"}),
        );
        assert!(MarkerPattern::parse("UserTiming:render").unwrap().matches(&timing));

        let named = marker("Load 12: https://example.com", "Network", 0.0, 1.0);
        let pattern = MarkerPattern {
            kind: "Load 12: https://example.com".to_string(),
            subtype: Some("example".to_string()),
        };
        assert!(pattern.matches(&named));
    }
}
