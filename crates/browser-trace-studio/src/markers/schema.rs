//! Normalized marker record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A marker after category resolution and payload normalization
///
/// Derived from the raw marker table on every call; never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedMarker {
    /// Marker name, e.g. "GCMajor" or "DOMEvent"
    pub name: String,

    /// Payload `type`, falling back to the name
    #[serde(rename = "type")]
    pub marker_type: String,

    /// Resolved category name, "Unknown" when unresolvable
    pub category: String,

    /// Start time in ms (profile-relative)
    pub start_time: f64,

    /// Duration in ms; 0 for instant markers
    pub duration: f64,

    /// Name of the thread the marker was recorded on
    pub thread_name: String,

    /// Normalized payload
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl ParsedMarker {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// String payload field
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Boolean payload field
    pub fn payload_bool(&self, key: &str) -> Option<bool> {
        self.data.get(key).and_then(Value::as_bool)
    }

    /// Whether the payload explicitly flags the marker as synchronous
    pub fn is_flagged_sync(&self) -> bool {
        self.payload_bool("sync").unwrap_or(false)
    }
}
