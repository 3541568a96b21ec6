//! Convert raw marker columns into `ParsedMarker` records.
//!
//! Firefox and Chrome exports encode the same facts under different payload
//! shapes. Normalization happens here once, so the detectors downstream only
//! ever look at the canonical keys: `sync`, `url`, `type`, `eventType`,
//! `actor` and `name`.

use log::debug;
use serde_json::{Map, Value};

use super::schema::ParsedMarker;
use crate::model::{MarkerPhase, Profile, Thread};
use crate::utils::config::PAYLOAD_ALIASES;

/// Extract every marker of a thread, in table order
///
/// **Public** - main entry point of the marker extractor
///
/// Rows without any timestamp are skipped. Duration is `end - start` for
/// complete intervals and 0 otherwise.
pub fn extract_markers(profile: &Profile, thread: &Thread) -> Vec<ParsedMarker> {
    let strings = profile.strings_for(thread);
    let table = &thread.markers;

    let markers: Vec<ParsedMarker> = (0..table.len())
        .filter_map(|i| {
            let start = table.start_time.get(i).copied().flatten();
            let end = table.end_time.get(i).copied().flatten();
            let phase = table.phase.get(i).copied().and_then(MarkerPhase::from_code);
            let (start_time, duration) = marker_timing(phase, start, end)?;

            let name = strings.get(table.name[i]).to_string();
            let category = profile
                .category_name(table.category.get(i).copied())
                .to_string();
            let data = normalize_payload(table.data.get(i).and_then(Option::as_ref));
            let marker_type = data
                .get("type")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| name.clone());

            Some(ParsedMarker {
                name,
                marker_type,
                category,
                start_time,
                duration,
                thread_name: thread.name.clone(),
                data,
            })
        })
        .collect();

    debug!(
        "Extracted {} of {} markers from thread '{}'",
        markers.len(),
        table.len(),
        thread.name
    );

    markers
}

/// Extract the markers of every thread, thread by thread
pub fn extract_all_markers(profile: &Profile) -> Vec<ParsedMarker> {
    profile
        .threads
        .iter()
        .flat_map(|thread| extract_markers(profile, thread))
        .collect()
}

fn marker_timing(
    phase: Option<MarkerPhase>,
    start: Option<f64>,
    end: Option<f64>,
) -> Option<(f64, f64)> {
    match (phase, start, end) {
        (Some(MarkerPhase::Instant), Some(s), _) => Some((s, 0.0)),
        (_, Some(s), Some(e)) if e >= s => Some((s, e - s)),
        (_, Some(s), _) => Some((s, 0.0)),
        (_, None, Some(e)) => Some((e, 0.0)),
        (_, None, None) => None,
    }
}

/// Bring a raw payload into the canonical shape
///
/// * Chrome `args` / `args.data` objects are flattened into the top level
///   without overwriting existing keys; a nested `type` becomes `eventType`.
/// * Known aliases (`URI`, `isSync`, ...) are renamed to canonical keys.
/// * `"true"` / `"false"` strings under `sync` become booleans.
pub fn normalize_payload(raw: Option<&Value>) -> Map<String, Value> {
    let mut map = match raw {
        Some(Value::Object(obj)) => obj.clone(),
        _ => return Map::new(),
    };

    for container in ["args", "data"] {
        if let Some(Value::Object(nested)) = map.remove(container) {
            merge_nested(&mut map, nested);
        }
    }

    for (alias, canonical) in PAYLOAD_ALIASES {
        if map.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = map.remove(*alias) {
            map.insert(canonical.to_string(), value);
        }
    }

    if let Some(Value::String(s)) = map.get("sync") {
        if let Ok(flag) = s.to_ascii_lowercase().parse::<bool>() {
            map.insert("sync".to_string(), Value::Bool(flag));
        }
    }

    map
}

fn merge_nested(map: &mut Map<String, Value>, nested: Map<String, Value>) {
    for (key, value) in nested {
        let key = if key == "type" {
            "eventType".to_string()
        } else {
            key
        };
        map.entry(key).or_insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{profile_with, ThreadBuilder};
    use serde_json::json;

    #[test]
    fn test_extract_preserves_table_order() {
        let mut builder = ThreadBuilder::new("GeckoMain");
        builder.marker("Paint", "Graphics", 30.0, Some(35.0), None);
        builder.marker("GCMajor", "GC / CC", 10.0, Some(25.0), None);
        builder.marker("Navigation", "DOM", 5.0, None, None);
        let profile = profile_with(vec![builder.build()]);

        let markers = extract_markers(&profile, &profile.threads[0]);
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].name, "Paint");
        assert_eq!(markers[0].duration, 5.0);
        assert_eq!(markers[1].category, "GC / CC");
        assert_eq!(markers[1].duration, 15.0);
        assert_eq!(markers[2].duration, 0.0);
        assert_eq!(markers[2].thread_name, "GeckoMain");
    }

    #[test]
    fn test_unknown_category_and_type_fallback() {
        let mut builder = ThreadBuilder::new("GeckoMain");
        builder.marker("Mystery", "NotACategory", 1.0, Some(2.0), None);
        builder.marker(
            "DOMEvent",
            "DOM",
            3.0,
            Some(4.0),
            Some(json!({"type": "DOMEvent", "eventType": "click"})),
        );
        let profile = profile_with(vec![builder.build()]);

        let markers = extract_markers(&profile, &profile.threads[0]);
        assert_eq!(markers[0].category, "Unknown");
        assert_eq!(markers[0].marker_type, "Mystery");
        assert_eq!(markers[1].marker_type, "DOMEvent");
        assert_eq!(markers[1].payload_str("eventType"), Some("click"));
    }

    #[test]
    fn test_rows_without_timestamps_are_skipped() {
        let mut thread = ThreadBuilder::new("GeckoMain").build();
        thread.markers.name = vec![-1, -1];
        thread.markers.start_time = vec![None, None];
        thread.markers.end_time = vec![None, Some(8.0)];
        let profile = profile_with(vec![thread]);

        let markers = extract_markers(&profile, &profile.threads[0]);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].start_time, 8.0);
        assert_eq!(markers[0].name, "");
    }

    #[test]
    fn test_normalize_chrome_payload() {
        let raw = json!({
            "args": {"data": {"type": "click", "URL": "https://example.com"}},
            "isSync": "true"
        });
        let map = normalize_payload(Some(&raw));

        assert_eq!(map.get("eventType"), Some(&json!("click")));
        assert_eq!(map.get("url"), Some(&json!("https://example.com")));
        assert_eq!(map.get("sync"), Some(&json!(true)));
        assert!(!map.contains_key("args"));
    }

    #[test]
    fn test_normalize_keeps_existing_keys() {
        let raw = json!({
            "type": "IPC",
            "url": "top",
            "data": {"type": "inner", "url": "nested"}
        });
        let map = normalize_payload(Some(&raw));

        assert_eq!(map.get("type"), Some(&json!("IPC")));
        assert_eq!(map.get("url"), Some(&json!("top")));
        assert_eq!(map.get("eventType"), Some(&json!("inner")));
    }

    #[test]
    fn test_normalize_non_object_payload() {
        assert!(normalize_payload(None).is_empty());
        assert!(normalize_payload(Some(&json!(42))).is_empty());
    }
}
