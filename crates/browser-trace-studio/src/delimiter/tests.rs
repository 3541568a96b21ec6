//! Delimiter matching over fixture profiles.

use super::*;
use crate::model::test_support::{profile_with, ThreadBuilder};
use crate::model::Profile;
use serde_json::json;

/// click @10, Styles @20, Paint @30, click @40, Paint @60 (2ms), Paint @90
fn interaction_profile() -> Profile {
    let mut main = ThreadBuilder::new("GeckoMain").main();
    main.marker(
        "DOMEvent",
        "DOM",
        10.0,
        Some(11.0),
        Some(json!({"type": "DOMEvent", "eventType": "click"})),
    );
    main.marker("Styles", "Layout", 20.0, Some(21.0), None);
    main.marker("Paint", "Graphics", 30.0, Some(30.5), None);
    main.marker(
        "DOMEvent",
        "DOM",
        40.0,
        Some(41.0),
        Some(json!({"type": "DOMEvent", "eventType": "keydown"})),
    );
    main.marker("Paint", "Graphics", 60.0, Some(62.0), None);
    main.marker("Paint", "Graphics", 90.0, Some(90.5), None);
    main.marker("GCMinor", "GC / CC", 50.0, Some(55.0), None);
    profile_with(vec![main.build()])
}

#[test]
fn test_click_to_first_paint() {
    let profile = interaction_profile();
    let m = measure_operation(&profile, "DOMEvent:click", "Paint").unwrap();

    assert_eq!(m.start_marker.index, 0);
    assert_eq!(m.end_marker.index, 2);
    assert_eq!(m.duration_ms, 20.0);
}

#[test]
fn test_subtype_must_match() {
    let profile = interaction_profile();
    assert_eq!(
        measure_operation(&profile, "DOMEvent:hover", "Paint"),
        Err(DelimiterError::StartNotFound("DOMEvent:hover".to_string()))
    );
    assert_eq!(
        measure_operation(&profile, "DOMEvent:click", "Composite"),
        Err(DelimiterError::EndNotFound("Composite".to_string()))
    );
}

#[test]
fn test_find_last_never_ends_earlier() {
    let profile = interaction_profile();
    let first = measure_operation(&profile, "DOMEvent:click", "Paint").unwrap();

    let opts = MeasureOptions {
        find_last: true,
        ..MeasureOptions::new("DOMEvent:click", "Paint")
    };
    let last = measure_operation_advanced(&profile, &opts).unwrap();

    assert_eq!(last.end_marker.marker.start_time, 90.0);
    assert!(last.duration_ms >= first.duration_ms);
}

#[test]
fn test_advanced_filters() {
    let profile = interaction_profile();

    let opts = MeasureOptions {
        start_after_ms: Some(15.0),
        end_min_duration_ms: 1.5,
        ..MeasureOptions::new("DOMEvent", "Paint")
    };
    let m = measure_operation_advanced(&profile, &opts).unwrap();
    assert_eq!(m.start_marker.marker.start_time, 40.0);
    assert_eq!(m.end_marker.marker.start_time, 60.0);

    let opts = MeasureOptions {
        end_before_ms: Some(25.0),
        ..MeasureOptions::new("DOMEvent:click", "Paint")
    };
    assert!(matches!(
        measure_operation_advanced(&profile, &opts),
        Err(DelimiterError::EndNotFound(_))
    ));
}

#[test]
fn test_end_must_follow_start() {
    let profile = interaction_profile();
    assert!(matches!(
        measure_operation(&profile, "Paint", "DOMEvent:click"),
        Err(DelimiterError::EndNotFound(_))
    ));
}

#[test]
fn test_category_filter_restricts_index_space() {
    let profile = interaction_profile();
    let opts = MeasureOptions {
        category_filter: Some("Graphics".to_string()),
        ..MeasureOptions::new("Paint", "Paint")
    };
    let m = measure_operation_advanced(&profile, &opts).unwrap();
    assert_eq!(m.start_marker.index, 0);
    assert_eq!(m.end_marker.index, 1);
    assert_eq!(m.duration_ms, 30.0);
}

#[test]
fn test_invalid_pattern() {
    let profile = interaction_profile();
    assert_eq!(
        measure_operation(&profile, ":click", "Paint"),
        Err(DelimiterError::InvalidPattern(":click".to_string()))
    );
}

#[test]
fn test_no_delimiter_markers() {
    let mut main = ThreadBuilder::new("GeckoMain").main();
    main.marker("GCMajor", "GC / CC", 0.0, Some(10.0), None);
    let profile = profile_with(vec![main.build()]);

    assert!(get_delimiter_markers(&profile, None).is_empty());
    let err = measure_operation(&profile, "DOMEvent", "Paint").unwrap_err();
    assert_eq!(err, DelimiterError::NoDelimiterMarkers);
    assert_eq!(err.to_string(), "no delimiter markers found");
    assert_eq!(
        measure_by_index(&profile, None, 0, 1),
        Err(DelimiterError::NoDelimiterMarkers)
    );
}

#[test]
fn test_measure_by_index() {
    let profile = interaction_profile();

    let m = measure_by_index(&profile, None, 1, 4).unwrap();
    assert_eq!(m.start_marker.marker.name, "Styles");
    assert_eq!(m.end_marker.marker.name, "Paint");
    assert_eq!(m.duration_ms, 40.0);

    assert_eq!(
        measure_by_index(&profile, None, 0, 6),
        Err(DelimiterError::IndexOutOfRange { index: 6, len: 6 })
    );
    assert_eq!(
        measure_by_index(&profile, None, 3, 3),
        Err(DelimiterError::InvalidRange { start: 3, end: 3 })
    );
}

#[test]
fn test_measurement_serializes_flat_markers() {
    let profile = interaction_profile();
    let m = measure_operation(&profile, "DOMEvent:click", "Paint").unwrap();
    let value = serde_json::to_value(&m).unwrap();

    assert_eq!(value["start_marker"]["index"], 0);
    assert_eq!(value["start_marker"]["name"], "DOMEvent");
    assert_eq!(value["start_marker"]["data"]["eventType"], "click");
    assert_eq!(value["duration_ms"], 20.0);
}
