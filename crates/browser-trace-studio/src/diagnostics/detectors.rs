//! Bottleneck detectors.
//!
//! Each detector is an independent pure function over the normalized markers
//! of a profile. A detector returns `None` when it has nothing to report;
//! one detector finding nothing never affects another.

use crate::markers::ParsedMarker;
use crate::utils::config::*;

use super::schema::{Bottleneck, BottleneckKind, DetectionContext, Severity};

/// Signature shared by all detectors
pub type Detector = fn(&[ParsedMarker], &DetectionContext) -> Option<Bottleneck>;

/// Every detector, in reporting order
pub const DETECTORS: &[Detector] = &[
    detect_long_tasks,
    detect_gc_pressure,
    detect_sync_ipc,
    detect_layout_thrashing,
    detect_network_blocking,
    detect_extension_overhead,
];

/// Number of worst occurrences listed in `Bottleneck::locations`
const MAX_LOCATIONS: usize = 5;

/// Main-thread tasks longer than 50ms
pub fn detect_long_tasks(markers: &[ParsedMarker], _ctx: &DetectionContext) -> Option<Bottleneck> {
    let tasks: Vec<&ParsedMarker> = markers
        .iter()
        .filter(|m| {
            m.name == LONG_TASK_MARKER
                && m.duration > LONG_TASK_MIN_MS
                && m.duration < LONG_TASK_MAX_MS
        })
        .collect();
    if tasks.is_empty() {
        return None;
    }

    let stats = DurationStats::of(&tasks);
    let severity = if stats.count > 10 || stats.max > 200.0 {
        Severity::High
    } else if stats.count > 5 || stats.max > 100.0 {
        Severity::Medium
    } else {
        Severity::Low
    };

    Some(build_finding(
        BottleneckKind::LongTasks,
        severity,
        &tasks,
        format!(
            "{} long tasks blocked the main thread for {:.1}ms in total (longest {:.1}ms)",
            stats.count, stats.total, stats.max
        ),
        "Break long-running JavaScript into smaller chunks (scheduler.yield, requestIdleCallback) and move heavy work off the main thread.",
    ))
}

/// Whether a marker is a garbage collection or cycle collection event
pub fn is_gc_marker(marker: &ParsedMarker) -> bool {
    (marker.name.starts_with("GC")
        || marker.name.starts_with("V8.GC")
        || marker.category == GC_CATEGORY)
        && marker.duration > 0.0
        && marker.duration < GC_MAX_MS
}

/// Frequent or long garbage collections
///
/// Low-severity findings with less than 500ms of total GC time are noise and
/// are not reported.
pub fn detect_gc_pressure(markers: &[ParsedMarker], ctx: &DetectionContext) -> Option<Bottleneck> {
    let events: Vec<&ParsedMarker> = markers.iter().filter(|m| is_gc_marker(m)).collect();
    if events.is_empty() {
        return None;
    }

    let stats = DurationStats::of(&events);
    let duration_sec = ctx.profile_duration_ms / 1000.0;
    let rate = if duration_sec > 0.0 {
        stats.count as f64 / duration_sec
    } else {
        0.0
    };

    let severity = if rate > 4.0 || stats.max > 200.0 {
        Severity::High
    } else if rate > 2.0 || stats.max > 100.0 {
        Severity::Medium
    } else {
        Severity::Low
    };

    if severity == Severity::Low && stats.total < GC_SUPPRESS_BELOW_TOTAL_MS {
        return None;
    }

    Some(build_finding(
        BottleneckKind::GcPressure,
        severity,
        &events,
        format!(
            "{} garbage collections ({:.1}/s) took {:.1}ms in total (longest {:.1}ms)",
            stats.count, rate, stats.total, stats.max
        ),
        "Reduce allocation churn: reuse objects and buffers, avoid short-lived closures in hot loops and check for caches that grow without bound.",
    ))
}

/// Whether a marker is an IPC call that blocked its thread
pub fn is_sync_ipc_marker(marker: &ParsedMarker) -> bool {
    marker.category == IPC_CATEGORY
        && marker.duration > 0.0
        && marker.duration < IPC_MAX_MS
        && (marker.is_flagged_sync() || marker.duration > IPC_IMPLICIT_SYNC_MS)
}

/// Synchronous inter-process calls
pub fn detect_sync_ipc(markers: &[ParsedMarker], _ctx: &DetectionContext) -> Option<Bottleneck> {
    let calls: Vec<&ParsedMarker> = markers.iter().filter(|m| is_sync_ipc_marker(m)).collect();
    if calls.is_empty() {
        return None;
    }

    let stats = DurationStats::of(&calls);
    let severity = if stats.count > 20 || stats.total > 500.0 {
        Severity::High
    } else if stats.count > 10 || stats.total > 200.0 {
        Severity::Medium
    } else {
        Severity::Low
    };

    Some(build_finding(
        BottleneckKind::SyncIpc,
        severity,
        &calls,
        format!(
            "{} synchronous IPC calls blocked for {:.1}ms in total (longest {:.1}ms)",
            stats.count, stats.total, stats.max
        ),
        "Replace synchronous IPC with asynchronous messages and batch cross-process requests.",
    ))
}

fn is_layout_marker(marker: &ParsedMarker) -> bool {
    (marker.category == LAYOUT_CATEGORY
        || marker.name == "Styles"
        || marker.name.contains("Reflow"))
        && marker.duration > 0.0
        && marker.duration < LAYOUT_MAX_MS
}

/// Style and layout recalculations in rapid succession
///
/// A "rapid pair" is two consecutive layout markers (by start time) whose
/// starts are at most 100ms apart. At least five pairs are required.
pub fn detect_layout_thrashing(
    markers: &[ParsedMarker],
    _ctx: &DetectionContext,
) -> Option<Bottleneck> {
    let mut layouts: Vec<&ParsedMarker> = markers.iter().filter(|m| is_layout_marker(m)).collect();
    if layouts.len() < 2 {
        return None;
    }
    layouts.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let rapid_pairs = layouts
        .windows(2)
        .filter(|pair| pair[1].start_time - pair[0].start_time <= LAYOUT_RAPID_GAP_MS)
        .count();
    if rapid_pairs < LAYOUT_MIN_RAPID_PAIRS {
        return None;
    }

    let stats = DurationStats::of(&layouts);
    let severity = if rapid_pairs > 50 || stats.total > 1000.0 {
        Severity::High
    } else if rapid_pairs > 20 || stats.total > 500.0 {
        Severity::Medium
    } else {
        Severity::Low
    };

    Some(build_finding(
        BottleneckKind::LayoutThrashing,
        severity,
        &layouts,
        format!(
            "{} back-to-back style/layout recalculations ({} in total, {:.1}ms) suggest forced synchronous layout",
            rapid_pairs, stats.count, stats.total
        ),
        "Batch DOM reads before writes and avoid reading layout properties (offsetHeight, getBoundingClientRect) right after changing styles.",
    ))
}

/// Network requests that took longer than a second
pub fn detect_network_blocking(
    markers: &[ParsedMarker],
    _ctx: &DetectionContext,
) -> Option<Bottleneck> {
    let requests: Vec<&ParsedMarker> = markers
        .iter()
        .filter(|m| {
            (m.category == NETWORK_CATEGORY || NETWORK_MARKER_NAMES.contains(&m.name.as_str()))
                && m.duration > NETWORK_MIN_MS
                && m.duration < NETWORK_MAX_MS
        })
        .collect();
    if requests.is_empty() {
        return None;
    }

    let stats = DurationStats::of(&requests);
    let severity = if stats.count > 5 || stats.max > 5000.0 {
        Severity::Medium
    } else {
        Severity::Low
    };

    Some(build_finding(
        BottleneckKind::NetworkBlocking,
        severity,
        &requests,
        format!(
            "{} network requests took longer than 1s (longest {:.1}ms)",
            stats.count, stats.max
        ),
        "Defer or lazy-load slow resources, enable caching and preconnect to critical origins.",
    ))
}

/// Whether a marker was caused by a browser extension
pub fn is_extension_marker(marker: &ParsedMarker, base_urls: &[String]) -> bool {
    if let Some(url) = marker.payload_str("url") {
        if base_urls
            .iter()
            .any(|base| !base.is_empty() && url.starts_with(base.as_str()))
        {
            return true;
        }
    }

    if EXTENSION_MESSAGE_MARKERS.contains(&marker.name.as_str()) {
        return ["actor", "name"]
            .iter()
            .filter_map(|key| marker.payload_str(key))
            .any(|value| EXTENSION_ACTOR_KEYWORDS.iter().any(|kw| value.contains(kw)));
    }

    false
}

/// Work attributed to installed extensions
pub fn detect_extension_overhead(
    markers: &[ParsedMarker],
    ctx: &DetectionContext,
) -> Option<Bottleneck> {
    let events: Vec<&ParsedMarker> = markers
        .iter()
        .filter(|m| is_extension_marker(m, &ctx.extension_base_urls))
        .collect();
    if events.is_empty() {
        return None;
    }

    let stats = DurationStats::of(&events);
    if stats.total < EXTENSION_MIN_TOTAL_MS && stats.count < EXTENSION_MIN_COUNT {
        return None;
    }
    let severity = if stats.total > 1000.0 {
        Severity::Medium
    } else {
        Severity::Low
    };

    Some(build_finding(
        BottleneckKind::ExtensionOverhead,
        severity,
        &events,
        format!(
            "{} extension events consumed {:.1}ms",
            stats.count, stats.total
        ),
        "Profile with extensions disabled to confirm their cost, then remove or replace the expensive ones.",
    ))
}

/// Count, sum, mean and maximum of marker durations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationStats {
    pub count: usize,
    pub total: f64,
    pub avg: f64,
    pub max: f64,
}

impl DurationStats {
    pub fn of(markers: &[&ParsedMarker]) -> Self {
        let count = markers.len();
        let total: f64 = markers.iter().map(|m| m.duration).sum();
        let max = markers.iter().map(|m| m.duration).fold(0.0, f64::max);
        let avg = if count > 0 { total / count as f64 } else { 0.0 };
        Self {
            count,
            total,
            avg,
            max,
        }
    }
}

fn build_finding(
    kind: BottleneckKind,
    severity: Severity,
    markers: &[&ParsedMarker],
    description: String,
    recommendation: &str,
) -> Bottleneck {
    let stats = DurationStats::of(markers);
    Bottleneck {
        kind,
        severity,
        count: stats.count,
        total_duration: stats.total,
        avg_duration: stats.avg,
        max_duration: stats.max,
        description,
        recommendation: recommendation.to_string(),
        locations: top_locations(markers),
    }
}

fn top_locations(markers: &[&ParsedMarker]) -> Vec<String> {
    let mut worst: Vec<&ParsedMarker> = markers.to_vec();
    worst.sort_by(|a, b| {
        b.duration
            .total_cmp(&a.duration)
            .then_with(|| a.start_time.total_cmp(&b.start_time))
    });
    worst
        .into_iter()
        .take(MAX_LOCATIONS)
        .map(|m| {
            format!(
                "{} @ {:.1}ms ({:.1}ms)",
                m.thread_name, m.start_time, m.duration
            )
        })
        .collect()
}
