//! Cross-thread contention analysis.
//!
//! Finds moments where several threads were held up at once: garbage
//! collections that overlap active worker threads, and clusters of
//! synchronous IPC calls issued from different threads within a short window.

use log::debug;

use super::detectors::{is_gc_marker, is_sync_ipc_marker};
use super::scaling::is_worker_thread;
use super::schema::{ContentionAnalysis, ContentionEvent, ContentionKind, ContentionSeverity};
use crate::markers::{extract_all_markers, ParsedMarker};
use crate::model::{Profile, Thread};
use crate::utils::config::IPC_CLUSTER_WINDOW_MS;

/// Time a worker thread was busy, `[start, end]` in ms
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveInterval {
    start: f64,
    end: f64,
}

impl ActiveInterval {
    fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start < end && self.end > start
    }
}

struct WorkerActivity<'a> {
    name: &'a str,
    intervals: Vec<ActiveInterval>,
}

/// Analyze contention between threads
///
/// **Public** - entry point of the contention analyzer
pub fn analyze_contention(profile: &Profile) -> ContentionAnalysis {
    let workers: Vec<WorkerActivity> = profile
        .threads
        .iter()
        .filter(|t| is_worker_thread(t))
        .map(|t| WorkerActivity {
            name: &t.name,
            intervals: active_intervals(profile, t),
        })
        .collect();
    let markers = extract_all_markers(profile);

    debug!(
        "Analyzing contention: {} worker thread(s), {} markers",
        workers.len(),
        markers.len()
    );

    let mut events = gc_contention(&markers, &workers);
    let gc_contention_count = events.len();
    events.extend(ipc_contention(&markers));
    let ipc_contention_count = events.len() - gc_contention_count;

    let total_impact_ms: f64 = events.iter().map(|e| e.impact_ms).sum();
    let duration_ms = profile.duration_ms();
    let impact_percent = if duration_ms > 0.0 {
        total_impact_ms / duration_ms * 100.0
    } else {
        0.0
    };
    let severity = contention_severity(duration_ms, impact_percent);

    let recommendations = recommend(
        gc_contention_count,
        ipc_contention_count,
        total_impact_ms,
        severity,
    );

    ContentionAnalysis {
        events,
        gc_contention_count,
        ipc_contention_count,
        total_impact_ms,
        impact_percent,
        severity,
        worker_threads: workers.iter().map(|w| w.name.to_string()).collect(),
        recommendations,
    }
}

/// Busy intervals of a thread from its samples
///
/// Samples with a zero CPU delta are idle. Threads without a CPU delta column
/// are assumed busy for one sampling interval per sample.
fn active_intervals(profile: &Profile, thread: &Thread) -> Vec<ActiveInterval> {
    let times = thread.samples.times();
    let has_delta = thread.samples.has_cpu_delta();
    let interval = profile.sampling_interval_ms();

    times
        .iter()
        .enumerate()
        .filter_map(|(i, &start)| {
            let busy_ms = if has_delta {
                match thread.samples.cpu_delta_ns(i) {
                    Some(ns) if ns > 0.0 => ns / 1_000_000.0,
                    _ => return None,
                }
            } else {
                interval
            };
            Some(ActiveInterval {
                start,
                end: start + busy_ms,
            })
        })
        .collect()
}

fn gc_contention(markers: &[ParsedMarker], workers: &[WorkerActivity]) -> Vec<ContentionEvent> {
    markers
        .iter()
        .filter(|m| is_gc_marker(m))
        .filter_map(|gc| {
            let threads: Vec<String> = workers
                .iter()
                .filter(|w| {
                    w.intervals
                        .iter()
                        .any(|iv| iv.overlaps(gc.start_time, gc.end_time()))
                })
                .map(|w| w.name.to_string())
                .collect();
            if threads.is_empty() {
                return None;
            }

            let impact_ms = gc.duration * threads.len() as f64;
            Some(ContentionEvent {
                kind: ContentionKind::GcPause,
                start_time: gc.start_time,
                duration: gc.duration,
                description: format!(
                    "{} on {} ({:.1}ms) overlapped {} active worker thread(s)",
                    gc.name,
                    gc.thread_name,
                    gc.duration,
                    threads.len()
                ),
                threads,
                impact_ms,
            })
        })
        .collect()
}

/// Cluster synchronous IPC calls whose starts are within the window of the
/// previous call; clusters touching more than one thread are contention
fn ipc_contention(markers: &[ParsedMarker]) -> Vec<ContentionEvent> {
    let mut calls: Vec<&ParsedMarker> = markers.iter().filter(|m| is_sync_ipc_marker(m)).collect();
    calls.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut clusters: Vec<Vec<&ParsedMarker>> = Vec::new();
    for call in calls {
        match clusters.last_mut() {
            Some(cluster)
                if cluster
                    .last()
                    .is_some_and(|prev| call.start_time - prev.start_time <= IPC_CLUSTER_WINDOW_MS) =>
            {
                cluster.push(call)
            }
            _ => clusters.push(vec![call]),
        }
    }

    clusters
        .into_iter()
        .filter_map(|cluster| {
            let mut threads: Vec<String> = Vec::new();
            for call in &cluster {
                if !threads.contains(&call.thread_name) {
                    threads.push(call.thread_name.clone());
                }
            }
            if threads.len() < 2 {
                return None;
            }

            let start_time = cluster.first().map(|m| m.start_time).unwrap_or_default();
            let duration = cluster.iter().map(|m| m.duration).fold(0.0, f64::max);
            Some(ContentionEvent {
                kind: ContentionKind::IpcWait,
                start_time,
                duration,
                impact_ms: duration * threads.len() as f64,
                description: format!(
                    "{} synchronous IPC calls from {} threads within {:.0}ms",
                    cluster.len(),
                    threads.len(),
                    IPC_CLUSTER_WINDOW_MS
                ),
                threads,
            })
        })
        .collect()
}

fn contention_severity(duration_ms: f64, impact_percent: f64) -> ContentionSeverity {
    if duration_ms <= 0.0 {
        ContentionSeverity::Unknown
    } else if impact_percent > 10.0 {
        ContentionSeverity::High
    } else if impact_percent > 5.0 {
        ContentionSeverity::Medium
    } else if impact_percent > 1.0 {
        ContentionSeverity::Low
    } else {
        ContentionSeverity::Minimal
    }
}

fn recommend(
    gc_events: usize,
    ipc_events: usize,
    total_impact_ms: f64,
    severity: ContentionSeverity,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if gc_events > 5 {
        recommendations.push(format!(
            "{} garbage collections paused running workers; reduce allocations in code shared with workers.",
            gc_events
        ));
    }
    if ipc_events > 5 {
        recommendations.push(format!(
            "Threads blocked on synchronous IPC at the same time {} times; make these calls asynchronous.",
            ipc_events
        ));
    }
    if total_impact_ms > 100.0 {
        recommendations.push(format!(
            "Contention cost {:.1}ms of thread time; reduce state shared between threads.",
            total_impact_ms
        ));
    }
    if severity == ContentionSeverity::High {
        recommendations.push(
            "Contention is high; review how the main thread and workers synchronize.".to_string(),
        );
    }
    recommendations
}
