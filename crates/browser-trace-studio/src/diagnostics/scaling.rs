//! Parallel scaling analysis.
//!
//! Measures how well a profile's work spreads across worker threads and
//! compares the scaling of two profiles.

use log::debug;

use super::schema::{ScalingAnalysis, ScalingBottleneck, ScalingComparison};
use crate::model::{Profile, Thread};
use crate::utils::config::{
    WORKER_EXCLUDE_PATTERNS, WORKER_GENERIC_PATTERN, WORKER_INCLUDE_PATTERNS,
};

/// Whether a thread is a web worker
///
/// Thread pools, compositor tile workers, audio worklets and profiler
/// internals are never workers, whatever their name contains.
pub fn is_worker_thread(thread: &Thread) -> bool {
    let name = thread.name.to_lowercase();
    if WORKER_EXCLUDE_PATTERNS.iter().any(|p| name.contains(p)) {
        return false;
    }
    if WORKER_INCLUDE_PATTERNS.iter().any(|p| name.contains(p)) {
        return true;
    }
    name.contains(WORKER_GENERIC_PATTERN) && !thread.is_main()
}

/// Analyze parallel scaling of a profile
///
/// **Public** - entry point of the scaling analyzer
pub fn analyze_scaling(profile: &Profile) -> ScalingAnalysis {
    let workers: Vec<&Thread> = profile
        .threads
        .iter()
        .filter(|t| is_worker_thread(t))
        .collect();

    let worker_work_ms: f64 = workers
        .iter()
        .map(|t| profile.thread_cpu_time_ms(t))
        .sum();
    let main_thread_work_ms: f64 = profile
        .threads
        .iter()
        .filter(|t| t.is_main() && !is_worker_thread(t))
        .map(|t| profile.thread_cpu_time_ms(t))
        .sum();
    let total_work_ms = worker_work_ms + main_thread_work_ms;
    let wall_clock_ms = profile.duration_ms();

    let speedup = if wall_clock_ms > 0.0 {
        total_work_ms / wall_clock_ms
    } else {
        0.0
    };
    let efficiency = if workers.is_empty() {
        0.0
    } else {
        (speedup / workers.len() as f64 * 100.0).min(100.0)
    };
    let bottleneck = classify(efficiency);

    debug!(
        "Scaling: {} worker(s), {:.1}ms work over {:.1}ms wall clock, {:.1}% efficiency",
        workers.len(),
        total_work_ms,
        wall_clock_ms,
        efficiency
    );

    let mut recommendations = vec![band_recommendation(bottleneck).to_string()];
    match workers.len() {
        0 => recommendations.push(
            "No worker threads found; move CPU-heavy work off the main thread into Web Workers."
                .to_string(),
        ),
        1 if worker_work_ms > 100.0 => recommendations.push(format!(
            "A single worker does {:.1}ms of work; splitting it across several workers could shorten wall-clock time.",
            worker_work_ms
        )),
        n if n > 4 && efficiency < 50.0 => recommendations.push(format!(
            "{} workers run at {:.1}% efficiency; fewer workers may finish just as fast.",
            n, efficiency
        )),
        _ => {}
    }

    ScalingAnalysis {
        worker_count: workers.len(),
        worker_threads: workers.iter().map(|t| t.name.clone()).collect(),
        wall_clock_ms,
        total_work_ms,
        main_thread_work_ms,
        worker_work_ms,
        theoretical_speedup: speedup,
        actual_speedup: speedup,
        efficiency,
        bottleneck,
        recommendations,
    }
}

fn classify(efficiency: f64) -> ScalingBottleneck {
    if efficiency < 30.0 {
        ScalingBottleneck::Serialization
    } else if efficiency < 50.0 {
        ScalingBottleneck::Contention
    } else if efficiency < 70.0 {
        ScalingBottleneck::Overhead
    } else if efficiency < 90.0 {
        ScalingBottleneck::Minimal
    } else {
        ScalingBottleneck::NoBottleneck
    }
}

fn band_recommendation(bottleneck: ScalingBottleneck) -> &'static str {
    match bottleneck {
        ScalingBottleneck::Serialization => {
            "Work is mostly serialized; split it into independent chunks that workers can process in parallel."
        }
        ScalingBottleneck::Contention => {
            "Workers spend much of their time waiting; reduce shared state and synchronous round-trips."
        }
        ScalingBottleneck::Overhead => {
            "Coordination overhead limits scaling; send fewer, larger messages to workers."
        }
        ScalingBottleneck::Minimal => "Scaling is good; the remaining overhead is small.",
        ScalingBottleneck::NoBottleneck => "Work scales close to ideally across workers.",
    }
}

/// Compare the scaling of a baseline and a target profile
pub fn compare_scaling(baseline: &Profile, target: &Profile) -> ScalingComparison {
    compare_scaling_analyses(analyze_scaling(baseline), analyze_scaling(target))
}

/// Compare two scaling analyses
pub fn compare_scaling_analyses(
    baseline: ScalingAnalysis,
    target: ScalingAnalysis,
) -> ScalingComparison {
    let efficiency_change_percent = safe_percentage(
        target.efficiency - baseline.efficiency,
        baseline.efficiency,
    );
    let wall_clock_change_percent = safe_percentage(
        target.wall_clock_ms - baseline.wall_clock_ms,
        baseline.wall_clock_ms,
    );
    let speedup_change_percent = safe_percentage(
        target.actual_speedup - baseline.actual_speedup,
        baseline.actual_speedup,
    );

    let summary = comparison_summary(&baseline, &target, wall_clock_change_percent);

    ScalingComparison {
        baseline,
        target,
        efficiency_change_percent,
        wall_clock_change_percent,
        speedup_change_percent,
        summary,
    }
}

fn comparison_summary(
    baseline: &ScalingAnalysis,
    target: &ScalingAnalysis,
    wall_clock_change_percent: f64,
) -> String {
    let mut parts = Vec::new();

    if baseline.worker_count != target.worker_count {
        parts.push(format!(
            "Worker count changed from {} to {}.",
            baseline.worker_count, target.worker_count
        ));
    }

    let verb = if target.efficiency > baseline.efficiency {
        Some("improved")
    } else if target.efficiency < baseline.efficiency {
        Some("dropped")
    } else {
        None
    };
    parts.push(match verb {
        Some(verb) => format!(
            "Efficiency {} from {:.1}% to {:.1}%.",
            verb, baseline.efficiency, target.efficiency
        ),
        None => format!("Efficiency unchanged at {:.1}%.", target.efficiency),
    });

    let wall_clock = if wall_clock_change_percent < 0.0 {
        format!("Wall-clock time is {:.1}% faster", -wall_clock_change_percent)
    } else if wall_clock_change_percent > 0.0 {
        format!("Wall-clock time is {:.1}% slower", wall_clock_change_percent)
    } else {
        "Wall-clock time is unchanged".to_string()
    };
    parts.push(format!(
        "{} ({:.1}ms -> {:.1}ms), speedup {:.2}x -> {:.2}x.",
        wall_clock,
        baseline.wall_clock_ms,
        target.wall_clock_ms,
        baseline.actual_speedup,
        target.actual_speedup
    ));

    parts.join(" ")
}

/// Percentage change relative to `baseline`, 0 when the baseline is zero
pub fn safe_percentage(change: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        0.0
    } else {
        change / baseline * 100.0
    }
}
