//! Terminal renderings of call trees and delimiter markers.

use colored::*;

use crate::aggregator::CallTreeAnalysis;
use crate::delimiter::{DelimiterMarker, OperationMeasurement};

/// Width of the stack column in the hot path table
const STACK_COLUMN: usize = 48;

/// Width of a 100% bar in the call tree chart
const BAR_WIDTH: usize = 40;

/// Render a call tree analysis as function and hot path tables
pub fn render_call_tree(analysis: &CallTreeAnalysis) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "\n📊 {}  ({}: {} samples, {:.1}ms)",
        "Call Tree".bold(),
        analysis.thread_name,
        analysis.total_samples,
        analysis.total_time_ms
    ));
    lines.push("---------------------------------------------------".to_string());

    if analysis.top_functions.is_empty() {
        lines.push("No samples could be attributed to a function.".dimmed().to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "  {:<40} {:>10} {:>7} {:>10} {:>7}",
        "FUNCTION", "SELF ms", "SELF%", "TOTAL ms", "TOTAL%"
    ));
    for f in &analysis.top_functions {
        lines.push(format!(
            "  {:<40} {:>10.1} {:>6.1}% {:>10.1} {:>6.1}%",
            f.name, f.self_time_ms, f.self_percent, f.running_time_ms, f.running_percent
        ));
    }

    if !analysis.hot_paths.is_empty() {
        lines.push(String::new());
        lines.push(format!("  🔥 {}", "HOT PATHS".bold()));
        for path in &analysis.hot_paths {
            let bar_len = ((path.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
            lines.push(format!(
                "  {:<width$} {} {:>5.1}%",
                shorten_path(&path.display(), STACK_COLUMN),
                "█".repeat(bar_len.min(BAR_WIDTH)).red(),
                path.percentage,
                width = STACK_COLUMN
            ));
        }
    }

    lines.join("\n")
}

/// Render the indexed delimiter marker list
pub fn render_delimiter_markers(markers: &[DelimiterMarker]) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "\n📍 {} ({})",
        "Delimiter Markers".bold(),
        markers.len()
    ));
    lines.push("---------------------------------------------------".to_string());

    for m in markers {
        let detail = m
            .marker
            .payload_str("eventType")
            .or_else(|| m.marker.payload_str("name"))
            .map(|d| format!(" [{}]", d))
            .unwrap_or_default();
        lines.push(format!(
            "  {:>5}  {:>10.2}ms  {:>8.2}ms  {:<12} {}{}",
            m.index.to_string().cyan(),
            m.marker.start_time,
            m.marker.duration,
            m.marker.category,
            m.marker.marker_type,
            detail.dimmed()
        ));
    }

    lines.join("\n")
}

/// Render an operation measurement
pub fn render_measurement(measurement: &OperationMeasurement) -> String {
    let describe = |m: &DelimiterMarker| {
        format!(
            "#{} {} on {} @ {:.2}ms",
            m.index, m.marker.name, m.marker.thread_name, m.marker.start_time
        )
    };

    format!(
        "\n⏱️  {}\n  start: {}\n  end:   {}\n  {} {}\n",
        "Operation Measurement".bold(),
        describe(&measurement.start_marker),
        describe(&measurement.end_marker),
        "duration:".bold(),
        format!("{:.2}ms", measurement.duration_ms).green().bold()
    )
}

/// Keep the leaf end of a long path
fn shorten_path(path: &str, max_len: usize) -> String {
    let len = path.chars().count();
    if len <= max_len {
        return path.to_string();
    }
    let tail: String = path.chars().skip(len - (max_len - 3)).collect();
    format!("...{}", tail)
}
