//! Terminal rendering for diagnostic results.
//!
//! Human-readable summaries with colored severity labels.

use colored::*;

use super::schema::{
    BottleneckReport, ContentionAnalysis, ContentionSeverity, ScalingAnalysis, ScalingComparison,
    Severity,
};

const RULE: &str = "---------------------------------------------------\n";

/// Render a bottleneck report for the terminal
pub fn render_bottleneck_report(report: &BottleneckReport) -> String {
    let mut out = String::new();
    out.push_str(&render_header("Performance Bottlenecks"));
    out.push_str(&format!(
        "Profile: {:.1}ms, {} markers\n",
        report.profile_duration_ms, report.marker_count
    ));
    out.push_str(&format!("Score:   {}\n", render_score(report.score)));
    out.push_str(RULE);

    for bottleneck in &report.bottlenecks {
        out.push_str(&format!(
            "\n{} {}\n",
            severity_label(bottleneck.severity),
            bottleneck.kind.to_string().bold()
        ));
        out.push_str(&format!("  {}\n", bottleneck.description));
        out.push_str(&format!(
            "  count {}, total {:.1}ms, avg {:.1}ms, max {:.1}ms\n",
            bottleneck.count,
            bottleneck.total_duration,
            bottleneck.avg_duration,
            bottleneck.max_duration
        ));
        for location in &bottleneck.locations {
            out.push_str(&format!("    at {}\n", location.dimmed()));
        }
        out.push_str(&format!("  💡 {}\n", bottleneck.recommendation));
    }

    out.push('\n');
    out.push_str(RULE);
    out.push_str(&report.summary.bold().to_string());
    out.push('\n');
    out
}

/// Render a contention analysis for the terminal
pub fn render_contention(analysis: &ContentionAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&render_header("Thread Contention"));
    out.push_str(&format!(
        "Workers:  {}\n",
        if analysis.worker_threads.is_empty() {
            "none".to_string()
        } else {
            analysis.worker_threads.join(", ")
        }
    ));
    out.push_str(&format!(
        "Events:   {} GC pause(s), {} IPC wait(s)\n",
        analysis.gc_contention_count, analysis.ipc_contention_count
    ));
    out.push_str(&format!(
        "Impact:   {:.1}ms ({:.2}% of profile)\n",
        analysis.total_impact_ms, analysis.impact_percent
    ));
    out.push_str(&format!(
        "Severity: {}\n",
        contention_label(analysis.severity)
    ));
    out.push_str(RULE);

    let mut events: Vec<_> = analysis.events.iter().collect();
    events.sort_by(|a, b| b.impact_ms.total_cmp(&a.impact_ms));
    if !events.is_empty() {
        out.push_str("\nTop Contention Events:\n");
        for event in events.iter().take(10) {
            out.push_str(&format!(
                "  @ {:.1}ms  {:.1}ms impact  {}\n",
                event.start_time, event.impact_ms, event.description
            ));
        }
    }

    out.push_str(&render_recommendations(&analysis.recommendations));
    out
}

/// Render a scaling analysis for the terminal
pub fn render_scaling(analysis: &ScalingAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&render_header("Parallel Scaling"));
    out.push_str(&format_scaling_lines(analysis));
    out.push_str(RULE);
    out.push_str(&render_recommendations(&analysis.recommendations));
    out
}

/// Render a scaling comparison for the terminal
pub fn render_scaling_comparison(comparison: &ScalingComparison) -> String {
    let mut out = String::new();
    out.push_str(&render_header("Scaling Comparison"));
    out.push_str(&"Baseline\n".bold().to_string());
    out.push_str(&format_scaling_lines(&comparison.baseline));
    out.push_str(&"\nTarget\n".bold().to_string());
    out.push_str(&format_scaling_lines(&comparison.target));
    out.push_str(RULE);
    out.push_str(&format!(
        "{} Efficiency: {:+.1}%\n",
        delta_symbol(comparison.efficiency_change_percent),
        comparison.efficiency_change_percent
    ));
    out.push_str(&format!(
        "{} Wall clock: {:+.1}%\n",
        delta_symbol(-comparison.wall_clock_change_percent),
        comparison.wall_clock_change_percent
    ));
    out.push_str(&format!(
        "{} Speedup:    {:+.1}%\n",
        delta_symbol(comparison.speedup_change_percent),
        comparison.speedup_change_percent
    ));
    out.push('\n');
    out.push_str(&comparison.summary);
    out.push('\n');
    out
}

fn format_scaling_lines(analysis: &ScalingAnalysis) -> String {
    format!(
        "  Workers:    {}\n  Wall clock: {:.1}ms\n  Work:       {:.1}ms (main {:.1}ms, workers {:.1}ms)\n  Speedup:    {:.2}x\n  Efficiency: {:.1}% ({})\n",
        analysis.worker_count,
        analysis.wall_clock_ms,
        analysis.total_work_ms,
        analysis.main_thread_work_ms,
        analysis.worker_work_ms,
        analysis.actual_speedup,
        analysis.efficiency,
        analysis.bottleneck
    )
}

fn render_header(title: &str) -> String {
    let mut out = String::new();
    out.push_str("\n📊 ");
    out.push_str(&title.bold().to_string());
    out.push('\n');
    out.push_str(RULE);
    out
}

fn render_recommendations(recommendations: &[String]) -> String {
    let mut out = String::new();
    if !recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for recommendation in recommendations {
            out.push_str(&format!("  💡 {}\n", recommendation));
        }
    }
    out
}

fn render_score(score: u32) -> ColoredString {
    let label = format!("{}/100", score);
    if score >= 80 {
        label.green().bold()
    } else if score >= 50 {
        label.yellow().bold()
    } else {
        label.red().bold()
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::High => "[HIGH]".red().bold(),
        Severity::Medium => "[MEDIUM]".yellow().bold(),
        Severity::Low => "[LOW]".cyan(),
    }
}

fn contention_label(severity: ContentionSeverity) -> ColoredString {
    let label = severity.to_string();
    match severity {
        ContentionSeverity::High => label.red().bold(),
        ContentionSeverity::Medium => label.yellow().bold(),
        ContentionSeverity::Low => label.cyan(),
        ContentionSeverity::Minimal => label.green(),
        ContentionSeverity::Unknown => label.dimmed(),
    }
}

/// Arrow for a change where a positive value is an improvement
fn delta_symbol(improvement: f64) -> &'static str {
    if improvement > 0.0 {
        "📈"
    } else if improvement < 0.0 {
        "📉"
    } else {
        "➡️"
    }
}
