//! Diagnostic commands: bottlenecks, contention and scaling.

use super::emit::emit;
use super::models::{source_label, BottlenecksArgs, CompareScalingArgs, OutputSettings};
use crate::diagnostics::{
    analyze_contention, analyze_scaling, compare_scaling, detect_bottlenecks_with_context,
    filter_by_severity, render_bottleneck_report, render_contention, render_scaling,
    render_scaling_comparison, DetectionContext,
};
use crate::output::read_profile;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Execute the bottlenecks command
///
/// **Public** - called from main.rs
pub fn execute_bottlenecks(args: BottlenecksArgs, settings: &OutputSettings) -> Result<()> {
    let profile = read_profile(&args.profile).context("Failed to read profile")?;

    let ctx = DetectionContext::from_profile(&profile)
        .with_extra_base_urls(&settings.config.extensions.base_urls);
    let mut report = detect_bottlenecks_with_context(&profile, &ctx);

    if let Some(min) = args.min_severity.or(settings.config.report.min_severity) {
        let total = report.bottlenecks.len();
        report.bottlenecks = filter_by_severity(&report.bottlenecks, min);
        info!(
            "Showing {} of {} bottleneck(s) at {} severity or above",
            report.bottlenecks.len(),
            total,
            min
        );
    }

    emit(
        settings,
        source_label(&args.profile),
        &report,
        render_bottleneck_report,
    )
}

/// Execute the contention command
pub fn execute_contention(profile_path: &Path, settings: &OutputSettings) -> Result<()> {
    let profile = read_profile(profile_path).context("Failed to read profile")?;
    let analysis = analyze_contention(&profile);
    emit(settings, source_label(profile_path), &analysis, render_contention)
}

/// Execute the scaling command
pub fn execute_scaling(profile_path: &Path, settings: &OutputSettings) -> Result<()> {
    let profile = read_profile(profile_path).context("Failed to read profile")?;
    let analysis = analyze_scaling(&profile);
    emit(settings, source_label(profile_path), &analysis, render_scaling)
}

/// Execute the compare-scaling command
pub fn execute_compare_scaling(args: CompareScalingArgs, settings: &OutputSettings) -> Result<()> {
    let baseline = read_profile(&args.baseline).context("Failed to read baseline profile")?;
    let target = read_profile(&args.target).context("Failed to read target profile")?;

    let comparison = compare_scaling(&baseline, &target);
    let source = format!(
        "{} vs {}",
        source_label(&args.baseline),
        source_label(&args.target)
    );
    emit(settings, source, &comparison, render_scaling_comparison)
}
