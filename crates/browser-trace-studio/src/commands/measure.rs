//! Delimiter marker commands: listing and measuring.

use super::emit::emit;
use super::models::{source_label, MarkersArgs, MeasureArgs, MeasureIndexArgs, OutputSettings};
use crate::delimiter::{
    get_delimiter_markers, measure_by_index, measure_operation_advanced,
};
use crate::output::{read_profile, render_delimiter_markers, render_measurement};
use anyhow::{Context, Result};

/// Execute the markers command
///
/// **Public** - lists the index space used by measure-index
pub fn execute_markers(args: MarkersArgs, settings: &OutputSettings) -> Result<()> {
    let profile = read_profile(&args.profile).context("Failed to read profile")?;
    let markers = get_delimiter_markers(&profile, args.category.as_deref());
    emit(settings, source_label(&args.profile), &markers, |m| {
        render_delimiter_markers(m)
    })
}

/// Execute the measure command
pub fn execute_measure(args: MeasureArgs, settings: &OutputSettings) -> Result<()> {
    let profile = read_profile(&args.profile).context("Failed to read profile")?;
    let measurement = measure_operation_advanced(&profile, &args.options).with_context(|| {
        format!(
            "Failed to measure '{}' -> '{}'",
            args.options.start_pattern, args.options.end_pattern
        )
    })?;
    emit(
        settings,
        source_label(&args.profile),
        &measurement,
        render_measurement,
    )
}

/// Execute the measure-index command
pub fn execute_measure_index(args: MeasureIndexArgs, settings: &OutputSettings) -> Result<()> {
    let profile = read_profile(&args.profile).context("Failed to read profile")?;
    let measurement = measure_by_index(&profile, args.category.as_deref(), args.start, args.end)
        .with_context(|| format!("Failed to measure markers #{} -> #{}", args.start, args.end))?;
    emit(
        settings,
        source_label(&args.profile),
        &measurement,
        render_measurement,
    )
}
