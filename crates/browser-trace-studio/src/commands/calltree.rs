//! Call tree command implementation.

use super::emit::emit;
use super::models::{source_label, CallTreeArgs, OutputSettings};
use crate::aggregator::analyze_call_tree;
use crate::output::{read_profile, render_call_tree};
use crate::utils::config::DEFAULT_TOP_LIMIT;
use anyhow::{Context, Result};
use log::warn;

/// Execute the calltree command
///
/// **Public** - called from main.rs
///
/// Thread filter and limit fall back to the config file, then to all threads
/// and the default limit.
pub fn execute_calltree(args: CallTreeArgs, settings: &OutputSettings) -> Result<()> {
    let profile = read_profile(&args.profile).context("Failed to read profile")?;

    let thread = args.thread.or_else(|| settings.config.call_tree.thread.clone());
    let limit = args
        .limit
        .or(settings.config.call_tree.limit)
        .unwrap_or(DEFAULT_TOP_LIMIT);

    let analysis = analyze_call_tree(&profile, thread.as_deref(), limit);
    if analysis.total_samples == 0 {
        warn!(
            "No samples attributed{}",
            thread
                .as_deref()
                .map(|t| format!(" for thread filter '{}'", t))
                .unwrap_or_default()
        );
    }

    emit(
        settings,
        source_label(&args.profile),
        &analysis,
        render_call_tree,
    )
}
