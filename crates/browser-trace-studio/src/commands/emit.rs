//! Shared result reporting for all commands.

use super::models::{OutputFormat, OutputSettings, ReportEnvelope};
use crate::output::write_json;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

/// Print a result and optionally write its JSON envelope
///
/// Text format prints `render(result)`; JSON format prints the envelope.
/// With an output path the envelope is always written to that file.
pub fn emit<T: Serialize>(
    settings: &OutputSettings,
    source: String,
    result: &T,
    render: impl FnOnce(&T) -> String,
) -> Result<()> {
    let envelope = ReportEnvelope::new(source, result);

    match settings.format {
        OutputFormat::Text => println!("{}", render(result)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&envelope).context("Failed to serialize result")?;
            println!("{}", json);
        }
    }

    if let Some(path) = &settings.output {
        write_json(&envelope, path)
            .with_context(|| format!("Failed to write result to {}", path.display()))?;
        if settings.format == OutputFormat::Text {
            println!(
                "📄 JSON report written to {}",
                path.display().to_string().cyan()
            );
        }
    }

    Ok(())
}
