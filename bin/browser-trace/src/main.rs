//! Browser Trace Studio CLI
//!
//! Performance analysis for browser profiles (Firefox Profiler format).
//! Reports call trees, bottlenecks, thread contention, parallel scaling and
//! the time between delimiter markers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use std::path::PathBuf;

use browser_trace_studio::commands::{
    display_version, execute_bottlenecks, execute_calltree, execute_compare_scaling,
    execute_contention, execute_markers, execute_measure, execute_measure_index, execute_scaling,
    BottlenecksArgs, CallTreeArgs, CompareScalingArgs, MarkersArgs, MeasureArgs, MeasureIndexArgs,
    OutputFormat, OutputSettings,
};
use browser_trace_studio::delimiter::MeasureOptions;
use browser_trace_studio::diagnostics::Severity;
use browser_trace_studio::utils::{load_config, AnalysisConfig};

/// Browser Trace Studio - Performance diagnostics for browser profiles
#[derive(Parser, Debug)]
#[command(name = "browser-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analysis config file (TOML)
    #[arg(short, long, global = true, env = "BROWSER_TRACE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format for stdout
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Also write the JSON result to this file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect performance bottlenecks
    Bottlenecks {
        /// Path to profile JSON file
        profile: PathBuf,

        /// Hide findings below this severity
        #[arg(long, value_enum)]
        min_severity: Option<Severity>,
    },

    /// Show top functions and hot paths
    Calltree {
        /// Path to profile JSON file
        profile: PathBuf,

        /// Only threads whose name contains this text
        #[arg(short, long)]
        thread: Option<String>,

        /// Number of functions and hot paths to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Analyze contention between threads
    Contention {
        /// Path to profile JSON file
        profile: PathBuf,
    },

    /// Analyze parallel scaling across worker threads
    Scaling {
        /// Path to profile JSON file
        profile: PathBuf,
    },

    /// Compare parallel scaling of two profiles
    CompareScaling {
        /// Baseline profile JSON
        baseline: PathBuf,

        /// Target profile JSON
        target: PathBuf,
    },

    /// List delimiter markers with their indices
    Markers {
        /// Path to profile JSON file
        profile: PathBuf,

        /// Only markers of this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Measure the time between two marker patterns ("Type" or "Type:subtype")
    Measure {
        /// Path to profile JSON file
        profile: PathBuf,

        /// Start marker pattern, e.g. "DOMEvent:click"
        #[arg(long)]
        start: String,

        /// End marker pattern, e.g. "Paint"
        #[arg(long)]
        end: String,

        /// Ignore start markers before this time (ms)
        #[arg(long)]
        start_after: Option<f64>,

        /// Ignore end markers after this time (ms)
        #[arg(long)]
        end_before: Option<f64>,

        /// Minimum start marker duration (ms)
        #[arg(long, default_value = "0")]
        start_min_duration: f64,

        /// Minimum end marker duration (ms)
        #[arg(long, default_value = "0")]
        end_min_duration: f64,

        /// Use the last matching end marker
        #[arg(long)]
        last: bool,

        /// Only markers of this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Measure the time between two markers by index (see `markers`)
    MeasureIndex {
        /// Path to profile JSON file
        profile: PathBuf,

        /// Start marker index
        start: usize,

        /// End marker index
        end: usize,

        /// Index into markers of this category only
        #[arg(long)]
        category: Option<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Load config
    let config = match &cli.config {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };
    let settings = OutputSettings::resolve(cli.format, cli.output, config);

    // Execute command
    match cli.command {
        Commands::Bottlenecks {
            profile,
            min_severity,
        } => execute_bottlenecks(
            BottlenecksArgs {
                profile,
                min_severity,
            },
            &settings,
        )?,

        Commands::Calltree {
            profile,
            thread,
            limit,
        } => execute_calltree(
            CallTreeArgs {
                profile,
                thread,
                limit,
            },
            &settings,
        )?,

        Commands::Contention { profile } => execute_contention(&profile, &settings)?,

        Commands::Scaling { profile } => execute_scaling(&profile, &settings)?,

        Commands::CompareScaling { baseline, target } => {
            execute_compare_scaling(CompareScalingArgs { baseline, target }, &settings)?
        }

        Commands::Markers { profile, category } => {
            execute_markers(MarkersArgs { profile, category }, &settings)?
        }

        Commands::Measure {
            profile,
            start,
            end,
            start_after,
            end_before,
            start_min_duration,
            end_min_duration,
            last,
            category,
        } => {
            let options = MeasureOptions {
                start_pattern: start,
                end_pattern: end,
                start_after_ms: start_after,
                end_before_ms: end_before,
                start_min_duration_ms: start_min_duration,
                end_min_duration_ms: end_min_duration,
                find_last: last,
                category_filter: category,
            };
            execute_measure(MeasureArgs { profile, options }, &settings)?
        }

        Commands::MeasureIndex {
            profile,
            start,
            end,
            category,
        } => execute_measure_index(
            MeasureIndexArgs {
                profile,
                category,
                start,
                end,
            },
            &settings,
        )?,

        Commands::Version => display_version(),
    }

    Ok(())
}
