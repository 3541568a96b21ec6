//! Bottleneck report generation.
//!
//! Runs every detector over the profile's markers and condenses the findings
//! into a health score and a one-line summary.

use log::{debug, info};

use super::detectors::DETECTORS;
use super::schema::{Bottleneck, BottleneckReport, DetectionContext, Severity};
use crate::markers::{extract_all_markers, ParsedMarker};
use crate::model::Profile;

/// Score of a profile with no findings
const PERFECT_SCORE: u32 = 100;

impl DetectionContext {
    /// Context derived from the profile's duration and extension table
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            profile_duration_ms: profile.duration_ms(),
            extension_base_urls: profile.extension_base_urls(),
        }
    }

    /// Add extension base URLs not already known
    pub fn with_extra_base_urls(mut self, urls: &[String]) -> Self {
        for url in urls {
            if !url.is_empty() && !self.extension_base_urls.contains(url) {
                self.extension_base_urls.push(url.clone());
            }
        }
        self
    }
}

/// Detect performance bottlenecks in a profile
///
/// **Public** - main entry point of the diagnostic engine
///
/// Detectors run in a fixed order; only those with a finding contribute.
pub fn detect_bottlenecks(profile: &Profile) -> BottleneckReport {
    detect_bottlenecks_with_context(profile, &DetectionContext::from_profile(profile))
}

/// Same as [`detect_bottlenecks`] with an explicit detection context
pub fn detect_bottlenecks_with_context(
    profile: &Profile,
    ctx: &DetectionContext,
) -> BottleneckReport {
    let markers = extract_all_markers(profile);
    debug!(
        "Running {} detectors over {} markers ({:.1}ms profile)",
        DETECTORS.len(),
        markers.len(),
        ctx.profile_duration_ms
    );

    let bottlenecks = run_detectors(&markers, ctx);
    info!("Detected {} bottleneck(s)", bottlenecks.len());

    BottleneckReport {
        score: calculate_score(&bottlenecks),
        summary: generate_summary(&bottlenecks),
        profile_duration_ms: ctx.profile_duration_ms,
        marker_count: markers.len(),
        bottlenecks,
    }
}

/// Run every detector over already extracted markers
pub fn run_detectors(markers: &[ParsedMarker], ctx: &DetectionContext) -> Vec<Bottleneck> {
    DETECTORS
        .iter()
        .filter_map(|detect| detect(markers, ctx))
        .collect()
}

/// Health score: 100 minus 20 per high, 10 per medium and 5 per low finding
///
/// Never negative.
pub fn calculate_score(bottlenecks: &[Bottleneck]) -> u32 {
    let penalty: u32 = bottlenecks.iter().map(|b| b.severity.penalty()).sum();
    PERFECT_SCORE.saturating_sub(penalty)
}

/// One sentence describing the findings per severity tier
pub fn generate_summary(bottlenecks: &[Bottleneck]) -> String {
    if bottlenecks.is_empty() {
        return "No significant performance bottlenecks detected.".to_string();
    }

    let count = |severity: Severity| bottlenecks.iter().filter(|b| b.severity == severity).count();
    format!(
        "Found {} bottleneck(s): {} high, {} medium, {} low severity.",
        bottlenecks.len(),
        count(Severity::High),
        count(Severity::Medium),
        count(Severity::Low)
    )
}

/// Keep findings at or above `min_severity`
pub fn filter_by_severity(bottlenecks: &[Bottleneck], min_severity: Severity) -> Vec<Bottleneck> {
    bottlenecks
        .iter()
        .filter(|b| b.severity >= min_severity)
        .cloned()
        .collect()
}
