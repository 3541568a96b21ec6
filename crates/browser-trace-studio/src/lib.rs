//! Browser Trace Studio library
//!
//! Analysis engine for sampled browser performance profiles: call trees,
//! bottleneck diagnostics, thread contention, parallel scaling and operation
//! timing between delimiter markers.

pub mod aggregator;
pub mod commands;
pub mod delimiter;
pub mod diagnostics;
pub mod markers;
pub mod model;
pub mod output;
pub mod utils;
