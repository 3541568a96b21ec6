//! Call tree reconstruction from sampled stacks.
//!
//! This module transforms a profile's samples into:
//! - Self and running time per function
//! - Hot call paths (top time consumers)

pub mod call_tree;
pub mod metrics;
pub mod schema;
pub mod stack_builder;

// Re-export main types and functions
pub use call_tree::{analyze_call_tree, ALL_THREADS};
pub use schema::{CallTreeAnalysis, FunctionStats, HotPath};
pub use stack_builder::{walk_stack, StackWalk};
