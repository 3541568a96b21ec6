//! Self time, running time and hot paths from sampled stacks.
//!
//! Algorithm, per thread:
//! 1. For each sample, resolve the leaf function and add the sample's time
//!    to that function's self time. Group sample time by stack index.
//! 2. For each distinct stack, walk the prefix chain and add the stack's
//!    time once to every distinct function on it (running time).
//! 3. Rank stacks by time, keep the top `2 × limit`, render each as a path
//!    and merge identical renderings across threads.
//!
//! Functions are keyed by resolved name because table indices are only
//! meaningful inside one thread. Two different functions with the same name
//! on different threads therefore merge.

use log::{debug, warn};
use std::collections::{HashMap, HashSet};

use super::metrics::{rank_functions, rank_hot_paths, FunctionAccumulator, PathAccumulator};
use super::schema::CallTreeAnalysis;
use super::stack_builder::{render_path, walk_stack};
use crate::model::{Profile, Thread};
use crate::utils::config::DEFAULT_TOP_LIMIT;

/// Label used when the analysis covers more than one thread
pub const ALL_THREADS: &str = "All threads";

/// Analyze the call tree of the profile
///
/// **Public** - main entry point of the call tree engine
///
/// # Arguments
/// * `profile` - Profile to analyze
/// * `thread_filter` - Case-insensitive thread name substring; `None` for all threads
/// * `limit` - Number of functions and hot paths to return (0 means 20)
///
/// Never fails: unresolvable samples are skipped and an empty profile
/// yields an empty analysis.
pub fn analyze_call_tree(
    profile: &Profile,
    thread_filter: Option<&str>,
    limit: usize,
) -> CallTreeAnalysis {
    let limit = if limit == 0 { DEFAULT_TOP_LIMIT } else { limit };
    let threads = profile.find_threads(thread_filter);

    debug!(
        "Analyzing call tree over {} thread(s), limit {}",
        threads.len(),
        limit
    );

    let mut totals = ThreadTotals::default();
    let mut functions: HashMap<String, FunctionAccumulator> = HashMap::new();
    let mut paths: HashMap<String, PathAccumulator> = HashMap::new();

    for thread in &threads {
        accumulate_thread(profile, thread, limit, &mut totals, &mut functions, &mut paths);
    }

    if totals.truncated_walks > 0 {
        warn!(
            "{} stack walk(s) hit the depth cap; the trace may contain cyclic prefixes",
            totals.truncated_walks
        );
    }

    let thread_name = match threads.as_slice() {
        [only] => only.name.clone(),
        _ => ALL_THREADS.to_string(),
    };

    CallTreeAnalysis {
        total_time_ms: totals.time_ms,
        total_samples: totals.samples,
        top_functions: rank_functions(functions, totals.time_ms, limit),
        hot_paths: rank_hot_paths(paths, totals.time_ms, limit),
        thread_name,
    }
}

#[derive(Debug, Default)]
struct ThreadTotals {
    time_ms: f64,
    samples: u64,
    truncated_walks: usize,
}

/// Time and sample count of one distinct stack
#[derive(Debug, Clone, Copy, Default)]
struct StackTotal {
    time_ms: f64,
    samples: u64,
}

fn accumulate_thread(
    profile: &Profile,
    thread: &Thread,
    limit: usize,
    totals: &mut ThreadTotals,
    functions: &mut HashMap<String, FunctionAccumulator>,
    paths: &mut HashMap<String, PathAccumulator>,
) {
    let strings = profile.strings_for(thread);
    let mut stack_totals: HashMap<usize, StackTotal> = HashMap::new();

    // Self time
    for i in 0..thread.samples.len() {
        let Some(stack) = thread.samples.stack_at(i) else {
            continue;
        };
        let Some(leaf) = thread.stack_func(stack) else {
            continue;
        };
        let name = thread
            .func_name_index(leaf)
            .map(|idx| strings.get(idx))
            .unwrap_or("");
        if name.is_empty() {
            continue;
        }

        let time_ms = profile.sample_weight_ms(thread, i);
        totals.time_ms += time_ms;
        totals.samples += 1;

        let entry = functions.entry(name.to_string()).or_default();
        entry.self_time_ms += time_ms;
        entry.self_samples += 1;
        if entry.resource.is_none() {
            entry.resource = thread
                .func_resource_name_index(leaf)
                .map(|idx| strings.get(idx))
                .filter(|r| !r.is_empty())
                .map(str::to_string);
        }

        let stack_total = stack_totals.entry(stack).or_default();
        stack_total.time_ms += time_ms;
        stack_total.samples += 1;
    }

    // Running time
    for (&stack, total) in &stack_totals {
        let walk = walk_stack(thread, stack);
        if walk.truncated {
            totals.truncated_walks += 1;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for &func in &walk.funcs {
            let name = thread
                .func_name_index(func)
                .map(|idx| strings.get(idx))
                .unwrap_or("");
            if name.is_empty() || !seen.insert(name) {
                continue;
            }
            functions.entry(name.to_string()).or_default().running_time_ms += total.time_ms;
        }
    }

    // Hot path candidates
    let mut ranked: Vec<(usize, StackTotal)> = stack_totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.time_ms.total_cmp(&a.1.time_ms).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit.saturating_mul(2));

    for (stack, total) in ranked {
        let frames = render_path(thread, &strings, &walk_stack(thread, stack));
        if frames.is_empty() {
            continue;
        }
        let key = frames.join(" -> ");
        let entry = paths.entry(key).or_insert_with(|| PathAccumulator {
            frames,
            ..PathAccumulator::default()
        });
        entry.time_ms += total.time_ms;
        entry.samples += total.samples;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{profile_with, ThreadBuilder};

    fn main_thread() -> Thread {
        let mut builder = ThreadBuilder::new("GeckoMain").main();
        let paint = builder.stack(&["main", "run", "paint"]);
        let layout = builder.stack(&["main", "run", "layout"]);
        let main = builder.stack(&["main"]);
        for t in 0..6 {
            builder.sample(t as f64, paint, None);
        }
        for t in 6..9 {
            builder.sample(t as f64, layout, None);
        }
        builder.sample(9.0, main, None);
        builder.build()
    }

    #[test]
    fn test_self_and_running_time() {
        let profile = profile_with(vec![main_thread()]);
        let analysis = analyze_call_tree(&profile, None, 10);

        assert_eq!(analysis.total_samples, 10);
        assert_eq!(analysis.total_time_ms, 10.0);
        assert_eq!(analysis.thread_name, "GeckoMain");

        let by_name: HashMap<&str, _> = analysis
            .top_functions
            .iter()
            .map(|f| (f.name.as_str(), f))
            .collect();
        assert_eq!(by_name["paint"].self_time_ms, 6.0);
        assert_eq!(by_name["layout"].self_time_ms, 3.0);
        assert_eq!(by_name["main"].self_time_ms, 1.0);
        assert_eq!(by_name["main"].running_time_ms, 10.0);
        assert_eq!(by_name["run"].self_time_ms, 0.0);
        assert_eq!(by_name["run"].running_time_ms, 9.0);
        assert_eq!(analysis.top_functions[0].name, "paint");
    }

    #[test]
    fn test_self_never_exceeds_running_and_time_is_conserved() {
        let profile = profile_with(vec![main_thread(), main_thread()]);
        let analysis = analyze_call_tree(&profile, None, 50);

        let self_sum: f64 = analysis.top_functions.iter().map(|f| f.self_time_ms).sum();
        assert_eq!(self_sum, analysis.total_time_ms);
        for f in &analysis.top_functions {
            assert!(f.self_time_ms <= f.running_time_ms, "{}", f.name);
        }
    }

    #[test]
    fn test_hot_paths_merge_across_threads() {
        let profile = profile_with(vec![main_thread(), main_thread()]);
        let analysis = analyze_call_tree(&profile, None, 10);

        assert_eq!(analysis.thread_name, ALL_THREADS);
        let top = &analysis.hot_paths[0];
        assert_eq!(top.frames, vec!["main", "run", "paint"]);
        assert_eq!(top.self_time_ms, 12.0);
        assert_eq!(top.sample_count, 12);
        assert_eq!(analysis.hot_paths.len(), 3);
    }

    #[test]
    fn test_recursion_counted_once_in_running_time() {
        let mut builder = ThreadBuilder::new("GeckoMain");
        let stack = builder.stack(&["fib", "fib2", "fib"]);
        builder.sample(0.0, stack, None);
        let profile = profile_with(vec![builder.build()]);

        let analysis = analyze_call_tree(&profile, None, 10);
        let fib = analysis
            .top_functions
            .iter()
            .find(|f| f.name == "fib")
            .unwrap();
        assert_eq!(fib.running_time_ms, 1.0);
        assert_eq!(fib.self_time_ms, 1.0);
    }

    #[test]
    fn test_malformed_indices_are_skipped() {
        let mut builder = ThreadBuilder::new("GeckoMain");
        let stack = builder.stack(&["main"]);
        builder.sample(0.0, stack, None);
        let mut thread = builder.build();
        thread.samples.stack.push(Some(-1));
        thread.samples.stack.push(Some(99));
        thread.samples.stack.push(None);
        thread.samples.time.extend([1.0, 2.0, 3.0]);
        let profile = profile_with(vec![thread]);

        let analysis = analyze_call_tree(&profile, None, 0);
        assert_eq!(analysis.total_samples, 1);
        assert_eq!(analysis.top_functions.len(), 1);
    }

    #[test]
    fn test_empty_profile() {
        let analysis = analyze_call_tree(&Profile::default(), None, 5);
        assert_eq!(analysis.total_samples, 0);
        assert_eq!(analysis.total_time_ms, 0.0);
        assert!(analysis.top_functions.is_empty());
        assert!(analysis.hot_paths.is_empty());
    }

    #[test]
    fn test_limit_truncates_results() {
        let profile = profile_with(vec![main_thread()]);
        let analysis = analyze_call_tree(&profile, Some("gecko"), 1);
        assert_eq!(analysis.top_functions.len(), 1);
        assert_eq!(analysis.hot_paths.len(), 1);
    }

    #[test]
    fn test_cpu_delta_weights_samples() {
        let mut builder = ThreadBuilder::new("GeckoMain");
        let stack = builder.stack(&["main", "work"]);
        builder.sample(0.0, stack, Some(3_000_000.0));
        builder.sample(1.0, stack, Some(500_000.0));
        let profile = profile_with(vec![builder.build()]);

        let analysis = analyze_call_tree(&profile, None, 10);
        assert_eq!(analysis.total_time_ms, 3.5);
    }
}
