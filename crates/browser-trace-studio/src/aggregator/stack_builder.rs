//! Walk stack prefix chains and render call paths.
//!
//! A stack node only stores its leaf frame and its parent ("prefix"). The
//! full call stack is obtained by following prefixes to the root. Traces are
//! sometimes malformed (dangling or cyclic prefixes), so the walk is a plain
//! loop bounded by `MAX_STACK_DEPTH` instead of recursion.

use crate::model::{StringTable, Thread};
use crate::utils::config::{HOT_PATH_MAX_FRAMES, MAX_FUNCTION_NAME_LEN, MAX_STACK_DEPTH};

/// Functions of one stack, leaf first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackWalk {
    /// Function indices from leaf to root; unresolvable frames are skipped
    pub funcs: Vec<usize>,

    /// Whether the walk stopped at the depth cap
    pub truncated: bool,
}

/// Walk the prefix chain of `stack`
///
/// **Public** - used by the call tree for running time and hot paths
pub fn walk_stack(thread: &Thread, stack: usize) -> StackWalk {
    let mut walk = StackWalk::default();
    let mut current = Some(stack);
    let mut depth = 0;

    while let Some(node) = current {
        if depth >= MAX_STACK_DEPTH {
            walk.truncated = true;
            break;
        }
        depth += 1;

        if let Some(func) = thread.stack_func(node) {
            walk.funcs.push(func);
        }
        current = thread.stack_prefix(node);
    }

    walk
}

/// Render a walk as at most `HOT_PATH_MAX_FRAMES` names, root to leaf
///
/// The leaf-most frames are kept. Empty names are dropped and long names
/// shortened.
pub fn render_path(thread: &Thread, strings: &StringTable<'_>, walk: &StackWalk) -> Vec<String> {
    let mut frames: Vec<String> = walk
        .funcs
        .iter()
        .filter_map(|&func| thread.func_name_index(func))
        .map(|name| strings.get(name))
        .filter(|name| !name.is_empty())
        .take(HOT_PATH_MAX_FRAMES)
        .map(truncate_name)
        .collect();
    frames.reverse();
    frames
}

/// Shorten a function name to `MAX_FUNCTION_NAME_LEN` characters
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_FUNCTION_NAME_LEN {
        return name.to_string();
    }
    let mut short: String = name.chars().take(MAX_FUNCTION_NAME_LEN - 3).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::ThreadBuilder;

    #[test]
    fn test_walk_leaf_to_root() {
        let mut builder = ThreadBuilder::new("GeckoMain");
        let stack = builder.stack(&["main", "run", "paint"]);
        let thread = builder.build();

        let walk = walk_stack(&thread, stack);
        assert_eq!(walk.funcs, vec![2, 1, 0]);
        assert!(!walk.truncated);
    }

    #[test]
    fn test_walk_terminates_on_cycle() {
        let mut builder = ThreadBuilder::new("GeckoMain");
        let stack = builder.stack(&["a", "b"]);
        let mut thread = builder.build();
        // Make the root point back at the leaf.
        thread.stack_table.prefix[0] = Some(stack as i64);

        let walk = walk_stack(&thread, stack);
        assert!(walk.truncated);
        assert_eq!(walk.funcs.len(), MAX_STACK_DEPTH);
    }

    #[test]
    fn test_render_keeps_leaf_most_frames() {
        let mut builder = ThreadBuilder::new("GeckoMain");
        let stack = builder.stack(&["f0", "f1", "f2", "f3", "f4", "f5", "f6"]);
        let thread = builder.build();
        let strings = StringTable::new(&thread.string_array);

        let path = render_path(&thread, &strings, &walk_stack(&thread, stack));
        assert_eq!(path, vec!["f2", "f3", "f4", "f5", "f6"]);
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short"), "short");
        let long = "x".repeat(80);
        let short = truncate_name(&long);
        assert_eq!(short.chars().count(), MAX_FUNCTION_NAME_LEN);
        assert!(short.ends_with("..."));
    }
}
