//! Fixture builders shared by the unit tests.

use serde_json::{Map, Value};
use std::collections::HashMap;

use super::schema::{Category, Profile, TableIndex, Thread};
use crate::markers::ParsedMarker;

/// Category table used by every fixture profile
pub(crate) const CATEGORIES: &[&str] = &[
    "Other",
    "Idle",
    "Layout",
    "JavaScript",
    "GC / CC",
    "Network",
    "Graphics",
    "DOM",
    "IPC",
    "UserTiming",
];

/// Builds a thread's columnar tables from readable names
pub(crate) struct ThreadBuilder {
    thread: Thread,
    strings: HashMap<String, TableIndex>,
    frames: HashMap<String, usize>,
    stacks: HashMap<(Option<usize>, usize), usize>,
}

impl ThreadBuilder {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            thread: Thread {
                name: name.to_string(),
                ..Thread::default()
            },
            strings: HashMap::new(),
            frames: HashMap::new(),
            stacks: HashMap::new(),
        }
    }

    pub(crate) fn main(mut self) -> Self {
        self.thread.is_main_thread = true;
        self
    }

    pub(crate) fn intern(&mut self, s: &str) -> TableIndex {
        if let Some(&index) = self.strings.get(s) {
            return index;
        }
        let index = self.thread.string_array.len() as TableIndex;
        self.thread.string_array.push(s.to_string());
        self.strings.insert(s.to_string(), index);
        index
    }

    /// Frame for a function name, creating function and frame on first use
    pub(crate) fn frame(&mut self, func_name: &str) -> usize {
        if let Some(&frame) = self.frames.get(func_name) {
            return frame;
        }
        let name = self.intern(func_name);
        let func = self.thread.func_table.name.len();
        self.thread.func_table.name.push(name);
        self.thread.func_table.resource.push(-1);
        self.thread.func_table.file_name.push(None);
        self.thread.func_table.is_js.push(false);

        let frame = self.thread.frame_table.func.len();
        self.thread.frame_table.func.push(func as TableIndex);
        self.thread.frame_table.category.push(None);
        self.frames.insert(func_name.to_string(), frame);
        frame
    }

    /// Stack for a root-to-leaf list of function names
    pub(crate) fn stack(&mut self, path: &[&str]) -> usize {
        let mut prefix = None;
        for name in path {
            let frame = self.frame(name);
            let stack = match self.stacks.get(&(prefix, frame)) {
                Some(&stack) => stack,
                None => {
                    let stack = self.thread.stack_table.frame.len();
                    self.thread.stack_table.frame.push(frame as TableIndex);
                    self.thread
                        .stack_table
                        .prefix
                        .push(prefix.map(|p| p as TableIndex));
                    self.thread.stack_table.category.push(None);
                    self.stacks.insert((prefix, frame), stack);
                    stack
                }
            };
            prefix = Some(stack);
        }
        prefix.expect("stack path must not be empty")
    }

    pub(crate) fn sample(&mut self, time: f64, stack: usize, cpu_delta_ns: Option<f64>) {
        let samples = &mut self.thread.samples;
        let existing = samples.stack.len();
        samples.stack.push(Some(stack as TableIndex));
        samples.time.push(time);
        if let Some(column) = samples.thread_cpu_delta.as_mut() {
            column.push(cpu_delta_ns);
        } else if let Some(delta) = cpu_delta_ns {
            let mut column = vec![None; existing];
            column.push(Some(delta));
            samples.thread_cpu_delta = Some(column);
        }
    }

    pub(crate) fn marker(
        &mut self,
        name: &str,
        category: &str,
        start: f64,
        end: Option<f64>,
        data: Option<Value>,
    ) {
        let name = self.intern(name);
        let markers = &mut self.thread.markers;
        markers.name.push(name);
        markers.start_time.push(Some(start));
        markers.end_time.push(end);
        markers.phase.push(if end.is_some() { 1 } else { 0 });
        markers.category.push(
            CATEGORIES
                .iter()
                .position(|c| *c == category)
                .map(|i| i as TableIndex)
                .unwrap_or(-1),
        );
        markers.data.push(data);
    }

    pub(crate) fn build(self) -> Thread {
        self.thread
    }
}

/// Profile with the fixture category table and a 1ms interval
pub(crate) fn profile_with(threads: Vec<Thread>) -> Profile {
    let mut profile = Profile {
        threads,
        ..Profile::default()
    };
    profile.meta.categories = CATEGORIES
        .iter()
        .map(|name| Category {
            name: name.to_string(),
            color: "grey".to_string(),
        })
        .collect();
    profile
}

/// Parsed marker on the main thread
pub(crate) fn marker(name: &str, category: &str, start: f64, duration: f64) -> ParsedMarker {
    marker_on("GeckoMain", name, category, start, duration)
}

pub(crate) fn marker_on(
    thread: &str,
    name: &str,
    category: &str,
    start: f64,
    duration: f64,
) -> ParsedMarker {
    ParsedMarker {
        name: name.to_string(),
        marker_type: name.to_string(),
        category: category.to_string(),
        start_time: start,
        duration,
        thread_name: thread.to_string(),
        data: Map::new(),
    }
}

/// Attach a JSON object payload to a marker
pub(crate) fn with_data(mut marker: ParsedMarker, data: Value) -> ParsedMarker {
    if let Value::Object(map) = data {
        if let Some(kind) = map.get("type").and_then(Value::as_str) {
            marker.marker_type = kind.to_string();
        }
        marker.data = map;
    }
    marker
}
