//! Index resolution over the columnar tables.
//!
//! Every lookup returns `Option` and treats negative or out-of-range indices
//! as missing. Nothing in here panics on malformed input.

use std::borrow::Cow;

use super::schema::{Profile, RawMarkerTable, SamplesTable, TableIndex, Thread};
use super::strings::StringTable;
use crate::utils::config::{DEFAULT_SAMPLING_INTERVAL_MS, UNKNOWN_CATEGORY};

/// Convert a signed table index into a usable `usize`
pub fn to_index(index: TableIndex) -> Option<usize> {
    usize::try_from(index).ok()
}

fn column_index(column: &[TableIndex], row: usize) -> Option<usize> {
    column.get(row).copied().and_then(to_index)
}

impl SamplesTable {
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Stack index of sample `i`, if present and non-negative
    pub fn stack_at(&self, i: usize) -> Option<usize> {
        self.stack.get(i).copied().flatten().and_then(to_index)
    }

    /// Absolute timestamps of every sample, decoding `timeDeltas` if needed
    pub fn times(&self) -> Cow<'_, [f64]> {
        if !self.time.is_empty() || self.time_deltas.is_empty() {
            return Cow::Borrowed(&self.time);
        }
        let mut now = 0.0;
        Cow::Owned(
            self.time_deltas
                .iter()
                .map(|delta| {
                    now += delta;
                    now
                })
                .collect(),
        )
    }

    pub fn has_cpu_delta(&self) -> bool {
        self.thread_cpu_delta
            .as_ref()
            .map(|column| !column.is_empty())
            .unwrap_or(false)
    }

    /// CPU time of sample `i` in nanoseconds, when recorded
    pub fn cpu_delta_ns(&self, i: usize) -> Option<f64> {
        self.thread_cpu_delta.as_ref()?.get(i).copied().flatten()
    }
}

impl RawMarkerTable {
    pub fn len(&self) -> usize {
        self.name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl Thread {
    /// Frame of a stack node
    pub fn stack_frame(&self, stack: usize) -> Option<usize> {
        column_index(&self.stack_table.frame, stack)
    }

    /// Parent stack node; `None` at the root or on bad data
    pub fn stack_prefix(&self, stack: usize) -> Option<usize> {
        self.stack_table
            .prefix
            .get(stack)
            .copied()
            .flatten()
            .and_then(to_index)
    }

    /// Function of a frame, validated against the function table
    pub fn frame_func(&self, frame: usize) -> Option<usize> {
        column_index(&self.frame_table.func, frame).filter(|&f| f < self.func_table.name.len())
    }

    /// Function of the leaf frame of a stack node
    pub fn stack_func(&self, stack: usize) -> Option<usize> {
        self.stack_frame(stack).and_then(|frame| self.frame_func(frame))
    }

    /// String index of a function's name
    pub fn func_name_index(&self, func: usize) -> Option<TableIndex> {
        self.func_table.name.get(func).copied()
    }

    /// String index of the resource (script or library) a function belongs to
    pub fn func_resource_name_index(&self, func: usize) -> Option<TableIndex> {
        let resource = column_index(&self.func_table.resource, func)?;
        self.resource_table.name.get(resource).copied()
    }

    pub fn is_main(&self) -> bool {
        self.is_main_thread
    }
}

impl Profile {
    /// String array for a thread: its own, or the shared one when empty
    pub fn strings_for<'a>(&'a self, thread: &'a Thread) -> StringTable<'a> {
        if thread.string_array.is_empty() {
            StringTable::new(&self.shared.string_array)
        } else {
            StringTable::new(&thread.string_array)
        }
    }

    /// Name of a category, "Unknown" when unresolvable
    pub fn category_name(&self, index: Option<TableIndex>) -> &str {
        index
            .and_then(to_index)
            .and_then(|i| self.meta.categories.get(i))
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn sampling_interval_ms(&self) -> f64 {
        if self.meta.interval > 0.0 {
            self.meta.interval
        } else {
            DEFAULT_SAMPLING_INTERVAL_MS
        }
    }

    /// Time attributed to sample `i`: its CPU delta when positive, else the interval
    pub fn sample_weight_ms(&self, thread: &Thread, i: usize) -> f64 {
        match thread.samples.cpu_delta_ns(i) {
            Some(delta) if delta > 0.0 => delta / 1_000_000.0,
            _ => self.sampling_interval_ms(),
        }
    }

    /// Total CPU time of a thread across all of its samples
    pub fn thread_cpu_time_ms(&self, thread: &Thread) -> f64 {
        (0..thread.samples.len())
            .map(|i| self.sample_weight_ms(thread, i))
            .sum()
    }

    /// Wall-clock duration of the profile in ms
    ///
    /// Uses the declared profiling range when available, otherwise the span
    /// of all sample and marker timestamps. Returns 0 for an empty profile.
    pub fn duration_ms(&self) -> f64 {
        if let (Some(start), Some(end)) =
            (self.meta.profiling_start_time, self.meta.profiling_end_time)
        {
            if end > start {
                return end - start;
            }
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for thread in &self.threads {
            for &t in thread.samples.times().iter() {
                min = min.min(t);
                max = max.max(t);
            }
            let markers = &thread.markers;
            for t in markers
                .start_time
                .iter()
                .chain(markers.end_time.iter())
                .flatten()
            {
                min = min.min(*t);
                max = max.max(*t);
            }
        }

        if max > min {
            max - min
        } else {
            0.0
        }
    }

    /// Extension base URLs recorded in the profile metadata
    pub fn extension_base_urls(&self) -> Vec<String> {
        self.meta
            .extensions
            .base_url
            .iter()
            .filter(|url| !url.is_empty())
            .cloned()
            .collect()
    }

    /// Threads whose name contains `filter` (case-insensitive); all when empty
    pub fn find_threads(&self, filter: Option<&str>) -> Vec<&Thread> {
        match filter.map(str::trim).filter(|f| !f.is_empty()) {
            None => self.threads.iter().collect(),
            Some(filter) => {
                let needle = filter.to_lowercase();
                self.threads
                    .iter()
                    .filter(|t| t.name.to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }
}
