//! Normalized in-memory trace model.
//!
//! A `Profile` is built once by the loader and is read-only for the whole
//! analysis. All engine components take `&Profile` and keep no state.

pub mod schema;
pub mod strings;
pub mod tables;

#[cfg(test)]
pub(crate) mod test_support;

pub use schema::{
    Category, ExtensionTable, FrameTable, FuncTable, MarkerPhase, ProcessId, Profile,
    ProfileMeta, RawMarkerTable, ResourceTable, SamplesTable, SharedTables, StackTable,
    TableIndex, Thread,
};
pub use strings::StringTable;
pub use tables::to_index;
