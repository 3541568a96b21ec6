//! Marker extraction and filtering.
//!
//! Turns a thread's raw marker columns into typed `ParsedMarker` records
//! that the call tree, diagnostics and delimiter modules consume.

pub mod extractor;
pub mod filter;
pub mod schema;

pub use extractor::{extract_all_markers, extract_markers, normalize_payload};
pub use filter::{by_category, by_duration, by_name, by_type};
pub use schema::ParsedMarker;
