//! Reading profiles and writing analysis results.
//!
//! This module handles the file and terminal edges of the library:
//! - JSON profiles in, pretty JSON results out
//! - Text renderings of call trees and delimiter measurements

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_profile, write_json};
pub use text::{render_call_tree, render_delimiter_markers, render_measurement};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
