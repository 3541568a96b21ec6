mod common;

use browser_trace_studio::aggregator::analyze_call_tree;
use browser_trace_studio::output::{read_profile, validate_path, write_json};
use browser_trace_studio::utils::{load_config, ConfigError, OutputError};
use browser_trace_studio::diagnostics::Severity;
use common::{fixture_profile, write_fixture};
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_read_profile() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir);

    let profile = read_profile(&path).unwrap();
    assert_eq!(profile.threads.len(), 2);
    assert_eq!(profile.meta.categories.len(), 7);
    assert_eq!(profile.extension_base_urls(), vec!["moz-extension://ublock/"]);
    assert_eq!(profile.threads[1].tid.to_string(), "101");
}

#[test]
fn test_read_profile_missing_file() {
    let result = read_profile("/nonexistent/profile.json");
    assert!(matches!(result, Err(OutputError::ReadFailed(_))));
}

#[test]
fn test_read_profile_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    let result = read_profile(file.path());
    assert!(matches!(result, Err(OutputError::SerializationFailed(_))));
}

#[test]
fn test_partial_profile_deserializes() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"threads": [{{"name": "GeckoMain"}}]}}"#).unwrap();

    let profile = read_profile(file.path()).unwrap();
    assert_eq!(profile.meta.interval, 1.0);
    assert_eq!(analyze_call_tree(&profile, None, 10).total_samples, 0);
}

#[test]
fn test_write_json_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested/dirs/calltree.json");

    let analysis = analyze_call_tree(&fixture_profile(), None, 5);
    write_json(&analysis, &nested).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&nested).unwrap()).unwrap();
    assert_eq!(written["total_samples"], 7);
}

#[test]
fn test_write_json_larger_than_buffer_is_complete() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("names.json");

    // Well past the 8 KiB write buffer
    let names: Vec<String> = (0..2_000).map(|i| format!("function_{:05}", i)).collect();
    write_json(&names, &path).unwrap();

    let written: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.len(), 2_000);
    assert_eq!(written.last().map(String::as_str), Some("function_01999"));
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        validate_path(temp_dir.path()),
        Err(OutputError::InvalidPath(_))
    ));
}

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[call_tree]
limit = 5

[report]
min_severity = "high"

[extensions]
base_urls = ["moz-extension://extra/"]
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.call_tree.limit, Some(5));
    assert_eq!(config.report.min_severity, Some(Severity::High));
    assert_eq!(config.extensions.base_urls, vec!["moz-extension://extra/"]);
}

#[test]
fn test_load_config_errors() {
    assert!(matches!(
        load_config("/nonexistent/config.toml"),
        Err(ConfigError::ReadFailed(_))
    ));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[call_tree\nlimit = ").unwrap();
    assert!(matches!(
        load_config(file.path()),
        Err(ConfigError::ParseFailed(_))
    ));
}
