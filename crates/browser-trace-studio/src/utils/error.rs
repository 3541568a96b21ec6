//! Error types for the I/O edges of the library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//! The analysis engine itself never fails on malformed trace data; the only
//! engine-level error is `DelimiterError` in the `delimiter` module.

use thiserror::Error;

/// Errors that can occur while reading profiles or writing reports
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to read file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to (de)serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading an analysis config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
