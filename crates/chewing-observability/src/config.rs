//! Observability configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Subscriber configuration for a host process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Base filter directive (trace, debug, info, warn, error, or full `EnvFilter` syntax)
    pub level: String,

    /// Console format
    pub format: LogFormat,

    /// Console destination
    pub output: LogOutput,

    /// Include thread names; forwarded engine messages run on the serial queue thread
    pub thread_names: bool,

    pub file: FileLoggingConfig,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Console destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    Stderr,
}

/// Rolling file output (requires the `file-logging` feature)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub enabled: bool,

    /// Base directory; each run gets a `run_YYYYmmdd_HHMMSS` subdirectory
    pub log_dir: PathBuf,

    /// Remove runs older than this many days
    pub retention_days: u64,

    /// Keep at most this many runs
    pub retention_runs: usize,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            level: "info".to_string(),
            format: LogFormat::Text,
            output: LogOutput::Stderr,
            thread_names: false,
            file: FileLoggingConfig::default(),
        }
    }
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        FileLoggingConfig {
            enabled: false,
            log_dir: PathBuf::from("./logs"),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
