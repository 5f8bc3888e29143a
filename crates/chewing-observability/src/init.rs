// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Subscriber initialization for host processes
//!
//! Installs a console layer and, with the `file-logging` feature, a JSON file
//! layer in a timestamped run directory:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── chewing.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, TimeZone, Utc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{FileLoggingConfig, LogFormat, LogOutput, ObservabilityConfig};

const RUN_DIR_PREFIX: &str = "run_";
const RUN_DIR_FORMAT: &str = "%Y%m%d_%H%M%S";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file writers alive; logs are flushed when it is dropped
#[derive(Default)]
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    run_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Directory of this run's log files, if file logging is on
    pub fn run_dir(&self) -> Option<&Path> {
        self.run_dir.as_deref()
    }
}

/// Filter combining the configured level with per-crate debug flags
pub fn build_env_filter(
    config: &ObservabilityConfig,
    debug_flags: &CrateDebugFlags,
) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(&config.level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

/// Install the global subscriber
///
/// # Errors
/// Fails on an invalid filter, when file logging is requested without the
/// `file-logging` feature, when the run directory cannot be created, or when
/// a global subscriber is already installed.
pub fn init_logging(
    config: &ObservabilityConfig,
    debug_flags: &CrateDebugFlags,
) -> Result<LoggingGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(console_layer(config, build_env_filter(config, debug_flags)?));

    #[cfg_attr(not(feature = "file-logging"), allow(unused_mut))]
    let mut guard = LoggingGuard::default();
    if config.file.enabled {
        #[cfg(feature = "file-logging")]
        {
            let run_dir = create_run_dir(&config.file.log_dir)?;
            let removed = cleanup_old_logs(
                &config.file.log_dir,
                config.file.retention_days,
                config.file.retention_runs,
                &run_dir,
            )?;
            if removed > 0 {
                eprintln!(
                    "Removed {} old log run(s) from {}",
                    removed,
                    config.file.log_dir.display()
                );
            }
            layers.push(file_layer(config, debug_flags, &run_dir, &mut guard)?);
            guard.run_dir = Some(run_dir);
        }
        #[cfg(not(feature = "file-logging"))]
        anyhow::bail!("File logging requested but the `file-logging` feature is disabled");
    }

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(guard)
}

/// Initialize with default settings and debug flags from the environment
pub fn init_logging_default() -> Result<LoggingGuard> {
    init_logging(&ObservabilityConfig::default(), &crate::cli::parse_debug_flags())
}

fn console_layer(config: &ObservabilityConfig, filter: EnvFilter) -> BoxedLayer {
    let base = fmt::layer::<Registry>()
        .with_target(true)
        .with_thread_names(config.thread_names);

    match (config.format, config.output) {
        (LogFormat::Text, LogOutput::Stdout) => {
            base.with_writer(std::io::stdout).with_filter(filter).boxed()
        }
        (LogFormat::Text, LogOutput::Stderr) => {
            base.with_writer(std::io::stderr).with_filter(filter).boxed()
        }
        (LogFormat::Json, LogOutput::Stdout) => {
            base.json().with_writer(std::io::stdout).with_filter(filter).boxed()
        }
        (LogFormat::Json, LogOutput::Stderr) => {
            base.json().with_writer(std::io::stderr).with_filter(filter).boxed()
        }
    }
}

#[cfg(feature = "file-logging")]
fn file_layer(
    config: &ObservabilityConfig,
    debug_flags: &CrateDebugFlags,
    run_dir: &Path,
    guard: &mut LoggingGuard,
) -> Result<BoxedLayer> {
    let appender = tracing_appender::rolling::daily(run_dir, "chewing.log");
    let (non_blocking, worker_guard) = tracing_appender::non_blocking(appender);
    guard._file_guard = Some(worker_guard);

    Ok(fmt::layer::<Registry>()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .json()
        .with_filter(build_env_filter(config, debug_flags)?)
        .boxed())
}

/// Create `base/run_<timestamp>`
pub fn create_run_dir(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = Utc::now().format(RUN_DIR_FORMAT);
    let run_dir = base_log_dir.join(format!("{}{}", RUN_DIR_PREFIX, timestamp));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create log directory: {}", run_dir.display()))?;
    Ok(run_dir)
}

/// Remove old run directories, returning how many were removed
///
/// Runs older than `retention_days` go first; then the oldest remaining runs
/// until at most `retention_runs` are left. `keep` is never removed. A
/// `retention_days` too large to represent as a date never expires a run.
pub fn cleanup_old_logs(
    base_log_dir: &Path,
    retention_days: u64,
    retention_runs: usize,
    keep: &Path,
) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = i64::try_from(retention_days)
        .ok()
        .and_then(chrono::Duration::try_days)
        .and_then(|age| Utc::now().checked_sub_signed(age));

    let mut runs = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() || path == keep {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_DIR_PREFIX))
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_DIR_FORMAT).ok())
            .map(|naive| Utc.from_utc_datetime(&naive));
        if let Some(started) = started {
            runs.push((path, started));
        }
    }

    // Oldest first
    runs.sort_by_key(|(_, started)| *started);

    let expired = match cutoff {
        Some(cutoff) => runs.iter().filter(|(_, started)| *started < cutoff).count(),
        None => 0,
    };
    // `keep` counts toward the retained runs.
    let over_limit = (runs.len() + 1).saturating_sub(retention_runs);
    let to_remove = expired.max(over_limit).min(runs.len());

    let mut removed = 0;
    for (path, _) in runs.iter().take(to_remove) {
        match std::fs::remove_dir_all(path) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            ),
        }
    }

    Ok(removed)
}

/// Paths of the run directories under `base_log_dir`, oldest first
pub fn list_runs(base_log_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut runs: Vec<PathBuf> = std::fs::read_dir(base_log_dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(RUN_DIR_PREFIX))
        })
        .collect();
    runs.sort();
    Ok(runs)
}

impl FileLoggingConfig {
    /// File logging under `log_dir` with default retention
    pub fn in_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            log_dir: log_dir.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_run(base: &Path, started: chrono::DateTime<Utc>) -> PathBuf {
        let dir = base.join(format!("{}{}", RUN_DIR_PREFIX, started.format(RUN_DIR_FORMAT)));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_filter_accepts_debug_flags() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-chewing".to_string()]);
        let filter = build_env_filter(&ObservabilityConfig::default(), &flags).unwrap();
        assert!(filter.to_string().contains("chewing=debug"));
    }

    #[test]
    fn test_filter_rejects_garbage() {
        let config = ObservabilityConfig {
            level: "chewing=loud".to_string(),
            ..Default::default()
        };
        assert!(build_env_filter(&config, &CrateDebugFlags::default()).is_err());
    }

    #[test]
    fn test_cleanup_removes_expired_runs() {
        let base = tempdir().unwrap();
        let now = Utc::now();
        let old = make_run(base.path(), now - chrono::Duration::days(40));
        let recent = make_run(base.path(), now - chrono::Duration::days(1));
        let current = create_run_dir(base.path()).unwrap();

        let removed = cleanup_old_logs(base.path(), 30, 10, &current).unwrap();

        assert_eq!(removed, 1);
        assert!(!old.exists());
        assert!(recent.exists());
        assert!(current.exists());
    }

    #[test]
    fn test_cleanup_with_unbounded_retention_keeps_runs() {
        let base = tempdir().unwrap();
        let recent = make_run(base.path(), Utc::now() - chrono::Duration::hours(2));
        let current = create_run_dir(base.path()).unwrap();

        for days in [u64::MAX, i64::MAX as u64, 200_000_000_000] {
            let removed = cleanup_old_logs(base.path(), days, 100, &current).unwrap();
            assert_eq!(removed, 0, "retention_days = {}", days);
            assert!(recent.exists());
        }
        assert!(current.exists());
    }

    #[test]
    fn test_cleanup_enforces_run_count() {
        let base = tempdir().unwrap();
        let now = Utc::now();
        let runs: Vec<PathBuf> = (1..=4)
            .map(|h| make_run(base.path(), now - chrono::Duration::hours(h)))
            .collect();
        let current = create_run_dir(base.path()).unwrap();

        let removed = cleanup_old_logs(base.path(), 30, 3, &current).unwrap();

        // current + the two newest survive
        assert_eq!(removed, 2);
        assert!(runs[0].exists());
        assert!(runs[1].exists());
        assert!(!runs[2].exists());
        assert!(!runs[3].exists());
        assert_eq!(list_runs(base.path()).unwrap().len(), 3);
    }

    #[test]
    fn test_cleanup_ignores_foreign_directories() {
        let base = tempdir().unwrap();
        std::fs::create_dir_all(base.path().join("archive")).unwrap();
        let current = create_run_dir(base.path()).unwrap();

        assert_eq!(cleanup_old_logs(base.path(), 0, 1, &current).unwrap(), 0);
        assert!(base.path().join("archive").exists());
    }

    #[test]
    fn test_missing_base_dir_is_fine() {
        let base = tempdir().unwrap();
        let missing = base.path().join("nope");
        assert_eq!(cleanup_old_logs(&missing, 30, 10, &missing).unwrap(), 0);
    }
}
