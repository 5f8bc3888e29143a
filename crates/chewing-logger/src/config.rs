// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Host-facing logging configuration.

use std::fmt;
use std::sync::Arc;

use chewing_config::{ChewingSettings, LoggingSettings};

use crate::error::LoggerError;
use crate::level::{LevelSet, LogLevel};

/// User callback receiving every message that passes the filter
pub type LogCallback = Arc<dyn Fn(LogLevel, String) + Send + Sync>;

/// Logging configuration owned by the host application
///
/// A [`crate::Router`] keeps its own copy, so changing a config after
/// constructing a router has no effect on that router.
#[derive(Clone)]
pub struct LoggingConfig {
    /// Master switch
    pub enabled: bool,

    /// Levels that are forwarded
    pub levels: LevelSet,

    /// Receives messages instead of the platform logger when set.
    /// Runs synchronously on the thread that emitted the message. It should
    /// not panic: a panic is contained at the native boundary, but the
    /// process panic hook still runs and prints to stderr.
    pub callback: Option<LogCallback>,

    /// Forward [`LogLevel::Unknown`] messages regardless of `levels`
    pub log_unknown: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            levels: LevelSet::from([
                LogLevel::Critical,
                LogLevel::Error,
                LogLevel::Warning,
                LogLevel::Info,
            ]),
            callback: None,
            log_unknown: false,
        }
    }
}

impl LoggingConfig {
    pub fn new(enabled: bool, levels: impl Into<LevelSet>) -> Self {
        Self {
            enabled,
            levels: levels.into(),
            ..Default::default()
        }
    }

    /// A configuration that forwards nothing
    pub fn disabled() -> Self {
        Self::new(false, LevelSet::empty())
    }

    pub fn with_levels(mut self, levels: impl Into<LevelSet>) -> Self {
        self.levels = levels.into();
        self
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(LogLevel, String) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn with_log_unknown(mut self, log_unknown: bool) -> Self {
        self.log_unknown = log_unknown;
        self
    }

    /// Whether a message at `level` passes the enable and level filters
    pub fn allows(&self, level: LogLevel) -> bool {
        if !self.enabled {
            return false;
        }
        if level.is_unknown() {
            return self.log_unknown;
        }
        self.levels.contains(level)
    }

    /// Build from loaded settings. Any callback must be attached afterwards.
    pub fn from_settings(settings: &ChewingSettings) -> Result<Self, LoggerError> {
        Self::try_from(&settings.logging)
    }
}

impl TryFrom<&LoggingSettings> for LoggingConfig {
    type Error = LoggerError;

    fn try_from(settings: &LoggingSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            enabled: settings.enabled,
            levels: LevelSet::from_names(&settings.levels)?,
            callback: None,
            log_unknown: settings.log_unknown,
        })
    }
}

impl fmt::Debug for LoggingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingConfig")
            .field("enabled", &self.enabled)
            .field("levels", &self.levels)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .field("log_unknown", &self.log_unknown)
            .finish()
    }
}
