// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Platform logger used when the host supplies no callback.
//!
//! Messages become `tracing` events with target [`SUBSYSTEM`] and a
//! `category` field of [`CATEGORY`]. Whatever subscriber the host installs
//! decides where they end up.

use crate::level::LogLevel;

/// Event target of forwarded engine messages
pub const SUBSYSTEM: &str = "chewing";

/// Value of the `category` field on forwarded engine messages
pub const CATEGORY: &str = "ChewingLogger";

/// Severity method of the platform logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformMethod {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    Notice,
}

impl PlatformMethod {
    /// Debug and verbose share the debug method; unknown levels go to notice.
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical => PlatformMethod::Critical,
            LogLevel::Error => PlatformMethod::Error,
            LogLevel::Warning => PlatformMethod::Warning,
            LogLevel::Info => PlatformMethod::Info,
            LogLevel::Debug | LogLevel::Verbose => PlatformMethod::Debug,
            LogLevel::Unknown(_) => PlatformMethod::Notice,
        }
    }
}

/// Text handed to the platform logger for a message at `level`
pub fn platform_message(level: LogLevel, message: String) -> String {
    match level {
        LogLevel::Unknown(_) => format!("Unknown log level: {}, {}", level, message),
        _ => message,
    }
}

/// Sink for messages that have no user callback
///
/// Implementations are called from the serial queue's worker thread.
pub trait PlatformLogger: Send + Sync {
    fn emit(&self, method: PlatformMethod, message: &str);
}

/// [`PlatformLogger`] backed by `tracing`
///
/// `tracing` has no critical or notice level: critical is emitted at
/// `ERROR` and notice at `INFO`, each with a `severity` field naming the
/// original method.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl PlatformLogger for TracingLogger {
    fn emit(&self, method: PlatformMethod, message: &str) {
        match method {
            PlatformMethod::Critical => tracing::error!(
                target: SUBSYSTEM,
                category = CATEGORY,
                severity = "critical",
                "{}",
                message
            ),
            PlatformMethod::Error => {
                tracing::error!(target: SUBSYSTEM, category = CATEGORY, "{}", message)
            }
            PlatformMethod::Warning => {
                tracing::warn!(target: SUBSYSTEM, category = CATEGORY, "{}", message)
            }
            PlatformMethod::Info => {
                tracing::info!(target: SUBSYSTEM, category = CATEGORY, "{}", message)
            }
            PlatformMethod::Debug => {
                tracing::debug!(target: SUBSYSTEM, category = CATEGORY, "{}", message)
            }
            PlatformMethod::Notice => tracing::info!(
                target: SUBSYSTEM,
                category = CATEGORY,
                severity = "notice",
                "{}",
                message
            ),
        }
    }
}
