// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for router setup.
//!
//! Nothing here crosses the native callback boundary; the adapter swallows
//! every failure. These errors surface only from host-side setup calls.

use chewing_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to spawn serial queue thread '{label}': {source}")]
    QueueSpawn {
        label: String,
        #[source]
        source: std::io::Error,
    },
}

pub type LoggerResult<T> = Result<T, LoggerError>;
