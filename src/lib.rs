//! # chewing-logging
//!
//! Forwards log output of the native Chewing input-method engine into the
//! host application's logging configuration.
//!
//! The engine reports messages through a C callback carrying only a severity
//! code and a string. This crate provides that callback, maps the code to a
//! [`LogLevel`](logger::LogLevel), filters by the host's
//! [`LoggingConfig`](logger::LoggingConfig), and hands the message either to a
//! host callback or to `tracing`.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! chewing-logging = "0.1"
//! ```
//!
//! ```rust,no_run
//! use chewing_logging::prelude::*;
//!
//! // Optional: print platform-logged messages
//! let _guard = chewing_logging::observability::init_logging_default()?;
//!
//! let config = LoggingConfig::default().with_levels([LogLevel::Error, LogLevel::Warning]);
//! let _router = Router::new(config);
//!
//! // Register with the engine
//! let _callback: NativeLogFn = native_log_callback();
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`observability`** (default): host subscriber setup
//! - **`file-logging`**: rolling JSON log files per run
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: chewing-config                             │
//! │  (LoggingSettings, TOML + env + CLI overrides)          │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: chewing-logger                                   │
//! │  (C callback, registry, Router, serial queue)           │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: chewing-observability                  │
//! │  (tracing-subscriber console / file output)             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

use std::collections::HashMap;
use std::path::Path;

pub use chewing_config as config;
pub use chewing_logger as logger;

#[cfg(feature = "observability")]
pub use chewing_observability as observability;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::logger::{
        native_log_callback, LevelSet, LogLevel, LoggingConfig, NativeLogFn, PlatformLogger,
        PlatformMethod, Router,
    };
    pub use crate::{load_logging_config, start};
}

/// Load settings (file, then env, then CLI overrides) and build a config
///
/// A callback, if any, is attached by the caller afterwards.
pub fn load_logging_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> logger::LoggerResult<logger::LoggingConfig> {
    let settings = config::load_settings(config_path, cli_args)?;
    logger::LoggingConfig::from_settings(&settings)
}

/// Construct and register the router for `config`
pub fn start(config: logger::LoggingConfig) -> std::sync::Arc<logger::Router> {
    tracing::debug!(
        enabled = config.enabled,
        levels = %config.levels,
        callback = config.callback.is_some(),
        "Starting chewing log router"
    );
    logger::Router::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!logger::VERSION.is_empty());
        assert_eq!(logger::VERSION, config::VERSION);
    }
}
