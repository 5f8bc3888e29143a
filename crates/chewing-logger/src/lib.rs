// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # chewing-logger
//!
//! Forwards log output of the native Chewing engine into the host
//! application's logging configuration.
//!
//! ```text
//! native engine ──► chewing_log_callback ──► registry ──► Router
//!                                                         ├─► user callback (same thread)
//!                                                         └─► serial queue ──► PlatformLogger (tracing)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chewing_logger::{native_log_callback, LogLevel, LoggingConfig, Router};
//!
//! let config = LoggingConfig::default()
//!     .with_levels([LogLevel::Error, LogLevel::Warning])
//!     .with_callback(|level, message| eprintln!("{level}: {message}"));
//! let _router = Router::new(config);
//!
//! // Hand this to the engine's logger registration API.
//! let _callback = native_log_callback();
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod ffi;
pub mod level;
pub mod platform;
pub mod queue;
pub mod registry;
pub mod router;

pub use config::{LogCallback, LoggingConfig};
pub use error::{LoggerError, LoggerResult};
pub use ffi::{
    chewing_log_callback, chewing_log_callback_with_data, native_log_callback,
    native_log_callback_with_data, NativeLogFn, NativeLogWithDataFn, MESSAGE_PREFIX,
};
pub use level::{LevelSet, LogLevel};
pub use platform::{PlatformLogger, PlatformMethod, TracingLogger, CATEGORY, SUBSYSTEM};
pub use queue::SerialQueue;
pub use router::Router;
