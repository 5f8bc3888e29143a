// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # chewing-observability
//!
//! Subscriber setup for applications hosting the Chewing log bridge.
//!
//! Engine messages that reach the platform logger are `tracing` events with
//! target `chewing`; this crate installs the subscriber that prints or stores
//! them, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: Daily-rolling log files in a timestamped run directory

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Names accepted by `--debug-<name>`.
///
/// `chewing` is the target of forwarded engine messages; the rest are the
/// workspace crates' own diagnostics.
pub const KNOWN_CRATES: &[&str] = &[
    "chewing",
    "chewing-logger",
    "chewing-config",
    "chewing-observability",
];
