// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # chewing-config
//!
//! Type-safe loader for the logging settings a host application hands to the
//! Chewing log bridge:
//! - TOML file parsing (`chewing_logging.toml`)
//! - Environment variable overrides (`CHEWING_LOG_*`)
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chewing_config::load_settings;
//!
//! let settings = load_settings(None, None).expect("Failed to load logging settings");
//! println!("enabled: {}", settings.logging.enabled);
//! println!("levels: {:?}", settings.logging.levels);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_settings};
pub use types::*;
pub use validation::{validate_settings, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
