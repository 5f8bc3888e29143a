// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Settings validation
//!
//! Ensures the level list only names levels the log bridge understands.

use crate::{
    canonical_level_name, ChewingSettings, ConfigError, ConfigResult, ALL_LEVELS, LEVEL_NAMES,
};

/// Validation errors that can occur during settings validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    UnknownLevel { name: String },
    EmptyLevels,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel { name } => write!(
                f,
                "logging.levels contains unknown level '{}' (expected one of: {}, {})",
                name,
                LEVEL_NAMES.join(", "),
                ALL_LEVELS
            ),
            Self::EmptyLevels => write!(
                f,
                "logging.levels is empty while logging is enabled; nothing would be forwarded"
            ),
        }
    }
}

/// Validate the complete settings
///
/// Checks for:
/// - Unknown level names
/// - An empty level list on enabled logging
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_settings(settings: &ChewingSettings) -> ConfigResult<()> {
    let errors = collect_errors(settings);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

fn collect_errors(settings: &ChewingSettings) -> Vec<ConfigValidationError> {
    let logging = &settings.logging;
    let mut errors: Vec<ConfigValidationError> = logging
        .levels
        .iter()
        .filter(|name| {
            !name.trim().eq_ignore_ascii_case(ALL_LEVELS) && canonical_level_name(name).is_none()
        })
        .map(|name| ConfigValidationError::UnknownLevel { name: name.clone() })
        .collect();

    // An opted-in unknown-level path still forwards something with no levels.
    if logging.enabled && logging.levels.is_empty() && !logging.log_unknown {
        errors.push(ConfigValidationError::EmptyLevels);
    }

    errors
}
