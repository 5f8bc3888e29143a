// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Settings file loading with override support
//!
//! Three tiers, later ones win:
//! 1. TOML file (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{validate_settings, ChewingSettings, ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default settings file name
pub const CONFIG_FILE_NAME: &str = "chewing_logging.toml";

/// Environment variable naming an explicit settings file
pub const CONFIG_PATH_ENV: &str = "CHEWING_LOG_CONFIG_PATH";

/// Find the settings file
///
/// Search order:
/// 1. `CHEWING_LOG_CONFIG_PATH` environment variable
/// 2. Current working directory: `./chewing_logging.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no settings file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        for ancestor in cwd.ancestors().skip(1).take(5) {
            search_paths.push(ancestor.join(CONFIG_FILE_NAME));
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load settings from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to the settings file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the file is not found, contains invalid TOML, or fails validation
pub fn load_settings(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<ChewingSettings> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut settings: ChewingSettings = toml::from_str(&content)?;

    apply_environment_overrides(&mut settings)?;
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut settings, cli)?;
    }

    validate_settings(&settings)?;
    Ok(settings)
}

/// Apply environment variable overrides
///
/// Supported environment variables:
/// - `CHEWING_LOG_ENABLED` -> `logging.enabled`
/// - `CHEWING_LOG_LEVELS` -> `logging.levels` (comma-separated)
/// - `CHEWING_LOG_UNKNOWN` -> `logging.log_unknown`
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a boolean variable that does not parse
pub fn apply_environment_overrides(settings: &mut ChewingSettings) -> ConfigResult<()> {
    if let Ok(value) = env::var("CHEWING_LOG_ENABLED") {
        settings.logging.enabled = parse_bool("CHEWING_LOG_ENABLED", &value)?;
    }
    if let Ok(value) = env::var("CHEWING_LOG_LEVELS") {
        settings.logging.levels = split_levels(&value);
    }
    if let Ok(value) = env::var("CHEWING_LOG_UNKNOWN") {
        settings.logging.log_unknown = parse_bool("CHEWING_LOG_UNKNOWN", &value)?;
    }
    Ok(())
}

/// Apply CLI argument overrides
///
/// # Arguments
///
/// * `settings` - Settings to modify
/// * `cli_args` - CLI arguments, e.g. `{"enabled": "true", "levels": "error,warning"}`
pub fn apply_cli_overrides(
    settings: &mut ChewingSettings,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("enabled") {
        settings.logging.enabled = parse_bool("enabled", value)?;
    }
    if let Some(value) = cli_args.get("levels") {
        settings.logging.levels = split_levels(value);
    }
    if let Some(value) = cli_args.get("log_unknown") {
        settings.logging.log_unknown = parse_bool("log_unknown", value)?;
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue(format!(
            "{} expects a boolean, got '{}'",
            key, other
        ))),
    }
}

fn split_levels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
