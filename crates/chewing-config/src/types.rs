// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines the structs that map to sections in
//! `chewing_logging.toml`.

use serde::{Deserialize, Serialize};

/// Canonical level names, most severe first.
pub const LEVEL_NAMES: &[&str] = &["critical", "error", "warning", "info", "debug", "verbose"];

/// Shorthand accepted in `levels` for every canonical level.
pub const ALL_LEVELS: &str = "all";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChewingSettings {
    pub logging: LoggingSettings,
}

/// Settings for forwarding engine log output to the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Master switch; nothing is forwarded when false
    pub enabled: bool,

    /// Allowed level names (see [`LEVEL_NAMES`]), or `"all"`
    pub levels: Vec<String>,

    /// Forward messages whose native severity code is not recognized
    pub log_unknown: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            levels: vec![
                "critical".to_string(),
                "error".to_string(),
                "warning".to_string(),
                "info".to_string(),
            ],
            log_unknown: false,
        }
    }
}

impl LoggingSettings {
    /// Canonical level names, expanded and deduplicated, in severity order.
    ///
    /// Unknown names are skipped; [`crate::validate_settings`] reports them.
    pub fn canonical_levels(&self) -> Vec<&'static str> {
        let mut wanted = [false; 6];
        for name in &self.levels {
            if name.trim().eq_ignore_ascii_case(ALL_LEVELS) {
                wanted = [true; 6];
                continue;
            }
            if let Some(canonical) = canonical_level_name(name) {
                if let Some(idx) = LEVEL_NAMES.iter().position(|n| *n == canonical) {
                    wanted[idx] = true;
                }
            }
        }
        LEVEL_NAMES
            .iter()
            .zip(wanted)
            .filter_map(|(name, on)| on.then_some(*name))
            .collect()
    }
}

/// Map a user-supplied level name (case-insensitive, with common aliases) to
/// its canonical spelling.
pub fn canonical_level_name(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_lowercase().as_str() {
        "critical" | "fatal" => Some("critical"),
        "error" => Some("error"),
        "warning" | "warn" => Some("warning"),
        "info" => Some("info"),
        "debug" => Some("debug"),
        "verbose" | "trace" => Some("verbose"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_logging_section() {
        let settings: ChewingSettings = toml::from_str(
            r#"
            [logging]
            enabled = false
            levels = ["error", "Warn"]
            log_unknown = true
            "#,
        )
        .unwrap();

        assert!(!settings.logging.enabled);
        assert!(settings.logging.log_unknown);
        assert_eq!(settings.logging.canonical_levels(), vec!["error", "warning"]);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let settings: ChewingSettings = toml::from_str("").unwrap();
        assert_eq!(settings.logging, LoggingSettings::default());
    }

    #[test]
    fn test_all_expands_to_every_level() {
        let settings = LoggingSettings {
            levels: vec!["ALL".to_string()],
            ..Default::default()
        };
        assert_eq!(settings.canonical_levels(), LEVEL_NAMES.to_vec());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(canonical_level_name("trace"), Some("verbose"));
        assert_eq!(canonical_level_name(" FATAL "), Some("critical"));
        assert_eq!(canonical_level_name("notice"), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(LoggingSettings::default()).unwrap();
        assert_eq!(json["enabled"], true);
        assert_eq!(json["levels"].as_array().unwrap().len(), 4);
        assert_eq!(json["log_unknown"], false);
    }
}
