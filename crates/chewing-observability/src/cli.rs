//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-chewing` and `--debug-chewing-logger`
//! to raise individual targets to debug level.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Per-crate debug flags
///
/// # Example
/// ```rust
/// use chewing_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-chewing".to_string()]);
/// assert!(flags.is_enabled("chewing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`.
    /// Also supports `--debug-all` to enable all known crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                if !crate_name.is_empty() {
                    flags.enabled_crates.insert(crate_name.to_string());
                }
            }
        }

        flags
    }

    pub fn enable_all(&mut self) {
        self.enabled_crates
            .extend(KNOWN_CRATES.iter().map(|c| c.to_string()));
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Level for a crate: `DEBUG` if enabled, `INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directives for the enabled crates, on top of `default_level`.
    ///
    /// Crate names are turned into targets (`chewing-logger` -> `chewing_logger`).
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters = vec![default_level.to_string()];
        filters.extend(
            self.enabled_crates
                .iter()
                .map(|name| format!("{}=debug", name.replace('-', "_"))),
        );
        filters.join(",")
    }
}

/// Parse debug flags from the process arguments and `CHEWING_DEBUG`
///
/// `CHEWING_DEBUG` holds comma-separated crate names, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(value) = env::var("CHEWING_DEBUG") {
        apply_debug_env(&mut flags, &value);
    }
    flags
}

fn apply_debug_env(flags: &mut CrateDebugFlags, value: &str) {
    if value.trim() == "all" {
        flags.enable_all();
        return;
    }
    for crate_name in value.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        flags.enabled_crates.insert(crate_name.to_string());
    }
}

/// Help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  CHEWING_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  CHEWING_DEBUG=all                             Enable debug for all crates

Examples:
  --debug-chewing
  --debug-chewing --debug-chewing-logger
  CHEWING_DEBUG=chewing,chewing-config
"#,
        KNOWN_CRATES.join(", ")
    )
}
