// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Drive the log bridge the way the native engine does.
//!
//! Usage:
//!   log_bridge_demo [--config <chewing_logging.toml>] [--levels error,warning]
//!                   [--callback] [--debug-chewing] [--debug-all]
//!
//! Without `--config` the settings file is searched for and defaults are
//! used if none exists.

use std::collections::HashMap;
use std::ffi::CString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chewing_logging::config::{self, ConfigError};
use chewing_logging::logger::ffi::{
    CHEWING_LOG_DEBUG, CHEWING_LOG_ERROR, CHEWING_LOG_INFO, CHEWING_LOG_VERBOSE, CHEWING_LOG_WARN,
};
use chewing_logging::observability::{self, ObservabilityConfig};
use chewing_logging::prelude::*;

struct Args {
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
    use_callback: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config_path: None,
        overrides: HashMap::new(),
        use_callback: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config_path = Some(PathBuf::from(path));
            }
            "--levels" => {
                let levels = iter.next().context("--levels needs a value")?;
                args.overrides.insert("levels".to_string(), levels);
            }
            "--log-unknown" => {
                args.overrides.insert("log_unknown".to_string(), "true".to_string());
            }
            "--callback" => args.use_callback = true,
            "--help" | "-h" => {
                println!("{}", observability::debug_flags_help());
                std::process::exit(0);
            }
            // --debug-* flags are read by the observability crate
            _ => {}
        }
    }
    Ok(args)
}

fn load_config(args: &Args) -> Result<LoggingConfig> {
    match load_logging_config(args.config_path.as_deref(), Some(&args.overrides)) {
        Ok(config) => Ok(config),
        Err(chewing_logging::logger::LoggerError::Config(ConfigError::FileNotFound(_)))
            if args.config_path.is_none() =>
        {
            let mut settings = config::ChewingSettings::default();
            config::apply_environment_overrides(&mut settings)?;
            config::apply_cli_overrides(&mut settings, &args.overrides)?;
            config::validate_settings(&settings)?;
            Ok(LoggingConfig::from_settings(&settings)?)
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let observability_config = ObservabilityConfig {
        level: "debug".to_string(),
        thread_names: true,
        ..Default::default()
    };
    let _guard =
        observability::init_logging(&observability_config, &observability::parse_debug_flags())?;

    let mut config = load_config(&args)?;
    if args.use_callback {
        config = config
            .with_callback(|level, message| println!("callback {:>8}: {}", level, message));
    }
    tracing::info!(levels = %config.levels, enabled = config.enabled, "Log bridge configured");

    let router = start(config);
    let callback = native_log_callback();

    let samples = [
        (CHEWING_LOG_ERROR, "disk full"),
        (CHEWING_LOG_WARN, "user phrase database is read-only"),
        (CHEWING_LOG_INFO, "loaded dictionary tsi.dat"),
        (CHEWING_LOG_DEBUG, "trace"),
        (CHEWING_LOG_VERBOSE, "candidate window reset"),
        (42, "severity the engine never documented"),
    ];
    for (level, text) in samples {
        let message = CString::new(text)?;
        unsafe { callback(level, message.as_ptr()) };
    }

    router.flush();
    Ok(())
}
