// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Global subscriber installation. Kept in one test: the global default can
//! only be set once per process.

use chewing_observability::{init_logging, CrateDebugFlags, FileLoggingConfig, ObservabilityConfig};

#[test]
fn test_init_logging_installs_once() {
    let base = tempfile::tempdir().unwrap();
    let flags = CrateDebugFlags::from_args(vec!["--debug-chewing".to_string()]);

    let file_config = ObservabilityConfig {
        file: FileLoggingConfig::in_dir(base.path()),
        ..Default::default()
    };

    let guard = if cfg!(feature = "file-logging") {
        let guard = init_logging(&file_config, &flags).unwrap();
        let run_dir = guard.run_dir().expect("file logging should report its run directory");
        assert!(run_dir.starts_with(base.path()));
        assert!(run_dir.exists());
        guard
    } else {
        assert!(init_logging(&file_config, &flags).is_err());
        let guard = init_logging(&ObservabilityConfig::default(), &flags).unwrap();
        assert!(guard.run_dir().is_none());
        guard
    };

    tracing::info!(target: "chewing", "subscriber is live");

    // A second installation must fail rather than silently replace the first.
    assert!(init_logging(&ObservabilityConfig::default(), &flags).is_err());
    drop(guard);
}
