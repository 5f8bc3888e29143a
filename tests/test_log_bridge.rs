//! Settings file to native callback, through the umbrella crate.

use std::collections::HashMap;
use std::ffi::CString;
use std::sync::{Arc, Mutex};

use chewing_logging::logger::ffi::{CHEWING_LOG_DEBUG, CHEWING_LOG_ERROR, CHEWING_LOG_WARN};
use chewing_logging::logger::registry;
use chewing_logging::prelude::*;

static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

#[derive(Default)]
struct RecordingLogger {
    entries: Mutex<Vec<(PlatformMethod, String)>>,
}

impl PlatformLogger for RecordingLogger {
    fn emit(&self, method: PlatformMethod, message: &str) {
        self.entries.lock().unwrap().push((method, message.to_string()));
    }
}

fn send(level: i32, text: &str) {
    let message = CString::new(text).unwrap();
    unsafe { native_log_callback()(level, message.as_ptr()) };
}

#[test]
fn test_settings_file_drives_filtering() {
    let _lock = REGISTRY_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chewing_logging.toml");
    std::fs::write(&path, "[logging]\nlevels = [\"error\", \"warning\"]\n").unwrap();

    let config = load_logging_config(Some(&path), None).unwrap();
    let platform = Arc::new(RecordingLogger::default());
    let router = Router::with_platform_logger(config, platform.clone());

    send(CHEWING_LOG_ERROR, "disk full");
    send(CHEWING_LOG_DEBUG, "trace");
    router.flush();

    assert_eq!(
        *platform.entries.lock().unwrap(),
        vec![(PlatformMethod::Error, "[chewing]disk full".to_string())]
    );
    registry::clear();
}

#[test]
fn test_cli_override_and_callback() {
    let _lock = REGISTRY_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chewing_logging.toml");
    std::fs::write(&path, "[logging]\nlevels = [\"error\"]\n").unwrap();

    let mut cli = HashMap::new();
    cli.insert("levels".to_string(), "warning".to_string());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let config = load_logging_config(Some(&path), Some(&cli))
        .unwrap()
        .with_callback(move |level, message| seen_clone.lock().unwrap().push((level, message)));
    let _router = start(config);

    send(CHEWING_LOG_ERROR, "filtered by override");
    send(CHEWING_LOG_WARN, "kept");

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(LogLevel::Warning, "[chewing]kept".to_string())]
    );
    registry::clear();
}

#[test]
fn test_invalid_settings_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chewing_logging.toml");
    std::fs::write(&path, "[logging]\nlevels = [\"shouting\"]\n").unwrap();

    assert!(load_logging_config(Some(&path), None).is_err());
}
