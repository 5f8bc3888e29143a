// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end behavior of the native callback through the active router.

use std::ffi::{c_char, CString};
use std::ptr;
use std::sync::{Arc, Mutex, MutexGuard};

use chewing_logger::ffi::{CHEWING_LOG_DEBUG, CHEWING_LOG_ERROR, CHEWING_LOG_VERBOSE};
use chewing_logger::{
    native_log_callback, registry, LevelSet, LogLevel, LoggingConfig, PlatformLogger,
    PlatformMethod, Router,
};

static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

fn registry_lock() -> MutexGuard<'static, ()> {
    REGISTRY_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Default)]
struct RecordingLogger {
    entries: Mutex<Vec<(PlatformMethod, String)>>,
}

impl RecordingLogger {
    fn take(&self) -> Vec<(PlatformMethod, String)> {
        std::mem::take(&mut *self.entries.lock().unwrap())
    }
}

impl PlatformLogger for RecordingLogger {
    fn emit(&self, method: PlatformMethod, message: &str) {
        self.entries.lock().unwrap().push((method, message.to_string()));
    }
}

fn send(level: i32, message: &str) {
    let message = CString::new(message).unwrap();
    let callback = native_log_callback();
    unsafe { callback(level, message.as_ptr()) };
}

fn error_warning_router() -> (Arc<Router>, Arc<RecordingLogger>) {
    let platform = Arc::new(RecordingLogger::default());
    let config = LoggingConfig::new(true, [LogLevel::Error, LogLevel::Warning]);
    let router = Router::with_platform_logger(config, platform.clone());
    (router, platform)
}

#[test]
fn test_error_reaches_platform_error_method() {
    let _lock = registry_lock();
    let (router, platform) = error_warning_router();

    send(CHEWING_LOG_ERROR, "disk full");
    router.flush();

    assert_eq!(
        platform.take(),
        vec![(PlatformMethod::Error, "[chewing]disk full".to_string())]
    );
    registry::clear();
}

#[test]
fn test_debug_is_filtered_out() {
    let _lock = registry_lock();
    let (router, platform) = error_warning_router();

    send(CHEWING_LOG_DEBUG, "trace");
    router.flush();

    assert!(platform.take().is_empty());
    registry::clear();
}

#[test]
fn test_unrecognized_code_is_dropped() {
    let _lock = registry_lock();
    let platform = Arc::new(RecordingLogger::default());
    let router = Router::with_platform_logger(
        LoggingConfig::new(true, LevelSet::all()),
        platform.clone(),
    );

    send(0, "zero");
    send(77, "seventy-seven");
    router.flush();

    assert!(platform.take().is_empty());
    registry::clear();
}

#[test]
fn test_callback_replaces_platform_logger() {
    let _lock = registry_lock();
    let platform = Arc::new(RecordingLogger::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let config = LoggingConfig::new(true, LevelSet::all())
        .with_callback(move |level, message| seen_clone.lock().unwrap().push((level, message)));
    let router = Router::with_platform_logger(config, platform.clone());

    send(CHEWING_LOG_VERBOSE, "chatty");
    router.flush();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(LogLevel::Verbose, "[chewing]chatty".to_string())]
    );
    assert!(platform.take().is_empty());
    registry::clear();
}

#[test]
fn test_new_router_replaces_old_one() {
    let _lock = registry_lock();
    let (old_router, old_platform) = error_warning_router();
    let (new_router, new_platform) = error_warning_router();

    send(CHEWING_LOG_ERROR, "after replacement");
    old_router.flush();
    new_router.flush();

    assert!(old_platform.take().is_empty());
    assert_eq!(new_platform.take().len(), 1);
    registry::clear();
}

#[test]
fn test_null_pointer_has_no_effect() {
    let _lock = registry_lock();
    let (router, platform) = error_warning_router();

    let callback = native_log_callback();
    unsafe { callback(CHEWING_LOG_ERROR, ptr::null::<c_char>()) };
    router.flush();

    assert!(platform.take().is_empty());
    registry::clear();
}

#[test]
fn test_messages_before_any_router_are_dropped() {
    let _lock = registry_lock();
    registry::clear();

    send(CHEWING_LOG_ERROR, "too early");

    let (router, platform) = error_warning_router();
    router.flush();
    assert!(platform.take().is_empty());
    registry::clear();
}

#[test]
fn test_platform_output_keeps_order_across_threads() {
    let _lock = registry_lock();
    let platform = Arc::new(RecordingLogger::default());
    let router = Router::with_platform_logger(
        LoggingConfig::new(true, LevelSet::all()),
        platform.clone(),
    );

    let worker = std::thread::spawn(|| {
        for i in 0..50 {
            send(CHEWING_LOG_ERROR, &format!("worker {}", i));
        }
    });
    worker.join().unwrap();
    router.flush();

    let messages: Vec<String> = platform.take().into_iter().map(|(_, m)| m).collect();
    let expected: Vec<String> = (0..50).map(|i| format!("[chewing]worker {}", i)).collect();
    assert_eq!(messages, expected);
    registry::clear();
}
