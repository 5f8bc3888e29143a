// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! C-ABI entry points handed to the native engine.
//!
//! Nothing may unwind across these functions. Every failure (null buffer,
//! no active router, invalid UTF-8, a panicking callback) ends in a no-op.
//! A caught panic still goes through the process panic hook, which prints
//! to stderr unless the host replaces it.

use std::ffi::{c_char, c_void, CStr};
use std::panic::{self, AssertUnwindSafe};

use crate::level::LogLevel;
use crate::registry;
use crate::router::Router;

pub const CHEWING_LOG_VERBOSE: i32 = 1;
pub const CHEWING_LOG_DEBUG: i32 = 2;
pub const CHEWING_LOG_INFO: i32 = 3;
pub const CHEWING_LOG_WARN: i32 = 4;
pub const CHEWING_LOG_ERROR: i32 = 5;

/// Prepended to every forwarded engine message
pub const MESSAGE_PREFIX: &str = "[chewing]";

/// Signature of [`chewing_log_callback`]
pub type NativeLogFn = unsafe extern "C" fn(level: i32, message: *const c_char);

/// Signature of [`chewing_log_callback_with_data`]
pub type NativeLogWithDataFn =
    unsafe extern "C" fn(data: *mut c_void, level: i32, message: *const c_char);

/// Forward one engine message to the active [`Router`].
///
/// # Safety
/// `message` must be null or point to a NUL-terminated buffer that stays
/// valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn chewing_log_callback(level: i32, message: *const c_char) {
    if message.is_null() {
        return;
    }
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        let Some(router) = registry::current() else {
            return;
        };
        let text = unsafe { copy_message(message) };
        forward(&router, level, &text);
    }));
}

/// Forward one engine message to the router behind `data`.
///
/// A null `data` falls back to the active router.
///
/// # Safety
/// `data` must be null or a live handle from [`Router::into_user_data`].
/// `message` has the same requirements as in [`chewing_log_callback`].
#[no_mangle]
pub unsafe extern "C" fn chewing_log_callback_with_data(
    data: *mut c_void,
    level: i32,
    message: *const c_char,
) {
    if data.is_null() {
        return chewing_log_callback(level, message);
    }
    if message.is_null() {
        return;
    }
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        let router = unsafe { Router::from_user_data(data) };
        let text = unsafe { copy_message(message) };
        forward(router, level, &text);
    }));
}

/// Function pointer to register with the engine
pub fn native_log_callback() -> NativeLogFn {
    chewing_log_callback
}

/// Function pointer for engine APIs that pass a user-data pointer
pub fn native_log_callback_with_data() -> NativeLogWithDataFn {
    chewing_log_callback_with_data
}

fn forward(router: &Router, level: i32, text: &str) {
    router.log(
        LogLevel::from_native(level),
        format!("{}{}", MESSAGE_PREFIX, text),
    );
}

/// Owned copy of the buffer; invalid UTF-8 yields an empty string.
unsafe fn copy_message(message: *const c_char) -> String {
    CStr::from_ptr(message)
        .to_str()
        .map(str::to_owned)
        .unwrap_or_default()
}
