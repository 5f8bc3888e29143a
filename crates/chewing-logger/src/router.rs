// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! The log router: filter, then dispatch to the user callback or the
//! platform logger.
//!
//! ## Threading
//!
//! - Callback path: the callback runs synchronously on the thread that
//!   called [`Router::log`], which for native messages is the engine's thread.
//! - Platform path: a job is enqueued on the process-wide
//!   [`SerialQueue`] and [`Router::log`] returns immediately. Output
//!   order among platform messages matches enqueue order.

use std::ffi::c_void;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::config::LoggingConfig;
use crate::level::LogLevel;
use crate::platform::{platform_message, PlatformLogger, PlatformMethod, TracingLogger};
use crate::queue::SerialQueue;
use crate::registry;

pub struct Router {
    config: LoggingConfig,
    platform: Arc<dyn PlatformLogger>,
    queue: &'static SerialQueue,
}

impl Router {
    /// Create a router over `config` and make it the active instance.
    ///
    /// Any previously active router stops receiving native messages.
    pub fn new(config: LoggingConfig) -> Arc<Self> {
        Self::with_platform_logger(config, Arc::new(TracingLogger))
    }

    /// Like [`Router::new`] with a custom fallback sink.
    pub fn with_platform_logger(
        config: LoggingConfig,
        platform: Arc<dyn PlatformLogger>,
    ) -> Arc<Self> {
        let router = Self::standalone(config, platform);
        registry::register(Arc::clone(&router));
        router
    }

    /// A router that is not registered.
    ///
    /// Reachable from native code only through
    /// [`Router::into_user_data`] and [`crate::chewing_log_callback_with_data`].
    pub fn standalone(config: LoggingConfig, platform: Arc<dyn PlatformLogger>) -> Arc<Self> {
        Arc::new(Self {
            config,
            platform,
            queue: SerialQueue::global(),
        })
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Forward `message` at `level` if the configuration allows it.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.config.allows(level) {
            trace!(%level, "Dropped chewing log message");
            return;
        }

        let message = message.into();
        if let Some(callback) = &self.config.callback {
            callback(level, message);
            return;
        }

        let platform = Arc::clone(&self.platform);
        let method = PlatformMethod::for_level(level);
        let text = platform_message(level, message);
        self.queue.dispatch(move || platform.emit(method, &text));
    }

    /// Block until platform messages logged before this call are emitted.
    ///
    /// From inside [`PlatformLogger::emit`] this returns immediately instead
    /// of waiting on itself.
    pub fn flush(&self) {
        self.queue.flush();
    }

    /// Convert into an opaque handle for native APIs that carry a user-data
    /// pointer. Release it with [`Router::release_user_data`].
    pub fn into_user_data(router: Arc<Router>) -> *mut c_void {
        Arc::into_raw(router) as *mut c_void
    }

    /// Release a handle created by [`Router::into_user_data`].
    ///
    /// # Safety
    /// `data` must be null or come from [`Router::into_user_data`], and must
    /// not be used again afterwards.
    pub unsafe fn release_user_data(data: *mut c_void) {
        if !data.is_null() {
            drop(Arc::from_raw(data as *const Router));
        }
    }

    /// # Safety
    /// `data` must be non-null, come from [`Router::into_user_data`], and not
    /// have been released.
    pub(crate) unsafe fn from_user_data<'a>(data: *mut c_void) -> &'a Router {
        &*(data as *const Router)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("queue", &self.queue.label())
            .finish()
    }
}
