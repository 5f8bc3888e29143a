// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Process-wide registry of the active [`Router`].
//!
//! The native callback has no context parameter, so it reaches the host
//! configuration through this registry. At most one router is active;
//! registering a new one replaces (never merges with) the previous one.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::router::Router;

static ACTIVE: Lazy<RwLock<Option<Arc<Router>>>> = Lazy::new(|| RwLock::new(None));

/// Make `router` the active instance, returning the one it replaced.
pub fn register(router: Arc<Router>) -> Option<Arc<Router>> {
    let previous = ACTIVE.write().replace(router);
    if previous.is_some() {
        debug!("Replaced active chewing log router");
    }
    previous
}

/// The active router, if any.
///
/// Returns a clone so no lock is held while the router runs user code.
pub fn current() -> Option<Arc<Router>> {
    ACTIVE.read().clone()
}

/// Unregister the active router; subsequent native messages are dropped.
pub fn clear() -> Option<Arc<Router>> {
    ACTIVE.write().take()
}

pub fn is_registered() -> bool {
    ACTIVE.read().is_some()
}
