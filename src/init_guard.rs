//! Process-wide init-once state keyed by resource identity.
//!
//! Replaces free-floating "already loaded" booleans: every resource that must
//! be initialized at most once per process (a third-party embed script, say)
//! is tracked here under its own identity.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock, PoisonError};

pub struct InitGuard {
    initialized: Mutex<HashSet<String>>,
}

static GUARD: OnceLock<InitGuard> = OnceLock::new();

impl InitGuard {
    pub fn new() -> Self {
        Self {
            initialized: Mutex::new(HashSet::new()),
        }
    }

    /// The process-wide guard.
    pub fn global() -> &'static InitGuard {
        GUARD.get_or_init(InitGuard::new)
    }

    /// Run `init` the first time `resource` is seen.
    ///
    /// # Arguments
    /// * `resource` - Identity of the resource, e.g. a script URL
    /// * `init` - Initialization to run at most once for that identity
    ///
    /// # Returns
    /// `true` if this call ran `init`, `false` if the resource was already
    /// claimed.
    ///
    /// The resource is claimed under the lock and `init` runs after the lock
    /// is released, so `init` may itself call `run_once` on the same guard.
    /// A concurrent caller for a claimed resource returns `false` at once,
    /// possibly before `init` has finished. If `init` panics the resource
    /// stays claimed.
    pub fn run_once<F: FnOnce()>(&self, resource: &str, init: F) -> bool {
        let claimed = self
            .initialized
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resource.to_string());
        if claimed {
            init();
        }
        claimed
    }

    pub fn is_initialized(&self, resource: &str) -> bool {
        self.initialized
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(resource)
    }
}

impl Default for InitGuard {
    fn default() -> Self {
        Self::new()
    }
}
