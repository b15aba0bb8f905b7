//! Advisory per-resource write locks.
//!
//! Locks are process-local and scoped to one client and its clones. They keep
//! a single caller from interleaving its own writes to a resource family
//! (`items`, `oauth`, ...); they do nothing against other processes or other
//! client instances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

/// Table of locks keyed by resource family.
#[derive(Debug, Clone, Default)]
pub struct ResourceLocks {
    table: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl ResourceLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the lock guarding `family`.
    pub async fn acquire(&self, family: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(table.entry(family.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    /// The resource family of a routed path: its first non-empty segment.
    ///
    /// `path` is relative to the API origin and may carry a query string.
    pub fn family_of(path: &str) -> Option<String> {
        path.split(['?', '#'])
            .next()?
            .split('/')
            .find(|segment| !segment.is_empty())
            .map(str::to_string)
    }
}
