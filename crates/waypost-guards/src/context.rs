//! Navigation context shared between the application and its guards.
//!
//! Guards never cache what they read here. A guard built for one evaluation
//! reads the context at query time, so flipping a flag (logging in, finishing
//! onboarding) changes the next resolution without rebuilding any route.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Point-in-time copy of the navigation state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextSnapshot {
    /// Flags currently set (e.g. `authenticated`)
    #[serde(default)]
    pub flags: BTreeSet<String>,
    /// Key/value pairs (e.g. `role = "admin"`)
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// Shared, externally mutable navigation state.
///
/// Cloning is cheap and clones observe the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct GuardContext {
    state: Arc<RwLock<ContextSnapshot>>,
}

impl GuardContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context seeded from a snapshot
    pub fn from_snapshot(snapshot: ContextSnapshot) -> Self {
        Self {
            state: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Set a flag
    pub fn set_flag(&self, flag: impl Into<String>) {
        self.state.write().flags.insert(flag.into());
    }

    /// Clear a flag, returning whether it was set
    pub fn clear_flag(&self, flag: &str) -> bool {
        self.state.write().flags.remove(flag)
    }

    /// Whether a flag is set
    pub fn has_flag(&self, flag: &str) -> bool {
        self.state.read().flags.contains(flag)
    }

    /// Set a value, returning the previous one
    pub fn set_value(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.state.write().values.insert(key.into(), value.into())
    }

    /// Remove a value, returning it if present
    pub fn remove_value(&self, key: &str) -> Option<String> {
        self.state.write().values.remove(key)
    }

    /// Current value for a key
    pub fn value(&self, key: &str) -> Option<String> {
        self.state.read().values.get(key).cloned()
    }

    /// Whether a value is present for a key
    pub fn has_value(&self, key: &str) -> bool {
        self.state.read().values.contains_key(key)
    }

    /// Copy out the current state
    pub fn snapshot(&self) -> ContextSnapshot {
        self.state.read().clone()
    }

    /// Replace the whole state at once
    pub fn replace(&self, snapshot: ContextSnapshot) {
        *self.state.write() = snapshot;
    }
}
