//! The key/value environment every variable resolves against.
//!
//! Production code binds to [`ProcessEnv`], the real process environment.
//! Tests substitute a [`MemoryEnv`] so each case gets its own isolated store.
//!
//! No operation here is atomic with respect to another: a variable that
//! encodes a value and then writes it can race with any other writer of the
//! same key. Callers that share keys across threads must synchronize
//! externally, since the process environment is also visible to code outside
//! this crate.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Read/write access to a flat string-to-string environment.
pub trait EnvStore: Send + Sync + std::fmt::Debug {
    /// Returns the raw value stored at `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`. This is the canonical "cleared" state.
    fn remove(&self, key: &str);

    /// Returns true if `key` holds a non-empty value.
    fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }
}

/// The process environment (`std::env`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-unicode values are treated the same as absent ones.
        std::env::var(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }

    fn remove(&self, key: &str) {
        std::env::remove_var(key);
    }
}

/// An isolated in-memory store.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given pairs.
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: RwLock::new(vars),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
