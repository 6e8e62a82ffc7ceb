//! Shared context a registry hands to each of its variables.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::store::EnvStore;

/// The parts of a registry every variable needs: where the dotenv file
/// lives, the namespace prefix, and the environment store.
///
/// A context is fixed when the registry is built and shared by `Arc`, so a
/// variable's view of it never changes after declaration. Computed defaults
/// receive it as their argument.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use dotvars::context::Context;
/// use dotvars::store::MemoryEnv;
///
/// let ctx = Context::new(".env", "APP", Arc::new(MemoryEnv::new()));
/// assert_eq!(ctx.env_name("foo_bar"), "APP_FOO_BAR");
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    path: PathBuf,
    prefix: String,
    store: Arc<dyn EnvStore>,
}

impl Context {
    pub fn new(
        path: impl AsRef<Path>,
        prefix: impl Into<String>,
        store: Arc<dyn EnvStore>,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            prefix: prefix.into(),
            store,
        }
    }

    /// Location of the dotenv file used by `load` and `save`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn store(&self) -> &Arc<dyn EnvStore> {
        &self.store
    }

    /// Derives the environment key for a variable name: the upper-cased
    /// name, joined to the prefix with `_` when the prefix is non-empty.
    pub fn env_name(&self, name: &str) -> String {
        let upper = name.to_uppercase();
        if self.prefix.is_empty() {
            upper
        } else {
            format!("{}_{}", self.prefix, upper)
        }
    }

    /// Reads the raw, non-empty store value for the variable called `name`.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.store
            .get(&self.env_name(name))
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryEnv;
    use proptest::prelude::*;

    fn context(prefix: &str) -> Context {
        Context::new(".env", prefix, Arc::new(MemoryEnv::new()))
    }

    #[test]
    fn test_env_name_with_prefix() {
        assert_eq!(context("APP").env_name("foo_bar"), "APP_FOO_BAR");
    }

    #[test]
    fn test_env_name_without_prefix() {
        assert_eq!(context("").env_name("foo_bar"), "FOO_BAR");
    }

    #[test]
    fn test_lookup_ignores_empty_values() {
        let store = Arc::new(MemoryEnv::with_vars([("APP_A", "1"), ("APP_B", "")]));
        let ctx = Context::new(".env", "APP", store);
        assert_eq!(ctx.lookup("a").as_deref(), Some("1"));
        assert_eq!(ctx.lookup("b"), None);
        assert_eq!(ctx.lookup("c"), None);
    }

    proptest! {
        #[test]
        fn prop_env_name_is_prefixed_upper_name(
            prefix in "[A-Z]{1,8}",
            name in "[a-z][a-z0-9_]{0,16}",
        ) {
            let env_name = context(&prefix).env_name(&name);
            prop_assert_eq!(env_name, format!("{}_{}", prefix, name.to_uppercase()));
        }
    }
}
