use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::declarations::{self, Declaration};
use super::Registry;
use crate::context::Context;
use crate::store::{EnvStore, ProcessEnv};
use crate::var::{DefaultValue, VarType};
use crate::Error;

/// Conventional dotenv file name used when no path is given.
pub const DEFAULT_PATH: &str = ".env";

/// A declaration source, applied in registration order.
#[derive(Debug)]
enum Source {
    Var(Declaration),
    Toml(String),
}

/// Builder for a [`Registry`].
///
/// ## Example
///
/// ```no_run
/// use dotvars::{Integer, Registry, Text};
///
/// let mut registry = Registry::builder()
///     .path("config/app.env")
///     .prefix("APP")
///     .declare("host", Text, "localhost")
///     .declare("port", Integer, 8080)
///     .build()?;
///
/// registry.load()?;
/// let port = registry.get("port")?;
/// # Ok::<(), dotvars::Error>(())
/// ```
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct RegistryBuilder {
    path: PathBuf,
    prefix: String,
    store: Option<Arc<dyn EnvStore>>,
    sources: Vec<Source>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            prefix: String::new(),
            store: None,
            sources: Vec::new(),
        }
    }
}

impl RegistryBuilder {
    /// Dotenv file read by `load` and written by `save`. Defaults to `.env`.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Namespace prepended to every derived environment name.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Environment store to resolve against. Defaults to the process
    /// environment.
    pub fn store(mut self, store: Arc<dyn EnvStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn declare(
        mut self,
        name: impl Into<String>,
        var_type: impl VarType + 'static,
        default: impl Into<DefaultValue>,
    ) -> Self {
        self.sources.push(Source::Var(Declaration {
            name: name.into(),
            var_type: Box::new(var_type),
            default: default.into(),
        }));
        self
    }

    /// Declares every table of a TOML document as a variable.
    ///
    /// The document is parsed at build time.
    pub fn declarations_toml(mut self, source: impl Into<String>) -> Self {
        self.sources.push(Source::Toml(source.into()));
        self
    }

    pub fn build(self) -> Result<Registry, Error> {
        let store = self.store.unwrap_or_else(|| Arc::new(ProcessEnv));
        let context = Arc::new(Context::new(self.path, self.prefix, store));
        let mut registry = Registry::with_context(context);

        for source in self.sources {
            match source {
                Source::Var(decl) => {
                    registry.declare_boxed(decl.name, decl.var_type, decl.default);
                }
                Source::Toml(text) => {
                    for decl in declarations::parse(&text)? {
                        registry.declare_boxed(decl.name, decl.var_type, decl.default);
                    }
                }
            }
        }

        Ok(registry)
    }
}
