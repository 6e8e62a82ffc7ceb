//! The variable registry and its dotenv load/save protocol.

mod builder;
mod declarations;
mod dotenv;
mod readers;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

pub use builder::{RegistryBuilder, DEFAULT_PATH};
pub use dotenv::{parse as parse_dotenv, quote_value, Entries};
pub use readers::Readers;

use crate::context::Context;
use crate::prompt::Prompt;
use crate::var::{DecodeError, DefaultValue, Provenance, Value, Var, VarExplain, VarType};
use crate::Error;

/// Owns a set of declared variables and reconciles them with a dotenv file.
///
/// Variables are kept in declaration order, which is also the order used
/// for iteration and serialization.
#[derive(Debug)]
pub struct Registry {
    context: Arc<Context>,
    vars: Vec<Var>,
    loaded: Option<Entries>,
}

/// Aggregate diagnostic snapshot of a registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryExplain {
    pub path: String,
    pub prefix: String,
    pub loaded: Option<Entries>,
    pub vars: Vec<(String, VarExplain)>,
}

impl RegistryExplain {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry on `.env` with no prefix, backed by the process environment.
    pub fn new() -> Self {
        let context = Context::new(DEFAULT_PATH, "", Arc::new(crate::store::ProcessEnv));
        Self::with_context(Arc::new(context))
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub(crate) fn with_context(context: Arc<Context>) -> Self {
        Self {
            context,
            vars: Vec::new(),
            loaded: None,
        }
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    pub fn path(&self) -> &Path {
        self.context.path()
    }

    pub fn prefix(&self) -> &str {
        self.context.prefix()
    }

    /// Declares a variable, replacing any earlier one with the same name.
    ///
    /// A replaced variable keeps its position but loses its provenance
    /// record.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        var_type: impl VarType + 'static,
        default: impl Into<DefaultValue>,
    ) -> &mut Var {
        self.declare_boxed(name.into(), Box::new(var_type), default.into())
    }

    pub(crate) fn declare_boxed(
        &mut self,
        name: String,
        var_type: Box<dyn VarType>,
        default: DefaultValue,
    ) -> &mut Var {
        let var = Var::new(name, var_type, default, self.context.clone());
        let idx = match self.position(var.name()) {
            Some(idx) => {
                self.vars[idx] = var;
                idx
            }
            None => {
                self.vars.push(var);
                self.vars.len() - 1
            }
        };
        &mut self.vars[idx]
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|v| v.name() == name)
    }

    pub fn var(&self, name: &str) -> Result<&Var, Error> {
        self.vars
            .iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))
    }

    pub fn var_mut(&mut self, name: &str) -> Result<&mut Var, Error> {
        self.vars
            .iter_mut()
            .find(|v| v.name() == name)
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))
    }

    pub fn vars(&self) -> impl Iterator<Item = &Var> {
        self.vars.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(Var::name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// True if `path` exists and is a regular file. Anything else at the
    /// path is logged and treated as absent.
    pub fn path_is_regular_file(&self) -> bool {
        let path = self.path();
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => true,
            Ok(_) => {
                tracing::warn!(path = %path.display(), "dotenv path is not a regular file");
                false
            }
            Err(_) => false,
        }
    }

    /// Merges the dotenv file into the environment store.
    ///
    /// A file value is applied only to a declared variable that is not
    /// already set, so live environment values always win. Every key claimed
    /// by a declared variable is consumed, applied or not; the keys left
    /// over are logged as unknown. A missing file is not an error.
    pub fn load(&mut self) -> Result<(), Error> {
        let path = self.context.path().to_path_buf();
        if !self.path_is_regular_file() {
            tracing::info!(path = %path.display(), "no dotenv file to load");
            return Ok(());
        }

        let file = File::open(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        let entries = dotenv::parse(file).map_err(|source| Error::Parse {
            path: path.clone(),
            source,
        })?;

        let mut remaining = entries.clone();
        for var in &mut self.vars {
            let Some(value) = remaining.take(var.env_name()) else {
                continue;
            };
            if var.is_set() {
                tracing::debug!(env_name = %var.env_name(), "keeping live environment value");
                continue;
            }
            var.set(value, Provenance::File(path.clone()));
        }

        if !remaining.is_empty() {
            let keys: Vec<&str> = remaining.keys().collect();
            tracing::warn!(
                path = %path.display(),
                keys = ?keys,
                "dotenv file contains unknown keys"
            );
        }

        self.loaded = Some(entries);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Entries parsed by the last successful `load`, before merging.
    pub fn loaded(&self) -> Option<&Entries> {
        self.loaded.as_ref()
    }

    /// Keys of the last loaded file that no declared variable claims.
    pub fn unknown_keys(&self) -> Vec<String> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        loaded
            .keys()
            .filter(|key| !self.vars.iter().any(|v| v.env_name() == *key))
            .map(str::to_string)
            .collect()
    }

    /// Writes one dotenv line per variable, in declaration order.
    pub fn write<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        for var in &self.vars {
            var.serialize(sink)?;
        }
        Ok(())
    }

    /// Renders `write` output in memory.
    pub fn dump(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Overwrites the dotenv file with the current state.
    pub fn save(&self) -> Result<(), Error> {
        let path = self.path();
        let write_err = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut file = BufWriter::new(File::create(path).map_err(write_err)?);
        self.write(&mut file).map_err(write_err)?;
        file.flush().map_err(write_err)?;
        tracing::info!(path = %path.display(), vars = self.vars.len(), "saved dotenv file");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Option<Value>, Error> {
        Ok(self.var(name)?.get()?)
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), Error> {
        self.var_mut(name)?.set(value, Provenance::RuntimeSet);
        Ok(())
    }

    pub fn unset(&mut self, name: &str) -> Result<(), Error> {
        self.var_mut(name)?.unset(Provenance::RuntimeSet);
        Ok(())
    }

    /// Lazily yields `(name, value)` in declaration order, reading live
    /// values as it goes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Result<Option<Value>, DecodeError>)> {
        self.vars.iter().map(|var| (var.name(), var.get()))
    }

    /// Materializes `iter` into a map. The map is sorted by name; use `iter`
    /// for declaration order.
    pub fn to_map(&self) -> Result<BTreeMap<String, Option<Value>>, Error> {
        let map = self
            .iter()
            .map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect::<Result<_, DecodeError>>()?;
        Ok(map)
    }

    pub fn explain(&self) -> Result<RegistryExplain, Error> {
        let vars = self
            .vars
            .iter()
            .map(|var| var.explain().map(|e| (var.name().to_string(), e)))
            .collect::<Result<Vec<_>, DecodeError>>()?;
        Ok(RegistryExplain {
            path: self.path().display().to_string(),
            prefix: self.prefix().to_string(),
            loaded: self.loaded.clone(),
            vars,
        })
    }

    /// One accessor per variable, named by its reader name.
    pub fn readers(&self) -> Readers<'_> {
        Readers::new(&self.vars)
    }

    /// Asks for a new value of `name`. Returns true if a value was set.
    pub fn prompt(&mut self, name: &str, prompt: &mut dyn Prompt) -> Result<bool, Error> {
        let var = self.var_mut(name)?;
        let current = var.display_value();
        let answer = prompt
            .ask(var.env_name(), current.as_deref())
            .map_err(Error::Prompt)?;
        match answer {
            Some(value) => {
                var.set(value, Provenance::Prompted);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Prompts for every variable that is not set. Returns how many were set.
    pub fn prompt_unset(&mut self, prompt: &mut dyn Prompt) -> Result<usize, Error> {
        let pending: Vec<String> = self
            .vars
            .iter()
            .filter(|v| !v.is_set())
            .map(|v| v.name().to_string())
            .collect();

        let mut count = 0;
        for name in pending {
            if self.prompt(&name, prompt)? {
                count += 1;
            }
        }
        Ok(count)
    }
}
