//! Declared configuration variables.

mod default;
mod error;
mod provenance;
mod types;
mod value;

use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;

pub use default::DefaultValue;
pub use error::DecodeError;
pub use provenance::Provenance;
pub use types::{Boolean, Float, Integer, Text, VarType};
pub use value::Value;

use crate::context::Context;
use crate::registry::quote_value;

/// One declared configuration variable.
///
/// A variable holds no value of its own. Reads go straight to the
/// environment store at [`env_name`](Self::env_name), so values exported by
/// a shell or written by other code are always visible. The variable only
/// remembers what it last wrote, and who asked, to report provenance.
#[derive(Debug)]
pub struct Var {
    name: String,
    env_name: String,
    var_type: Box<dyn VarType>,
    default: DefaultValue,
    context: Arc<Context>,
    set_to: Option<String>,
    set_by: Option<Provenance>,
}

/// Read-only diagnostic snapshot of a variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarExplain {
    pub class: &'static str,
    pub value: Option<Value>,
    pub value_type: &'static str,
    pub env_name: String,
    pub env_value: Option<String>,
    pub provenance: Provenance,
}

impl Var {
    pub(crate) fn new(
        name: impl Into<String>,
        var_type: Box<dyn VarType>,
        default: DefaultValue,
        context: Arc<Context>,
    ) -> Self {
        let name = name.into();
        let env_name = context.env_name(&name);
        Self {
            name,
            env_name,
            var_type,
            default,
            context,
            set_to: None,
            set_by: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    pub fn default_value(&self) -> &DefaultValue {
        &self.default
    }

    /// Name of the accessor generated for this variable.
    pub fn reader_name(&self) -> String {
        self.var_type.reader_name(&self.name)
    }

    /// The raw store value, if non-empty.
    pub fn env_value(&self) -> Option<String> {
        self.context
            .store()
            .get(&self.env_name)
            .filter(|v| !v.is_empty())
    }

    pub fn is_set(&self) -> bool {
        self.env_value().is_some()
    }

    /// Current logical value: the decoded store value when set, the default
    /// otherwise.
    pub fn get(&self) -> Result<Option<Value>, DecodeError> {
        match self.env_value() {
            Some(raw) => self.decode(&raw).map(Some),
            None => Ok(self.default.resolve(&self.context)),
        }
    }

    pub fn decode(&self, raw: &str) -> Result<Value, DecodeError> {
        self.var_type.decode(raw)
    }

    /// Stored form of `value`. Strings pass through unchanged.
    pub fn encode(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => self.var_type.encode(other),
        }
    }

    /// Writes `value` through to the store and records `by` as its origin.
    ///
    /// An empty encoded value clears the variable instead.
    pub fn set(&mut self, value: impl Into<Value>, by: Provenance) {
        let encoded = self.encode(&value.into());
        self.write_raw(encoded, by);
    }

    /// Clears the variable by removing its key from the store.
    pub fn unset(&mut self, by: Provenance) {
        self.write_raw(String::new(), by);
    }

    fn write_raw(&mut self, encoded: String, by: Provenance) {
        tracing::debug!(
            env_name = %self.env_name,
            provenance = %by,
            cleared = encoded.is_empty(),
            "setting variable"
        );
        let store = self.context.store();
        if encoded.is_empty() {
            store.remove(&self.env_name);
            self.set_to = None;
        } else {
            store.set(&self.env_name, &encoded);
            self.set_to = Some(encoded);
        }
        self.set_by = Some(by);
    }

    /// Origin of the current value.
    ///
    /// The recorded tag only applies while the store still holds exactly
    /// what this variable last wrote.
    pub fn provenance(&self) -> Provenance {
        let Some(current) = self.env_value() else {
            return Provenance::Default;
        };
        match &self.set_by {
            Some(by) if self.set_to.as_deref() == Some(current.as_str()) => by.clone(),
            _ => Provenance::Environment,
        }
    }

    /// The dotenv line for this variable, without a trailing newline.
    ///
    /// Values the dotenv parser would misread are double-quoted; see
    /// [`quote_value`](crate::registry::quote_value).
    pub fn line(&self) -> String {
        let raw = self.context.store().get(&self.env_name).unwrap_or_default();
        format!("{}={}", self.env_name, quote_value(&raw))
    }

    pub fn serialize<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "{}", self.line())
    }

    /// Encoded form of the current value, falling back to the default.
    pub fn display_value(&self) -> Option<String> {
        self.env_value().or_else(|| {
            self.default
                .resolve(&self.context)
                .map(|value| self.encode(&value))
        })
    }

    pub fn explain(&self) -> Result<VarExplain, DecodeError> {
        let value = self.get()?;
        Ok(VarExplain {
            class: self.var_type.class_name(),
            value_type: value.as_ref().map_or("none", Value::type_name),
            value,
            env_name: self.env_name.clone(),
            env_value: self.context.store().get(&self.env_name),
            provenance: self.provenance(),
        })
    }
}
