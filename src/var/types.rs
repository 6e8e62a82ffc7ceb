//! Encode/decode rules for the built-in variable types.
//!
//! Every variable stores a string in the environment. A [`VarType`] turns
//! that string into a [`Value`] and back. Custom types implement the trait
//! and are declared like the built-in ones.

use std::fmt::Debug;

use super::{DecodeError, Value};

/// Conversion between a variable's stored string and its logical value.
pub trait VarType: Send + Sync + Debug {
    /// Short tag identifying the variable class in diagnostics.
    fn class_name(&self) -> &'static str;

    /// Interprets a stored (non-empty) environment string.
    fn decode(&self, raw: &str) -> Result<Value, DecodeError>;

    /// Produces the stored form of a non-string value.
    ///
    /// String values bypass this and are stored unchanged.
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }

    /// Name of the generated reader for a variable called `name`.
    fn reader_name(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Plain string variable: stored and read back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl VarType for Text {
    fn class_name(&self) -> &'static str {
        "Var"
    }

    fn decode(&self, raw: &str) -> Result<Value, DecodeError> {
        Ok(Value::String(raw.to_string()))
    }
}

/// Strict boolean variable. Its reader carries a trailing `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

const TRUE_TOKENS: [&str; 6] = ["1", "t", "T", "true", "True", "TRUE"];
const FALSE_TOKENS: [&str; 6] = ["0", "f", "F", "false", "False", "FALSE"];

impl VarType for Boolean {
    fn class_name(&self) -> &'static str {
        "Bool"
    }

    fn decode(&self, raw: &str) -> Result<Value, DecodeError> {
        if TRUE_TOKENS.contains(&raw) {
            Ok(Value::Boolean(true))
        } else if FALSE_TOKENS.contains(&raw) {
            Ok(Value::Boolean(false))
        } else {
            Err(DecodeError::new("boolean", raw))
        }
    }

    fn reader_name(&self, name: &str) -> String {
        format!("{name}?")
    }
}

/// Signed 64-bit integer variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

impl VarType for Integer {
    fn class_name(&self) -> &'static str {
        "Int"
    }

    fn decode(&self, raw: &str) -> Result<Value, DecodeError> {
        if !looks_like_integer(raw) {
            return Err(DecodeError::new("integer", raw));
        }
        raw.parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| DecodeError::new("integer", raw))
    }
}

/// 64-bit floating point variable.
///
/// Always reads back as [`Value::Float`]: setting `Value::Integer(3)` stores
/// `"3"`, which decodes to `Float(3.0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl VarType for Float {
    fn class_name(&self) -> &'static str {
        "Float"
    }

    fn decode(&self, raw: &str) -> Result<Value, DecodeError> {
        raw.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| DecodeError::new("float", raw))
    }
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
