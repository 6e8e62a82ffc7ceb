use thiserror::Error;

/// A stored environment string could not be read as a variable's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode {raw:?} as {type_name}")]
pub struct DecodeError {
    pub type_name: &'static str,
    pub raw: String,
}

impl DecodeError {
    pub fn new(type_name: &'static str, raw: impl Into<String>) -> Self {
        Self {
            type_name,
            raw: raw.into(),
        }
    }
}
