use std::path::PathBuf;

use thiserror::Error;

use crate::var::DecodeError;

/// Top-level error type for the dotvars library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("failed to read dotenv file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse dotenv file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("failed to write dotenv file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse variable declarations: {0}")]
    Declarations(#[from] toml::de::Error),

    #[error("invalid declaration for '{name}': {reason}")]
    InvalidDeclaration { name: String, reason: String },

    #[error("prompt failed: {0}")]
    Prompt(std::io::Error),
}
