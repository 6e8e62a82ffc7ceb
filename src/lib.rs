//! Declared configuration variables backed by the environment and a
//! dotenv file.
//!
//! A [`Registry`] owns typed [`Var`]s. Each variable reads its live value
//! from an [`EnvStore`](store::EnvStore), falls back to its default when
//! unset, and remembers where its value came from. [`Registry::load`] fills
//! gaps from a dotenv file without overriding values already present in the
//! environment; [`Registry::save`] writes the current state back.

pub mod context;
pub mod prompt;
pub mod registry;
pub mod store;
pub mod var;
mod error;

pub use error::Error;
pub use registry::{Registry, RegistryBuilder};
pub use var::{Boolean, DecodeError, DefaultValue, Float, Integer, Provenance, Text, Value, Var};
