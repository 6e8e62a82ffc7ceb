use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

/// Where a variable's current value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Not set; the declared default applies.
    Default,
    /// Set, but not by this variable's own last `set` call.
    Environment,
    /// Set through the registry at runtime.
    RuntimeSet,
    /// Answered interactively.
    Prompted,
    /// Loaded from the dotenv file at this path.
    File(PathBuf),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Default => f.write_str("default"),
            Provenance::Environment => f.write_str("environment"),
            Provenance::RuntimeSet => f.write_str("runtime-set"),
            Provenance::Prompted => f.write_str("prompted"),
            Provenance::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Serialize for Provenance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
