//! Property-based tests for dotenv serialization.
//!
//! Whatever string a variable holds, `save` followed by `load` into a fresh
//! store must reproduce it exactly.

use std::sync::Arc;

use dotvars::registry::parse_dotenv;
use dotvars::store::MemoryEnv;
use dotvars::{DefaultValue, Registry, Text, Value};
use proptest::prelude::*;
use tempfile::TempDir;

/// Printable text, plus strings dense in characters the dotenv parser
/// treats specially.
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,32}",
        "[ \\t'#$\\\\\"{}=a-z\\n\\r\\x01]{0,24}",
    ]
}

fn registry(dir: &TempDir) -> Registry {
    Registry::builder()
        .path(dir.path().join(".env"))
        .prefix("P")
        .store(Arc::new(MemoryEnv::new()))
        .declare("value", Text, DefaultValue::None)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_save_then_load_reproduces_value(value in value_strategy()) {
        let dir = TempDir::new().unwrap();
        let mut original = registry(&dir);
        original.set("value", value.as_str()).unwrap();
        original.save().unwrap();

        let mut fresh = registry(&dir);
        fresh.load().unwrap();

        let expected = (!value.is_empty()).then(|| Value::String(value.clone()));
        prop_assert_eq!(fresh.get("value").unwrap(), expected);
    }

    #[test]
    fn prop_dump_parses_back(value in value_strategy()) {
        let dir = TempDir::new().unwrap();
        let mut registry = registry(&dir);
        registry.set("value", value.as_str()).unwrap();

        let entries = parse_dotenv(registry.dump().unwrap().as_bytes()).unwrap();

        prop_assert_eq!(entries.get("P_VALUE"), Some(value.as_str()));
    }
}
