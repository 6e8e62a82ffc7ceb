//! Registry behavior against the real process environment.
//!
//! These tests mutate process-global state and run serially.

use std::fs;

use dotvars::{Boolean, Integer, Provenance, Registry, Text, Value};
use serial_test::serial;
use tempfile::TempDir;

const PREFIX: &str = "DOTVARS_IT";

fn clear(keys: &[&str]) {
    for key in keys {
        std::env::remove_var(key);
    }
}

fn registry(dir: &TempDir) -> Registry {
    Registry::builder()
        .path(dir.path().join("app.env"))
        .prefix(PREFIX)
        .declare("host", Text, "localhost")
        .declare("port", Integer, 8080)
        .declare("debug", Boolean, false)
        .build()
        .unwrap()
}

#[test]
#[serial]
fn test_shell_export_wins_over_file() {
    clear(&["DOTVARS_IT_HOST", "DOTVARS_IT_PORT", "DOTVARS_IT_DEBUG"]);
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app.env"),
        "DOTVARS_IT_HOST=file-host\nDOTVARS_IT_PORT=1111\n",
    )
    .unwrap();
    std::env::set_var("DOTVARS_IT_PORT", "2222");

    let mut registry = registry(&dir);
    registry.load().unwrap();

    assert_eq!(registry.get("port").unwrap(), Some(Value::Integer(2222)));
    assert_eq!(
        registry.get("host").unwrap(),
        Some(Value::from("file-host"))
    );
    assert_eq!(std::env::var("DOTVARS_IT_HOST").as_deref(), Ok("file-host"));
    assert_eq!(
        registry.var("port").unwrap().provenance(),
        Provenance::Environment
    );

    clear(&["DOTVARS_IT_HOST", "DOTVARS_IT_PORT", "DOTVARS_IT_DEBUG"]);
}

#[test]
#[serial]
fn test_set_is_visible_to_std_env() {
    clear(&["DOTVARS_IT_HOST", "DOTVARS_IT_PORT", "DOTVARS_IT_DEBUG"]);
    let dir = TempDir::new().unwrap();
    let mut registry = registry(&dir);

    registry.set("debug", true).unwrap();
    assert_eq!(std::env::var("DOTVARS_IT_DEBUG").as_deref(), Ok("true"));
    assert_eq!(registry.get("debug").unwrap(), Some(Value::Boolean(true)));

    registry.unset("debug").unwrap();
    assert!(std::env::var("DOTVARS_IT_DEBUG").is_err());

    clear(&["DOTVARS_IT_HOST", "DOTVARS_IT_PORT", "DOTVARS_IT_DEBUG"]);
}
