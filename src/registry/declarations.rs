//! Bulk variable declarations from TOML.
//!
//! ```toml
//! [port]
//! type = "integer"
//! default = 8080
//!
//! [verbose]
//! type = "boolean"
//! ```
//!
//! Tables are applied in document order. `type` defaults to `string`.

use serde::Deserialize;
use toml::Value as TomlValue;

use crate::var::{Boolean, DefaultValue, Float, Integer, Text, Value, VarType};
use crate::Error;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    #[default]
    String,
    Boolean,
    Integer,
    Float,
}

impl Kind {
    fn var_type(self) -> Box<dyn VarType> {
        match self {
            Kind::String => Box::new(Text),
            Kind::Boolean => Box::new(Boolean),
            Kind::Integer => Box::new(Integer),
            Kind::Float => Box::new(Float),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VarSpec {
    #[serde(rename = "type", default)]
    kind: Kind,
    default: Option<TomlValue>,
}

/// A parsed declaration, ready to be declared on a registry.
#[derive(Debug)]
pub(crate) struct Declaration {
    pub name: String,
    pub var_type: Box<dyn VarType>,
    pub default: DefaultValue,
}

pub(crate) fn parse(source: &str) -> Result<Vec<Declaration>, Error> {
    let table: toml::Table = toml::from_str(source)?;
    let mut declarations = Vec::with_capacity(table.len());

    for (name, value) in table {
        if !value.is_table() {
            return Err(Error::InvalidDeclaration {
                name,
                reason: "expected a table".into(),
            });
        }
        let spec: VarSpec = value.try_into()?;
        let default = match spec.default {
            Some(value) => DefaultValue::Literal(scalar(&name, value)?),
            None => DefaultValue::None,
        };
        declarations.push(Declaration {
            name,
            var_type: spec.kind.var_type(),
            default,
        });
    }

    Ok(declarations)
}

fn scalar(name: &str, value: TomlValue) -> Result<Value, Error> {
    match value {
        TomlValue::String(s) => Ok(Value::String(s)),
        TomlValue::Integer(i) => Ok(Value::Integer(i)),
        TomlValue::Float(f) => Ok(Value::Float(f)),
        TomlValue::Boolean(b) => Ok(Value::Boolean(b)),
        TomlValue::Datetime(dt) => Ok(Value::String(dt.to_string())),
        TomlValue::Array(_) | TomlValue::Table(_) => Err(Error::InvalidDeclaration {
            name: name.to_string(),
            reason: "default must be a scalar".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_in_document_order() {
        let decls = parse(
            r#"
            [port]
            type = "integer"
            default = 8080

            [host]
            default = "localhost"

            [verbose]
            type = "boolean"
            "#,
        )
        .unwrap();

        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["port", "host", "verbose"]);
        assert_eq!(decls[0].var_type.class_name(), "Int");
        assert_eq!(decls[1].var_type.class_name(), "Var");
        assert_eq!(decls[2].var_type.class_name(), "Bool");
        assert!(matches!(
            decls[0].default,
            DefaultValue::Literal(Value::Integer(8080))
        ));
        assert!(matches!(decls[2].default, DefaultValue::None));
    }

    #[test]
    fn test_non_scalar_default_rejected() {
        let err = parse("[hosts]\ndefault = [\"a\", \"b\"]\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDeclaration { ref name, .. } if name == "hosts"));
    }

    #[test]
    fn test_non_table_rejected() {
        let err = parse("port = 8080\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDeclaration { .. }));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = parse("[port]\ntype = \"uuid\"\n").unwrap_err();
        assert!(matches!(err, Error::Declarations(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse("[port]\nrequired = true\n").unwrap_err();
        assert!(matches!(err, Error::Declarations(_)));
    }
}
