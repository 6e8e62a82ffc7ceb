use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::context::Context;

type Compute = dyn Fn(&Context) -> Option<Value> + Send + Sync;

/// What a variable resolves to while it is unset.
#[derive(Clone, Default)]
pub enum DefaultValue {
    /// No default; an unset variable reads as `None`.
    #[default]
    None,
    Literal(Value),
    /// Evaluated on every read, with the registry context.
    Computed(Arc<Compute>),
}

impl DefaultValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        DefaultValue::Literal(value.into())
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Context) -> Option<Value> + Send + Sync + 'static,
    {
        DefaultValue::Computed(Arc::new(f))
    }

    pub fn resolve(&self, ctx: &Context) -> Option<Value> {
        match self {
            DefaultValue::None => None,
            DefaultValue::Literal(value) => Some(value.clone()),
            DefaultValue::Computed(f) => f(ctx),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::None => f.write_str("None"),
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Literal(value)
    }
}

impl From<Option<Value>> for DefaultValue {
    fn from(value: Option<Value>) -> Self {
        value.map_or(DefaultValue::None, DefaultValue::Literal)
    }
}

macro_rules! literal_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for DefaultValue {
                fn from(value: $ty) -> Self {
                    DefaultValue::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(&str, String, bool, f64, i8, i16, i32, i64, u8, u16, u32);
