use std::fmt;

use crate::var::{DecodeError, Value, Var};
use crate::Error;

type Reader<'a> = Box<dyn Fn() -> Result<Option<Value>, DecodeError> + 'a>;

/// Zero-argument accessors, one per declared variable, keyed by reader name.
///
/// Each accessor reads the live value on every call.
pub struct Readers<'a> {
    readers: Vec<(String, Reader<'a>)>,
}

impl<'a> Readers<'a> {
    pub(crate) fn new<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = &'a Var>,
    {
        let readers = vars
            .into_iter()
            .map(|var| {
                let reader: Reader<'a> = Box::new(move || var.get());
                (var.reader_name(), reader)
            })
            .collect();
        Self { readers }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.readers.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Fn() -> Result<Option<Value>, DecodeError> + 'a)> {
        self.readers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, reader)| reader.as_ref())
    }

    /// Invokes the reader called `name`.
    pub fn call(&self, name: &str) -> Result<Option<Value>, Error> {
        let reader = self
            .get(name)
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))?;
        Ok(reader()?)
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl fmt::Debug for Readers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
