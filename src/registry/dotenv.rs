//! Adapter over the `dotenvy` parser.

use std::borrow::Cow;
use std::io::Read;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered key/value pairs parsed from a dotenv file.
///
/// A key appearing twice keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries(Vec<(String, String)>);

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Removes `key`, returning its value.
    pub fn take(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Entries {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for (k, v) in iter {
            entries.insert(k, v);
        }
        entries
    }
}

impl Serialize for Entries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Parses dotenv content without touching the environment.
///
/// `$NAME` and `${NAME}` in unquoted or double-quoted values are expanded by
/// `dotenvy` from earlier entries and from the real process environment,
/// whatever store the registry uses. Values written by [`quote_value`]
/// escape `$`, so they never expand.
pub fn parse<R: Read>(reader: R) -> Result<Entries, dotenvy::Error> {
    dotenvy::from_read_iter(reader).collect()
}

/// Formats a raw value so that [`parse`] reads it back unchanged.
///
/// Values made only of ASCII alphanumerics and a few inert punctuation
/// characters are written bare. Anything else is double-quoted, escaping
/// `\`, `"`, `$` and newlines; for values without `$` or control characters
/// this is the same text as a JSON string literal.
pub fn quote_value(raw: &str) -> Cow<'_, str> {
    if raw.chars().all(is_bare) {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '\\' | '"' | '$' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

fn is_bare(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_-./:@,+=%^~!?*".contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let entries = parse("B=2\nA=1\n# comment\nC=\"quoted value\"\n".as_bytes()).unwrap();
        let keys: Vec<_> = entries.keys().collect();
        assert_eq!(keys, ["B", "A", "C"]);
        assert_eq!(entries.get("C"), Some("quoted value"));
    }

    #[test]
    fn test_parse_unescapes_json_quoted_value() {
        let entries = parse(r#"MSG="escaped \"value\"""#.as_bytes()).unwrap();
        assert_eq!(entries.get("MSG"), Some(r#"escaped "value""#));
    }

    #[test]
    fn test_duplicate_key_keeps_last_value() {
        let entries = parse("A=1\nB=2\nA=3\n".as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("A"), Some("3"));
        assert_eq!(entries.keys().next(), Some("A"));
    }

    #[test]
    fn test_parse_error() {
        assert!(parse("this is not valid\n".as_bytes()).is_err());
    }

    #[test]
    fn test_take_removes_entry() {
        let mut entries: Entries = [("A".to_string(), "1".to_string())].into_iter().collect();
        assert_eq!(entries.take("A").as_deref(), Some("1"));
        assert_eq!(entries.take("A"), None);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_serializes_as_map() {
        let entries = parse("B=2\nA=1\n".as_bytes()).unwrap();
        assert_eq!(serde_json::to_string(&entries).unwrap(), r#"{"B":"2","A":"1"}"#);
    }

    #[test]
    fn test_quote_value_bare() {
        assert_eq!(quote_value("localhost:8080"), "localhost:8080");
        assert_eq!(quote_value(""), "");
        assert!(matches!(quote_value("a-b_c"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_quote_value_escapes() {
        assert_eq!(quote_value("hello world"), r#""hello world""#);
        assert_eq!(quote_value(r#"escaped "value""#), r#""escaped \"value\"""#);
        assert_eq!(quote_value("$HOME"), r#""\$HOME""#);
        assert_eq!(quote_value("a\\b"), r#""a\\b""#);
        assert_eq!(quote_value("a\nb"), r#""a\nb""#);
    }

    #[test]
    fn test_quoted_values_parse_back() {
        let values = [
            "hello world",
            "it's",
            "a #b",
            "#start",
            r#"say "$HOME""#,
            "${HOME}",
            "tab\t\"q\"",
            "a\"\u{1}",
            "back\\slash",
            "two\nlines",
            "cr\r",
            "  padded  ",
            "caf\u{e9} \u{2028}",
            "'",
        ];
        for value in values {
            let line = format!("V={}\n", quote_value(value));
            let entries = parse(line.as_bytes())
                .unwrap_or_else(|e| panic!("{value:?} -> {line:?}: {e}"));
            assert_eq!(entries.get("V"), Some(value), "{line:?}");
        }
    }
}
