//! Parameter value types.
//!
//! Every parameter value has exactly one of three shapes:
//! - `g` is `ParameterValue::Token("g")`
//! - `"/bin/echo"` is `ParameterValue::Quoted("/bin/echo")` (unescaped)
//! - `(f=A,t=B)` is `ParameterValue::Tuple(...)`

use std::fmt;

/// One value of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterValue {
    /// Unquoted text. Embedded quoted runs are kept in escaped, quoted form.
    Token(String),
    /// Content of a `"..."` value, after escape processing.
    Quoted(String),
    /// Parenthesized list of entries.
    Tuple(Tuple),
}

/// The shape of a [`ParameterValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`ParameterValue::Token`]
    Token,
    /// [`ParameterValue::Quoted`]
    Quoted,
    /// [`ParameterValue::Tuple`]
    Tuple,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Token => "token",
            ValueKind::Quoted => "quoted string",
            ValueKind::Tuple => "tuple",
        })
    }
}

impl ParameterValue {
    /// Create an unquoted token value.
    pub fn token(text: impl Into<String>) -> Self {
        ParameterValue::Token(text.into())
    }

    /// Create a quoted string value from unescaped content.
    pub fn quoted(text: impl Into<String>) -> Self {
        ParameterValue::Quoted(text.into())
    }

    /// The shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            ParameterValue::Token(_) => ValueKind::Token,
            ParameterValue::Quoted(_) => ValueKind::Quoted,
            ParameterValue::Tuple(_) => ValueKind::Tuple,
        }
    }

    /// Get as token text.
    pub fn as_token(&self) -> Option<&str> {
        match self {
            ParameterValue::Token(s) => Some(s),
            _ => None,
        }
    }

    /// Get as unescaped quoted content.
    pub fn as_quoted(&self) -> Option<&str> {
        match self {
            ParameterValue::Quoted(s) => Some(s),
            _ => None,
        }
    }

    /// Get as tuple.
    pub fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            ParameterValue::Tuple(t) => Some(t),
            _ => None,
        }
    }

    /// Text of a token or quoted value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Token(s) | ParameterValue::Quoted(s) => Some(s),
            ParameterValue::Tuple(_) => None,
        }
    }
}

impl From<Tuple> for ParameterValue {
    fn from(tuple: Tuple) -> Self {
        ParameterValue::Tuple(tuple)
    }
}

/// An ordered list of tuple entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tuple {
    pub(crate) entries: Vec<TupleEntry>,
}

/// One entry of a [`Tuple`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleEntry {
    /// Never `Some("")`: an empty key means no key.
    key: Option<String>,
    value: String,
}

impl TupleEntry {
    /// Create an entry without a key.
    pub fn unkeyed(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    /// Create a `key=value` entry. An empty key is stored as no key.
    pub fn keyed(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            key: (!key.is_empty()).then_some(key),
            value: value.into(),
        }
    }

    /// The key before the `=`, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The entry value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Tuple {
    /// Create an empty tuple.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn with(mut self, entry: TupleEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Value of the first entry with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key() == Some(key))
            .map(TupleEntry::value)
    }

    /// Entry at position `index`.
    pub fn at(&self, index: usize) -> Option<&TupleEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = &TupleEntry> {
        self.entries.iter()
    }
}

impl FromIterator<TupleEntry> for Tuple {
    fn from_iter<I: IntoIterator<Item = TupleEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_shape() {
        let token = ParameterValue::token("g");
        assert_eq!(token.kind(), ValueKind::Token);
        assert_eq!(token.as_token(), Some("g"));
        assert_eq!(token.as_quoted(), None);
        assert!(token.as_tuple().is_none());

        let quoted = ParameterValue::quoted("a b");
        assert_eq!(quoted.as_quoted(), Some("a b"));
        assert_eq!(quoted.as_token(), None);
        assert_eq!(quoted.as_text(), Some("a b"));
    }

    #[test]
    fn test_tuple_lookup() {
        let tuple: Tuple = [
            TupleEntry::keyed("f", "A"),
            TupleEntry::keyed("t", "B"),
            TupleEntry::unkeyed("con"),
        ]
        .into_iter()
        .collect();
        assert_eq!(tuple.len(), 3);
        assert_eq!(tuple.get("f"), Some("A"));
        assert_eq!(tuple.get("t"), Some("B"));
        assert_eq!(tuple.get("x"), None);
        assert_eq!(tuple.at(2).map(TupleEntry::value), Some("con"));
        assert_eq!(tuple.at(2).and_then(TupleEntry::key), None);
    }

    #[test]
    fn test_empty_key_means_no_key() {
        assert_eq!(TupleEntry::keyed("", "v"), TupleEntry::unkeyed("v"));
    }
}
