//! Rendering of header fields and parameter values.

use std::borrow::Cow;

use unitdef_parse::{canonical_token, quote};
use unitdef_tree::{Attributes, ParameterValue, Tuple, TupleEntry};

use crate::options::TrailingAttributes;

/// Header fields as written after `unit=`.
pub fn header_fields(attributes: &Attributes, trailing: TrailingAttributes) -> String {
    let fields = attributes.fields();
    let count = match trailing {
        TrailingAttributes::Keep => fields.len(),
        TrailingAttributes::Elide => fields.iter().rposition(|f| !f.is_empty()).map_or(1, |i| i + 1),
    };
    fields[..count].join(",")
}

/// Write one parameter value.
///
/// Tokens are written verbatim with their embedded quoted runs re-escaped,
/// quoted strings are escaped and quoted.
pub fn write_value(out: &mut String, value: &ParameterValue) {
    match value {
        ParameterValue::Token(text) => {
            out.push_str(&canonical_token(text).unwrap_or(Cow::Borrowed(text)))
        }
        ParameterValue::Quoted(text) => out.push_str(&quote(text)),
        ParameterValue::Tuple(tuple) => write_tuple(out, tuple),
    }
}

fn write_tuple(out: &mut String, tuple: &Tuple) {
    out.push('(');
    for (i, entry) in tuple.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_entry(out, entry, tuple.len() == 1);
    }
    out.push(')');
}

fn write_entry(out: &mut String, entry: &TupleEntry, only: bool) {
    match entry.key() {
        Some(key) => {
            out.push_str(key);
            out.push('=');
        }
        // An empty key keeps `=` in the value, and keeps a lone empty entry
        // from reading back as `()`.
        None if entry.value().contains('=') || (only && entry.value().is_empty()) => out.push('='),
        None => {}
    }
    out.push_str(entry.value());
}
