//! Decode errors.

use std::fmt;

use unitdef_tree::ValueKind;

/// A parameter could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Name of the parameter being decoded.
    pub parameter: String,
    /// What went wrong.
    pub kind: DecodeErrorKind,
}

/// Decode error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The decoder was applied to a parameter with another name.
    WrongParameter {
        /// Name the decoder handles.
        expected: &'static str,
    },
    /// The parameter has an unsupported number of values.
    Arity {
        /// Human-readable description of the accepted counts.
        expected: &'static str,
        /// Number of values found.
        found: usize,
    },
    /// A value has the wrong shape.
    WrongShape {
        /// Index of the value.
        index: usize,
        /// Shape the decoder needs.
        expected: ValueKind,
        /// Shape found.
        found: ValueKind,
    },
    /// A value does not match the parameter's syntax.
    Pattern {
        /// The syntax, e.g. `+<h> +<v>`.
        expected: &'static str,
        /// The offending text.
        found: String,
    },
    /// A numeric field is not a plain base-10 number.
    Numeral(String),
    /// A number is outside its allowed range.
    OutOfRange {
        /// The value found.
        value: u64,
        /// Smallest allowed value.
        min: u64,
        /// Largest allowed value.
        max: u64,
    },
    /// An enumerated field has an unknown code.
    UnknownCode(String),
    /// No decoder is registered for the parameter name.
    NoDecoder,
}

impl DecodeError {
    /// Create an error for the named parameter.
    pub fn new(parameter: impl Into<String>, kind: DecodeErrorKind) -> Self {
        Self {
            parameter: parameter.into(),
            kind,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot decode `{}`: ", self.parameter)?;
        match &self.kind {
            DecodeErrorKind::WrongParameter { expected } => {
                write!(f, "decoder only handles `{}`", expected)
            }
            DecodeErrorKind::Arity { expected, found } => {
                write!(f, "expected {}, found {} value(s)", expected, found)
            }
            DecodeErrorKind::WrongShape {
                index,
                expected,
                found,
            } => write!(f, "value {} is a {}, expected a {}", index + 1, found, expected),
            DecodeErrorKind::Pattern { expected, found } => {
                write!(f, "`{}` does not match `{}`", found, expected)
            }
            DecodeErrorKind::Numeral(text) => write!(f, "`{}` is not a number", text),
            DecodeErrorKind::OutOfRange { value, min, max } => {
                write!(f, "{} is outside {}..={}", value, min, max)
            }
            DecodeErrorKind::UnknownCode(code) => write!(f, "unknown code `{}`", code),
            DecodeErrorKind::NoDecoder => write!(f, "no decoder for this parameter"),
        }
    }
}

impl std::error::Error for DecodeError {}
