//! Event types for the unit definition parser.

use std::borrow::Cow;

use crate::Span;

/// Events emitted by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'src> {
    // Document boundaries
    /// Start of input.
    DocumentStart,
    /// End of input. Never emitted after an [`Event::Error`].
    DocumentEnd,

    // Units
    /// A `unit=...;{` header has been read.
    ///
    /// Missing trailing attributes are reported as empty strings.
    UnitStart {
        /// Span of the header, from `unit` through the attribute `;`.
        span: Span,
        /// Unit name (never empty).
        name: &'src str,
        /// Permission mode field, unparsed.
        permission_mode: &'src str,
        /// JP1 user name field.
        jp1_user: &'src str,
        /// JP1 resource group name field.
        resource_group: &'src str,
    },
    /// The closing `}` of a unit.
    UnitEnd {
        /// Span of the closing brace.
        span: Span,
    },

    // Parameters
    /// Start of a parameter: the name and its `=`.
    ParameterStart {
        /// Span of the name.
        span: Span,
        /// Parameter name.
        name: &'src str,
    },
    /// The terminating `;` of a parameter.
    ParameterEnd {
        /// Span of the whole parameter, name through `;`.
        span: Span,
    },

    // Values
    /// An unquoted value.
    ///
    /// Quoted runs inside the token are kept in their escaped, quoted form.
    Token {
        /// Span of the token.
        span: Span,
        /// Token text.
        text: Cow<'src, str>,
    },
    /// A `"..."` value, after escape processing.
    Quoted {
        /// Span including both quotes.
        span: Span,
        /// Unescaped content.
        text: Cow<'src, str>,
    },
    /// Start of a tuple `( ... )`.
    TupleStart {
        /// Span of the opening paren.
        span: Span,
    },
    /// One `key=value` or `value` entry of a tuple.
    TupleEntry {
        /// Span of the entry text.
        span: Span,
        /// Text before the first `=`, if there was one.
        key: Option<&'src str>,
        /// Entry value.
        value: &'src str,
    },
    /// End of a tuple.
    TupleEnd {
        /// Span of the closing paren.
        span: Span,
    },

    // Errors
    /// Parse error. Always the last event of a failed parse.
    Error {
        /// Span where error occurred.
        span: Span,
        /// Kind of error.
        kind: ParseErrorKind,
    },
}

/// Receiver of parser events.
pub trait ParseCallback<'src> {
    /// Handle one event. Returning `false` stops the parse.
    fn event(&mut self, event: Event<'src>) -> bool;
}

impl<'src> ParseCallback<'src> for Vec<Event<'src>> {
    fn event(&mut self, event: Event<'src>) -> bool {
        self.push(event);
        true
    }
}

/// Which grammar layer rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Structural grammar: keywords, delimiters, unit bodies.
    Syntax,
    /// Value grammar: quoted strings, tuples, value termination.
    Value,
}

/// Parse error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended in the middle of a unit definition.
    UnexpectedEof,
    /// Expected the `unit` keyword.
    ExpectedKeyword,
    /// A specific delimiter was required.
    ExpectedChar {
        /// The required character.
        expected: char,
        /// What was found instead.
        found: char,
    },
    /// The unit header has an empty name field.
    EmptyUnitName,
    /// The unit body `{}` has no parameters and no sub-units.
    EmptyUnitBody,
    /// A parameter did not start with a name.
    ExpectedParameterName,
    /// A parameter appeared after a nested unit at the same level.
    ParameterAfterSubUnit,
    /// Input ended inside a `"..."` value.
    UnterminatedQuoted,
    /// Input ended inside a `( ... )` value.
    UnterminatedTuple,
    /// A value was not followed by `,` or `;`.
    MalformedValueEnd {
        /// The character that followed the value.
        found: char,
    },
}

impl ParseErrorKind {
    /// The grammar layer this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            ParseErrorKind::UnterminatedQuoted
            | ParseErrorKind::UnterminatedTuple
            | ParseErrorKind::MalformedValueEnd { .. } => ErrorClass::Value,
            _ => ErrorClass::Syntax,
        }
    }
}
