//! Recursive-descent parser for unit definitions.
//!
//! The structural grammar lives here; the grammar for a single parameter
//! value is in [`value`].

use tracing::{debug, trace};
use unitdef_cursor::{Cursor, CursorError, Span};

use crate::{Event, ParseCallback, ParseErrorKind};

mod value;

#[cfg(test)]
mod tests;

/// The keyword that opens every unit definition.
pub const UNIT_KEYWORD: &str = "unit";

/// Why the grammar stopped early.
enum Halt {
    /// The input is malformed.
    Error { span: Span, kind: ParseErrorKind },
    /// The callback asked us to stop.
    Stopped,
}

impl From<CursorError> for Halt {
    fn from(err: CursorError) -> Self {
        Halt::Error {
            span: Span::empty(err.position()),
            kind: ParseErrorKind::UnexpectedEof,
        }
    }
}

type Step<T = ()> = Result<T, Halt>;

/// Recursive-descent parser for unit definitions.
///
/// A parse either reports a complete document (ending with
/// [`Event::DocumentEnd`]) or stops at the first error, which is reported as a
/// single [`Event::Error`]. There is no recovery.
#[derive(Clone)]
pub struct Parser<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Run the parser, feeding every event to `callback`.
    ///
    /// Returns `true` if the whole input was parsed without error.
    pub fn parse<C: ParseCallback<'src>>(mut self, callback: &mut C) -> bool {
        match self.document(callback) {
            Ok(()) => true,
            Err(Halt::Stopped) => false,
            Err(Halt::Error { span, kind }) => {
                debug!(?kind, ?span, "parse failed");
                callback.event(Event::Error { span, kind });
                false
            }
        }
    }

    /// Parse all events into a vector.
    pub fn parse_to_vec(self) -> Vec<Event<'src>> {
        let mut events = Vec::new();
        self.parse(&mut events);
        events
    }

    fn emit<C: ParseCallback<'src>>(&self, callback: &mut C, event: Event<'src>) -> Step {
        trace!(?event, "emit");
        if callback.event(event) {
            Ok(())
        } else {
            Err(Halt::Stopped)
        }
    }

    fn fail<T>(&self, span: Span, kind: ParseErrorKind) -> Step<T> {
        Err(Halt::Error { span, kind })
    }

    /// Span of the character under the cursor (empty at end of input).
    fn here(&self) -> Span {
        let pos = self.cursor.position();
        let len = self.cursor.peek().map_or(0, |c| c.len_utf8() as u32);
        Span::new(pos, pos + len)
    }

    /// Consume `expected` or fail.
    fn expect(&mut self, expected: char) -> Step {
        let found = self.cursor.current()?;
        if found != expected {
            return self.fail(self.here(), ParseErrorKind::ExpectedChar { expected, found });
        }
        self.cursor.advance()?;
        Ok(())
    }

    /// Whether the cursor sits on `unit` followed by `=` or whitespace.
    fn at_unit_keyword(&self) -> bool {
        self.cursor.rest_starts_with(UNIT_KEYWORD)
            && self
                .cursor
                .peek_nth(UNIT_KEYWORD.len())
                .is_some_and(|c| c == '=' || c.is_whitespace())
    }

    fn document<C: ParseCallback<'src>>(&mut self, callback: &mut C) -> Step {
        self.emit(callback, Event::DocumentStart)?;
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                break;
            }
            self.unit(callback)?;
        }
        self.emit(callback, Event::DocumentEnd)
    }

    fn unit<C: ParseCallback<'src>>(&mut self, callback: &mut C) -> Step {
        self.cursor.skip_whitespace();
        let start = self.cursor.position();
        if !self.at_unit_keyword() {
            return self.fail(self.here(), ParseErrorKind::ExpectedKeyword);
        }
        // The keyword and its single separator character.
        self.cursor.advance_by(UNIT_KEYWORD.len())?;
        self.cursor.advance()?;

        // At most four comma-separated attributes; missing ones stay empty.
        let mut fields = [""; 4];
        let mut name_span = self.here();
        for (i, field) in fields.iter_mut().enumerate() {
            if i > 0 {
                self.cursor.advance()?;
            }
            let field_start = self.cursor.position();
            *field = self.attribute()?;
            if i == 0 {
                name_span = self.cursor.span_from(field_start);
            }
            if self.cursor.current()? == ';' {
                break;
            }
        }
        if fields[0].is_empty() {
            return self.fail(name_span, ParseErrorKind::EmptyUnitName);
        }
        self.expect(';')?;
        let header = self.cursor.span_from(start);

        self.cursor.skip_whitespace();
        let body_start = self.cursor.position();
        self.expect('{')?;
        self.cursor.skip_whitespace();

        let [name, permission_mode, jp1_user, resource_group] = fields;
        debug!(name, "unit");
        self.emit(
            callback,
            Event::UnitStart {
                span: header,
                name,
                permission_mode,
                jp1_user,
                resource_group,
            },
        )?;

        if self.cursor.current()? == '}' {
            self.cursor.advance()?;
            return self.fail(
                self.cursor.span_from(body_start),
                ParseErrorKind::EmptyUnitBody,
            );
        }

        if !self.at_unit_keyword() {
            loop {
                self.parameter(callback)?;
                self.cursor.skip_whitespace();
                if self.cursor.current()? == '}' {
                    return self.close_unit(callback);
                }
                if self.at_unit_keyword() {
                    break;
                }
            }
        }

        // Once a sub-unit appears, only sub-units may follow at this level.
        while self.at_unit_keyword() {
            self.unit(callback)?;
            self.cursor.skip_whitespace();
        }

        match self.cursor.current()? {
            '}' => self.close_unit(callback),
            c if is_parameter_name_char(c) => {
                self.fail(self.here(), ParseErrorKind::ParameterAfterSubUnit)
            }
            found => self.fail(
                self.here(),
                ParseErrorKind::ExpectedChar {
                    expected: '}',
                    found,
                },
            ),
        }
    }

    fn close_unit<C: ParseCallback<'src>>(&mut self, callback: &mut C) -> Step {
        let span = self.here();
        self.expect('}')?;
        self.emit(callback, Event::UnitEnd { span })
    }

    /// One attribute field, up to (not including) the next `,` or `;`.
    fn attribute(&mut self) -> Step<&'src str> {
        let start = self.cursor.position();
        loop {
            match self.cursor.current()? {
                ',' | ';' => break,
                _ => self.cursor.advance()?,
            }
        }
        Ok(self.cursor.slice(start, self.cursor.position()))
    }

    /// `name=value[,value...];`
    fn parameter<C: ParseCallback<'src>>(&mut self, callback: &mut C) -> Step {
        let start = self.cursor.position();
        let name = self.parameter_name()?;
        self.emit(
            callback,
            Event::ParameterStart {
                span: Span::new(start, start + name.len() as u32),
                name,
            },
        )?;

        loop {
            // Skip the `=` before the first value, or the `,` between values.
            self.cursor.advance()?;
            self.value(callback)?;
            match self.cursor.current()? {
                ',' => continue,
                ';' => break,
                found => {
                    return self.fail(self.here(), ParseErrorKind::MalformedValueEnd { found });
                }
            }
        }
        self.cursor.advance()?;
        trace!(name, "parameter");
        self.emit(
            callback,
            Event::ParameterEnd {
                span: self.cursor.span_from(start),
            },
        )
    }

    /// The parameter name, leaving the cursor on its `=`.
    fn parameter_name(&mut self) -> Step<&'src str> {
        let start = self.cursor.position();
        loop {
            match self.cursor.current()? {
                '=' => break,
                c if is_parameter_name_char(c) => self.cursor.advance()?,
                found => {
                    if self.cursor.position() == start {
                        return self.fail(self.here(), ParseErrorKind::ExpectedParameterName);
                    }
                    return self.fail(
                        self.here(),
                        ParseErrorKind::ExpectedChar {
                            expected: '=',
                            found,
                        },
                    );
                }
            }
        }
        if self.cursor.position() == start {
            return self.fail(self.here(), ParseErrorKind::ExpectedParameterName);
        }
        Ok(self.cursor.slice(start, self.cursor.position()))
    }
}

/// Whether `c` may appear in a parameter name.
pub fn is_parameter_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | ';' | ',' | '{' | '}' | '(' | ')' | '"')
}
