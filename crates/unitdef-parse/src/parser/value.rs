//! Grammar for one parameter value: raw token, quoted string or tuple.

use std::borrow::Cow;

use tracing::trace;
use unitdef_cursor::Span;

use super::{Parser, Step};
use crate::{Event, ParseCallback, ParseErrorKind, escape::quote, unescape_quoted};

impl<'src> Parser<'src> {
    /// Parse one value, leaving the cursor on the character after it.
    pub(super) fn value<C: ParseCallback<'src>>(&mut self, callback: &mut C) -> Step {
        match self.cursor.current()? {
            '(' => self.tuple(callback),
            '"' => {
                let (span, text) = self.quoted()?;
                self.emit(callback, Event::Quoted { span, text })
            }
            _ => {
                let (span, text) = self.token()?;
                self.emit(callback, Event::Token { span, text })
            }
        }
    }

    /// `"..."` with `##` and `#"` escapes. The cursor must be on the opening quote.
    fn quoted(&mut self) -> Step<(Span, Cow<'src, str>)> {
        let start = self.cursor.position();
        self.cursor.advance()?;
        let content_start = self.cursor.position();
        loop {
            match self.cursor.peek() {
                None => {
                    return self.fail(
                        self.cursor.span_from(start),
                        ParseErrorKind::UnterminatedQuoted,
                    );
                }
                Some('"') => break,
                Some('#') if matches!(self.cursor.peek_nth(1), Some('#' | '"')) => {
                    self.cursor.advance_by(2)?;
                }
                Some(_) => self.cursor.advance()?,
            }
        }
        let raw = self.cursor.slice(content_start, self.cursor.position());
        self.cursor.advance()?;
        Ok((self.cursor.span_from(start), unescape_quoted(raw)))
    }

    /// Unquoted text up to `,` or `;`.
    ///
    /// Embedded quoted runs are kept quoted, rewritten in canonical escaped
    /// form.
    fn token(&mut self) -> Step<(Span, Cow<'src, str>)> {
        let start = self.cursor.position();
        let mut owned: Option<String> = None;
        let mut segment = start;
        loop {
            match self.cursor.current()? {
                ',' | ';' => break,
                '"' => {
                    let buf = owned.get_or_insert_with(String::new);
                    buf.push_str(self.cursor.slice(segment, self.cursor.position()));
                    let (_, text) = self.quoted()?;
                    buf.push_str(&quote(&text));
                    segment = self.cursor.position();
                }
                _ => self.cursor.advance()?,
            }
        }
        let end = self.cursor.position();
        let text = match owned {
            Some(mut buf) => {
                buf.push_str(self.cursor.slice(segment, end));
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(self.cursor.slice(start, end)),
        };
        Ok((Span::new(start, end), text))
    }

    /// `( entry [, entry]* )` where an entry is `key=value` or `value`.
    fn tuple<C: ParseCallback<'src>>(&mut self, callback: &mut C) -> Step {
        let open = self.here();
        self.cursor.advance()?;
        self.emit(callback, Event::TupleStart { span: open })?;

        if self.cursor.peek() != Some(')') {
            loop {
                let entry_start = self.cursor.position();
                let mut split = None;
                loop {
                    match self.cursor.peek() {
                        None => {
                            return self.fail(
                                self.cursor.span_from(open.start),
                                ParseErrorKind::UnterminatedTuple,
                            );
                        }
                        Some(',' | ')') => break,
                        Some('=') if split.is_none() => {
                            split = Some(self.cursor.position());
                            self.cursor.advance()?;
                        }
                        Some(_) => self.cursor.advance()?,
                    }
                }
                let end = self.cursor.position();
                let (key, value) = match split {
                    Some(eq) => (
                        Some(self.cursor.slice(entry_start, eq)),
                        self.cursor.slice(eq + 1, end),
                    ),
                    None => (None, self.cursor.slice(entry_start, end)),
                };
                trace!(?key, value, "tuple entry");
                self.emit(
                    callback,
                    Event::TupleEntry {
                        span: Span::new(entry_start, end),
                        key,
                        value,
                    },
                )?;
                if self.cursor.current()? == ')' {
                    break;
                }
                self.cursor.advance()?;
            }
        }

        let close = self.here();
        self.cursor.advance()?;
        self.emit(callback, Event::TupleEnd { span: close })
    }
}
