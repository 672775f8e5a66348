//! The input cursor shared by every grammar layer.

use crate::Span;
use tracing::trace;

/// Error raised when the cursor is asked to read past end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor is at end of input.
    UnexpectedEof {
        /// Byte offset where input ended.
        pos: u32,
    },
}

impl CursorError {
    /// Byte offset at which the error occurred.
    pub fn position(&self) -> u32 {
        match self {
            CursorError::UnexpectedEof { pos } => *pos,
        }
    }
}

impl std::fmt::Display for CursorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CursorError::UnexpectedEof { pos } => {
                write!(f, "unexpected end of input at offset {pos}")
            }
        }
    }
}

impl std::error::Error for CursorError {}

/// A cursor over unit definition source text.
///
/// The cursor always points at a character boundary. Reading the current
/// character or advancing past the last one fails with
/// [`CursorError::UnexpectedEof`].
#[derive(Clone)]
pub struct Cursor<'src> {
    /// The source text being read.
    source: &'src str,
    /// The remaining source text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,
}

impl<'src> Cursor<'src> {
    /// Create a new cursor at the start of the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            remaining: source,
            pos: 0,
        }
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Check if there is input left to read.
    #[inline]
    pub fn unless_eof(&self) -> bool {
        !self.is_eof()
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Peek at the nth character (0-indexed) without consuming.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining.chars().nth(n)
    }

    /// The current character, or an error at end of input.
    #[inline]
    pub fn current(&self) -> Result<char, CursorError> {
        self.peek()
            .ok_or(CursorError::UnexpectedEof { pos: self.pos })
    }

    /// Move past the current character.
    pub fn advance(&mut self) -> Result<(), CursorError> {
        let c = self.current()?;
        trace!(pos = self.pos, ?c, "advance");
        self.pos += c.len_utf8() as u32;
        self.remaining = &self.remaining[c.len_utf8()..];
        Ok(())
    }

    /// Advance by `n` bytes. `n` must land on a character boundary.
    pub fn advance_by(&mut self, n: usize) -> Result<(), CursorError> {
        if n > self.remaining.len() || !self.remaining.is_char_boundary(n) {
            return Err(CursorError::UnexpectedEof {
                pos: self.source.len() as u32,
            });
        }
        self.pos += n as u32;
        self.remaining = &self.remaining[n..];
        Ok(())
    }

    /// Check if the remaining text starts with the given prefix.
    #[inline]
    pub fn rest_starts_with(&self, prefix: &str) -> bool {
        self.remaining.starts_with(prefix)
    }

    /// The unread remainder of the input.
    #[inline]
    pub fn rest(&self) -> &'src str {
        self.remaining
    }

    /// Skip spaces, tabs and line breaks.
    pub fn skip_whitespace(&mut self) {
        let trimmed = self.remaining.trim_start();
        self.pos += (self.remaining.len() - trimmed.len()) as u32;
        self.remaining = trimmed;
    }

    /// Borrow the source between two byte offsets.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'src str {
        &self.source[start as usize..end as usize]
    }

    /// Span from `start` up to the current position.
    #[inline]
    pub fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.pos)
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("current", &self.peek())
            .finish()
    }
}
