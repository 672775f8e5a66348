//! Byte ranges into unit definition text.

use std::ops::Range;

/// A half-open byte range `start..end` of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span {start}..{end} is reversed");
        Span { start, end }
    }

    /// A zero-width span, used to point at a position such as an error.
    pub fn empty(at: u32) -> Self {
        Span::new(at, at)
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// The covered text. Panics if the span does not fall on char boundaries of `source`.
    pub fn slice(self, source: &str) -> &str {
        &source[self.range()]
    }

    /// The span as a `usize` range, the form diagnostic renderers expect.
    pub fn range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Compute the 1-based line and column (in characters) of a byte offset.
///
/// Offsets past the end of `source` are clamped to the end. `\r\n` counts as
/// a single line break.
pub fn line_col(source: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(source.len());
    let mut line = 1;
    let mut col = 1;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        match c {
            '\n' => {
                line += 1;
                col = 1;
            }
            '\r' => {}
            _ => col += 1,
        }
    }
    (line, col)
}
