//! A position-tracking cursor over unit definition source text.
//!
//! Both the structural grammar and the value grammar read their input only
//! through [`Cursor`], so they share a single notion of "current character"
//! and a single way of failing at end of input.

mod span;
pub use span::{Span, line_col};

mod cursor;
pub use cursor::{Cursor, CursorError};
