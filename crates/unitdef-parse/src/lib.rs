//! Event-based parser for JP1/AJS unit definition text.
//!
//! The parser is a hand-written recursive descent over a
//! [`Cursor`](unitdef_cursor::Cursor). It does not build a tree; it reports
//! what it sees to a [`ParseCallback`] as a flat stream of [`Event`]s, and a
//! consumer (usually `unitdef-tree`) assembles them.
//!
//! ```text
//! unit=NET,,jp1admin,;
//! {
//!     ty=n;
//!     el=JOB,j,+80 +48;
//!     unit=JOB,,,;
//!     {
//!         ty=j;
//!         sc="/bin/echo";
//!     }
//! }
//! ```

pub use unitdef_cursor::{Cursor, CursorError, Span, line_col};

mod event;
pub use event::{ErrorClass, Event, ParseCallback, ParseErrorKind};

mod escape;
pub use escape::{ESCAPE_CHAR, canonical_token, escape_quoted, quote, unescape_quoted};

mod parser;
pub use parser::{Parser, UNIT_KEYWORD, is_parameter_name_char};
