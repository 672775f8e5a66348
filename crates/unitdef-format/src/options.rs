//! Formatting options for unit definition output.

/// How units are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Header, braces and each parameter on their own lines, sub-units
    /// indented one level.
    #[default]
    Expanded,
    /// Each top-level unit on a single line.
    Compact,
}

/// Whether empty trailing header fields are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingAttributes {
    /// Always write all four fields: `unit=A,,,;`
    #[default]
    Keep,
    /// Drop empty fields at the end: `unit=A;`
    Elide,
}

/// Indentation unit for the expanded layout.
///
/// Only tabs and spaces are offered: the parser skips whitespace before a
/// unit or parameter, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// One tab per level.
    #[default]
    Tab,
    /// The given number of spaces per level.
    Spaces(u8),
}

impl Indent {
    /// Append one level of indentation.
    pub fn write_to(self, out: &mut String) {
        match self {
            Indent::Tab => out.push('\t'),
            Indent::Spaces(width) => out.extend(std::iter::repeat_n(' ', width.into())),
        }
    }
}

/// Options for unit definition output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Indentation per level (default: a tab)
    pub indent: Indent,

    /// Line terminator (default: "\n")
    pub newline: &'static str,

    /// Layout (default: expanded)
    pub layout: Layout,

    /// Header field elision (default: keep all fields)
    pub trailing_attributes: TrailingAttributes,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: Indent::Tab,
            newline: "\n",
            layout: Layout::Expanded,
            trailing_attributes: TrailingAttributes::Keep,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// One line per top-level unit, trailing header fields elided.
    pub fn compact() -> Self {
        Self::default()
            .layout(Layout::Compact)
            .trailing_attributes(TrailingAttributes::Elide)
    }

    /// Set the indentation per level.
    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Terminate lines with `\r\n`.
    pub fn crlf(mut self) -> Self {
        self.newline = "\r\n";
        self
    }

    /// Set the layout.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set header field elision.
    pub fn trailing_attributes(mut self, trailing: TrailingAttributes) -> Self {
        self.trailing_attributes = trailing;
        self
    }
}
