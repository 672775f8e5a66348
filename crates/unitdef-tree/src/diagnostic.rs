//! Diagnostic rendering for parser errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use unitdef_parse::{ErrorClass, ParseErrorKind, Span, line_col};

/// A parser error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Source location.
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: usize,
    /// 1-based column (in characters) of `span.start`.
    pub column: usize,
}

impl ParseError {
    /// Create a new parse error, resolving its line and column in `source`.
    pub fn new(kind: ParseErrorKind, span: Span, source: &str) -> Self {
        let (line, column) = line_col(source, span.start);
        Self {
            kind,
            span,
            line,
            column,
        }
    }

    /// Whether the structural or the value grammar rejected the input.
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range = self.span.range();
        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(self.message());
        let label = Label::new((filename, range)).with_color(Color::Red);

        match &self.kind {
            ParseErrorKind::UnexpectedEof => report
                .with_label(label.with_message("input ends here"))
                .with_help("every unit body must be closed with '}'"),

            ParseErrorKind::ExpectedKeyword => report
                .with_label(label.with_message("expected `unit` here"))
                .with_help("a definition starts with `unit=NAME,,,;`"),

            ParseErrorKind::ExpectedChar { expected, .. } => {
                report.with_label(label.with_message(format!("expected '{expected}'")))
            }

            ParseErrorKind::EmptyUnitName => report
                .with_label(label.with_message("name is empty"))
                .with_help("the first header field is the unit name and is required"),

            ParseErrorKind::EmptyUnitBody => report
                .with_label(label.with_message("empty body"))
                .with_help("a unit needs at least one parameter, usually `ty=...;`"),

            ParseErrorKind::ExpectedParameterName => report
                .with_label(label.with_message("expected a parameter name"))
                .with_help("parameters are written `name=value;`"),

            ParseErrorKind::ParameterAfterSubUnit => report
                .with_label(label.with_message("parameter follows a nested unit"))
                .with_help("move all parameters before the first nested `unit`"),

            ParseErrorKind::UnterminatedQuoted => report
                .with_label(label.with_message("string opened here"))
                .with_help("add a closing '\"'; write a literal quote as #\" and # as ##"),

            ParseErrorKind::UnterminatedTuple => report
                .with_label(label.with_message("tuple opened here"))
                .with_help("add a closing ')'"),

            ParseErrorKind::MalformedValueEnd { .. } => report
                .with_label(label.with_message("expected ',' or ';' after the value"))
                .with_help("separate values with ',' and end the parameter with ';'"),
        }
    }

    fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnexpectedEof => "unexpected end of input".to_string(),
            ParseErrorKind::ExpectedKeyword => "expected `unit` keyword".to_string(),
            ParseErrorKind::ExpectedChar { expected, found } => {
                format!("expected '{expected}', found '{}'", found.escape_debug())
            }
            ParseErrorKind::EmptyUnitName => "empty unit name".to_string(),
            ParseErrorKind::EmptyUnitBody => "unit has no parameters".to_string(),
            ParseErrorKind::ExpectedParameterName => "expected parameter name".to_string(),
            ParseErrorKind::ParameterAfterSubUnit => "parameter after nested unit".to_string(),
            ParseErrorKind::UnterminatedQuoted => "unterminated quoted string".to_string(),
            ParseErrorKind::UnterminatedTuple => "unterminated tuple".to_string(),
            ParseErrorKind::MalformedValueEnd { found } => {
                format!("unexpected '{}' after value", found.escape_debug())
            }
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message(),
            self.line,
            self.column
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use unitdef_parse::{Event, Parser};

    fn first_error(source: &str) -> ParseError {
        Parser::new(source)
            .parse_to_vec()
            .into_iter()
            .find_map(|event| match event {
                Event::Error { span, kind } => Some(ParseError::new(kind, span, source)),
                _ => None,
            })
            .expect("expected a parse error")
    }

    fn render_stripped(error: &ParseError, source: &str) -> String {
        let rendered = error.render("test.jp1", source);
        String::from_utf8(strip_ansi_escapes::strip(rendered.as_bytes())).unwrap()
    }

    #[test]
    fn test_line_and_column() {
        let source = "unit=A,,,;\n{\n\tty=g;\n\tsc=\"x;\n}";
        let error = first_error(source);
        assert_eq!(error.kind, ParseErrorKind::UnterminatedQuoted);
        assert_eq!((error.line, error.column), (4, 5));
        assert_eq!(error.class(), ErrorClass::Value);
        assert_eq!(
            error.to_string(),
            "unterminated quoted string at line 4, column 5"
        );
    }

    #[test]
    fn test_empty_body_diagnostic() {
        let source = "unit=A,,,;\n{}";
        let error = first_error(source);
        let rendered = render_stripped(&error, source);
        assert!(rendered.contains("unit has no parameters"), "{rendered}");
        assert!(rendered.contains("test.jp1"), "{rendered}");
        assert!(rendered.contains("ty=...;"), "{rendered}");
        assert_eq!(error.class(), ErrorClass::Syntax);
    }

    #[test]
    fn test_parameter_after_sub_unit_diagnostic() {
        let source = "unit=N,,,;{unit=J,,,;{ty=j;}ty=n;}";
        let error = first_error(source);
        let rendered = render_stripped(&error, source);
        assert!(rendered.contains("parameter after nested unit"), "{rendered}");
        assert!(rendered.contains("parameter follows a nested unit"), "{rendered}");
    }

    #[test]
    fn test_display_escapes_found_char() {
        let source = "unit=A,,,;\n\tty=g;";
        let error = first_error(source);
        assert_eq!(
            error.kind,
            ParseErrorKind::ExpectedChar {
                expected: '{',
                found: 't'
            }
        );
        assert_eq!(error.to_string(), "expected '{', found 't' at line 2, column 2");
    }
}
