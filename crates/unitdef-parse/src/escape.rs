//! The `#` escaping used inside double-quoted text.
//!
//! Inside quotes `##` stands for `#` and `#"` for `"`. Any other `#` is kept
//! as is.

use std::borrow::Cow;

/// The escape prefix character.
pub const ESCAPE_CHAR: char = '#';

/// Escape a string for quoted output.
///
/// Returns the escaped content (without surrounding quotes).
pub fn escape_quoted(s: &str) -> Cow<'_, str> {
    if !s.contains(['#', '"']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c == ESCAPE_CHAR || c == '"' {
            result.push(ESCAPE_CHAR);
        }
        result.push(c);
    }
    Cow::Owned(result)
}

/// Unescape quoted content.
///
/// The input should be the content between quotes (without the surrounding quotes).
pub fn unescape_quoted(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHAR) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE_CHAR
            && let Some(&next) = chars.peek()
            && (next == ESCAPE_CHAR || next == '"')
        {
            result.push(next);
            chars.next();
        } else {
            result.push(c);
        }
    }
    Cow::Owned(result)
}

/// Escape and wrap in double quotes.
pub fn quote(s: &str) -> String {
    let escaped = escape_quoted(s);
    let mut out = String::with_capacity(escaped.len() + 2);
    out.push('"');
    out.push_str(&escaped);
    out.push('"');
    out
}

/// Rewrite the quoted runs embedded in unquoted token text in canonical
/// escaped form, the way the parser stores them.
///
/// Returns `None` when the text cannot be read back as a single token: it
/// starts with `(` or `"`, holds a `,` or `;` outside a quoted run, or leaves
/// a run unterminated.
pub fn canonical_token(text: &str) -> Option<Cow<'_, str>> {
    if text.starts_with(['(', '"']) {
        return None;
    }
    let mut owned: Option<String> = None;
    let mut segment = 0;
    let mut pos = 0;
    while let Some(c) = text[pos..].chars().next() {
        match c {
            ',' | ';' => return None,
            '"' => {
                let len = quoted_run_len(&text[pos..])?;
                let run = &text[pos..pos + len];
                let canonical = quote(&unescape_quoted(&run[1..len - 1]));
                if owned.is_some() || canonical != run {
                    let buf = owned.get_or_insert_with(String::new);
                    buf.push_str(&text[segment..pos]);
                    buf.push_str(&canonical);
                    segment = pos + len;
                }
                pos += len;
            }
            c => pos += c.len_utf8(),
        }
    }
    Some(match owned {
        Some(mut buf) => {
            buf.push_str(&text[segment..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    })
}

/// Byte length of the `"..."` run at the start of `run`, closing quote included.
fn quoted_run_len(run: &str) -> Option<usize> {
    let bytes = run.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => return Some(i + 1),
            b'#' if matches!(bytes.get(i + 1), Some(b'#' | b'"')) => i += 2,
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_canonical_token() {
        assert_eq!(canonical_token("+240 +96").as_deref(), Some("+240 +96"));
        assert_eq!(canonical_token("").as_deref(), Some(""));
        assert!(matches!(canonical_token(r#"a"x##y"b"#), Some(Cow::Borrowed(_))));
        assert_eq!(
            canonical_token(r#"a"x#y"b"#).as_deref(),
            Some(r#"a"x##y"b"#)
        );
        assert_eq!(
            canonical_token(r#"pre"a,b;c"post"#).as_deref(),
            Some(r#"pre"a,b;c"post"#)
        );
        for text in ["a;b", "a,b", "(a)", r#""a""#, r#"a"open"#, r#"a"x#""#] {
            assert_eq!(canonical_token(text), None, "{text:?}");
        }
    }

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape_quoted("plain"), "plain");
        assert_eq!(escape_quoted("a#b"), "a##b");
        assert_eq!(escape_quoted(r#"say "hi""#), r##"say #"hi#""##);
        assert!(matches!(escape_quoted("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_quoted() {
        assert_eq!(unescape_quoted("a##b"), "a#b");
        assert_eq!(unescape_quoted(r##"#"x#""##), r#""x""#);
        // Unrecognised sequences stay verbatim.
        assert_eq!(unescape_quoted("#x"), "#x");
        assert_eq!(unescape_quoted("end#"), "end#");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(r#"/bin/sh -c "echo #1""#), r##""/bin/sh -c #"echo ##1#"""##);
        assert_eq!(quote(""), r#""""#);
    }

    proptest! {
        #[test]
        fn unescape_inverts_escape(s in any::<String>()) {
            let escaped = escape_quoted(&s);
            prop_assert_eq!(unescape_quoted(&escaped), s.as_str());
        }

        #[test]
        fn escape_leaves_no_bare_quote(s in "[a-z\"# ]{0,24}") {
            let escaped = escape_quoted(&s);
            let mut chars = escaped.chars();
            while let Some(c) = chars.next() {
                if c == '#' {
                    let next = chars.next();
                    prop_assert!(matches!(next, Some('#') | Some('"')));
                } else {
                    prop_assert_ne!(c, '"');
                }
            }
        }
    }
}
