//! Shared string and character-class helpers.
//!
//! These are used by the keyword templates and by the keyword-map builders,
//! and are exposed for callers that prepare metadata for them.

use std::borrow::Cow;

// ============================================================================
// Brace Escaping
// ============================================================================

/// Check whether the byte at `index` is preceded by a backslash.
///
/// Only the single preceding byte is inspected, so `\\{` still counts as an
/// escaped brace.
pub fn is_escaped(bytes: &[u8], index: usize) -> bool {
    index > 0 && bytes[index - 1] == b'\\'
}

/// Prefix every `{` and `}` with a backslash so the text is never read as a
/// conditional block delimiter.
///
/// # Examples
///
/// ```
/// use fb2pack::util::escape_braces;
///
/// assert_eq!(escape_braces("plain"), "plain");
/// assert_eq!(escape_braces("a{b}"), "a\\{b\\}");
/// ```
pub fn escape_braces(s: &str) -> Cow<'_, str> {
    if !s.contains(['{', '}']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c == '{' || c == '}' {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Turn `\{` and `\}` back into literal braces. Other backslashes are kept.
///
/// # Examples
///
/// ```
/// use fb2pack::util::unescape_braces;
///
/// assert_eq!(unescape_braces("\\{literal\\}"), "{literal}");
/// assert_eq!(unescape_braces("C:\\books"), "C:\\books");
/// ```
pub fn unescape_braces(s: &str) -> Cow<'_, str> {
    if !s.contains("\\{") && !s.contains("\\}") {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && matches!(next, '{' | '}')
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

// ============================================================================
// Name Parts
// ============================================================================

/// Build an initial ("J.") from a name part. Blank input gives an empty string.
pub fn initial(s: &str) -> String {
    match s.chars().next() {
        Some(c) => format!("{c}."),
        None => String::new(),
    }
}

/// Abbreviate a series name to the lower-cased first letters of its words.
///
/// Words are separated by single spaces; runs of spaces produce empty words
/// which are ignored.
///
/// # Examples
///
/// ```
/// use fb2pack::util::abbreviate;
///
/// assert_eq!(abbreviate("The Wheel of Time"), "twot");
/// assert_eq!(abbreviate("  Дозоры  "), "д");
/// ```
pub fn abbreviate(s: &str) -> String {
    s.split(' ')
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_lowercase()
}

/// Format `n` zero-padded to at least `width` digits.
pub fn pad_number(n: u32, width: usize) -> String {
    format!("{n:0width$}")
}

// ============================================================================
// Text Cleanup
// ============================================================================

/// Remove carriage returns, line feeds and spaces from a name.
///
/// Returns the cleaned name and whether anything was removed.
pub fn sanitize_name(s: &str) -> (String, bool) {
    let out: String = s.chars().filter(|c| !matches!(c, '\r' | '\n' | ' ')).collect();
    let changed = out.len() != s.len();
    (out, changed)
}

/// Strip footnote leftovers from a title.
///
/// On every line the span from the first `[` or `{` to the last `]` or `}`
/// is removed; carriage returns are dropped afterwards.
///
/// # Examples
///
/// ```
/// use fb2pack::util::sanitize_title;
///
/// assert_eq!(sanitize_title("Chapter One[1]"), "Chapter One");
/// assert_eq!(sanitize_title("Title\r"), "Title");
/// ```
pub fn sanitize_title(s: &str) -> String {
    s.split('\n')
        .map(strip_note_span)
        .collect::<Vec<_>>()
        .join("\n")
        .replace('\r', "")
}

fn strip_note_span(line: &str) -> Cow<'_, str> {
    let Some(start) = line.find(['[', '{']) else {
        return Cow::Borrowed(line);
    };
    match line.rfind([']', '}']) {
        Some(end) if end > start => Cow::Owned(format!("{}{}", &line[..start], &line[end + 1..])),
        _ => Cow::Borrowed(line),
    }
}

/// Join all lines of `s` with single spaces.
pub fn all_lines(s: &str) -> String {
    s.split('\n').collect::<Vec<_>>().join(" ")
}

/// Return the first line of `s`.
pub fn first_line(s: &str) -> &str {
    s.split('\n').next().unwrap_or(s)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_is_escaped() {
        let bytes = b"a\\{b{";
        assert!(is_escaped(bytes, 2));
        assert!(!is_escaped(bytes, 4));
        assert!(!is_escaped(bytes, 0));
    }

    #[test]
    fn test_escape_braces_borrows_when_clean() {
        assert!(matches!(escape_braces("no braces"), Cow::Borrowed(_)));
        assert!(matches!(unescape_braces("no braces"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_keeps_unrelated_backslashes() {
        assert_eq!(unescape_braces("a\\b\\{c"), "a\\b{c");
        assert_eq!(unescape_braces("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial("Fyodor"), "F.");
        assert_eq!(initial("Лев"), "Л.");
        assert_eq!(initial(""), "");
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("Song of Ice and Fire"), "soiaf");
        assert_eq!(abbreviate("single"), "s");
        assert_eq!(abbreviate(""), "");
    }

    #[test]
    fn test_pad_number() {
        assert_eq!(pad_number(7, 3), "007");
        assert_eq!(pad_number(1234, 2), "1234");
        assert_eq!(pad_number(5, 0), "5");
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("a b\r\nc"), ("abc".to_string(), true));
        assert_eq!(sanitize_name("abc"), ("abc".to_string(), false));
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Part {note} two [x]"), "Part ");
        assert_eq!(sanitize_title("one[1]\r\ntwo"), "one\ntwo");
        assert_eq!(sanitize_title("closing] before [opening"), "closing] before [opening");
    }

    #[test]
    fn test_line_helpers() {
        assert_eq!(all_lines("a\nb\nc"), "a b c");
        assert_eq!(first_line("a\nb"), "a");
        assert_eq!(first_line(""), "");
    }

    proptest! {
        #[test]
        fn prop_unescape_reverses_escape(s in "[a-z{}\\\\ ]{0,24}") {
            let escaped = escape_braces(&s);
            let unescaped = unescape_braces(&escaped);
            prop_assert_eq!(unescaped.as_ref(), s.as_str());
        }
    }
}
