//! Keyword templates with conditional blocks.
//!
//! Patterns such as `#title{ (#series #padnumber)}` are expanded against a
//! keyword map. Text inside `{` and `}` is a conditional block: it is dropped
//! entirely unless at least one keyword in it resolves to a non-empty value.
//! Blocks may nest, and either brace can be escaped with a backslash to make
//! it literal.
//!
//! # Example
//!
//! ```
//! use fb2pack::template::{Keywords, expand};
//!
//! let mut keywords = Keywords::new();
//! keywords.insert("#title".into(), "Dune".into());
//! keywords.insert("#series".into(), "".into());
//!
//! assert_eq!(expand("#title{ (#series)}", &keywords), "Dune");
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::util::{escape_braces, is_escaped, unescape_braces};

mod keywords;

pub use keywords::{AuthorName, BookInfo, author_keywords, file_name_keywords, title_keywords};

/// Keyword to replacement text.
pub type Keywords = BTreeMap<String, String>;

/// Follows a block value that ends in a backslash, so that backslash never
/// escapes a brace from the pattern. Removed before the top-level pass.
const VALUE_BREAK: char = '\u{E000}';

/// Result of one flat substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Text with every known keyword replaced.
    pub text: String,
    /// At least one keyword occurred in the text.
    pub matched: bool,
    /// At least one keyword that occurred had a non-empty value.
    pub non_empty: bool,
}

/// Byte offsets of a conditional block's braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub open: usize,
    pub close: usize,
}

/// Expand `pattern` against `keywords`.
///
/// Blocks are resolved one at a time: the first unescaped `}` closes the
/// nearest unescaped `{` before it, the block is replaced by its expansion,
/// and the whole string is scanned again. A block whose keywords are all
/// missing or empty disappears together with its literal text. Once no block
/// remains, escaped braces become literal and the top-level text gets a plain
/// substitution pass; unknown keywords are left as they are.
pub fn expand(pattern: &str, keywords: &Keywords) -> String {
    let mut text = pattern.to_owned();

    // Every splice removes one unescaped brace pair and inserts none.
    while let Some(region) = find_region(&text) {
        let inner = expand_block(&text[region.open + 1..region.close], keywords);
        text.replace_range(region.open..=region.close, &inner);
    }

    let text = unescape_braces(&text).replace(&format!("\\{VALUE_BREAK}"), "\\");
    substitute_keywords(&text, keywords).text
}

/// Locate the next conditional block in `text`.
///
/// The scan stops at the first unescaped `}`; the block opens at the last
/// unescaped `{` seen before it. A `}` with no `{` before it means there is
/// no block at all, even if a well-formed pair follows later.
pub fn find_region(text: &str) -> Option<Region> {
    let bytes = text.as_bytes();
    let mut open = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'{' if !is_escaped(bytes, i) => open = Some(i),
            b'}' if !is_escaped(bytes, i) => {
                return open.map(|open| Region { open, close: i });
            }
            _ => {}
        }
    }
    None
}

/// Replace every keyword in `text`, in [`substitution_order`].
///
/// Empty keys are ignored.
///
/// # Examples
///
/// ```
/// use fb2pack::template::{Keywords, substitute_keywords};
///
/// let keywords = Keywords::from([
///     ("#author".to_string(), "A".to_string()),
///     ("#authors".to_string(), "A and B".to_string()),
/// ]);
/// let sub = substitute_keywords("#authors-#author", &keywords);
/// assert_eq!(sub.text, "A and B-A");
/// assert!(sub.matched && sub.non_empty);
/// ```
pub fn substitute_keywords(text: &str, keywords: &Keywords) -> Substitution {
    substitute(text, keywords, false)
}

/// Order in which keywords are substituted: longest key first, equal lengths
/// in descending key order.
///
/// A key is always visited before any key it contains, so `#authors` is
/// replaced before `#author` and `#abbrseries` before `#series`.
pub fn substitution_order(keywords: &Keywords) -> Vec<(&str, &str)> {
    let mut ordered: Vec<_> = keywords
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    ordered.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| b.cmp(a)));
    ordered
}

fn expand_block(inner: &str, keywords: &Keywords) -> String {
    // Values are made inert so a later scan never sees their braces.
    let sub = substitute(inner, keywords, true);
    if sub.non_empty { sub.text } else { String::new() }
}

fn substitute(text: &str, keywords: &Keywords, escape_values: bool) -> Substitution {
    let mut text = text.to_owned();
    let mut matched = false;
    let mut non_empty = false;

    for (key, value) in substitution_order(keywords) {
        if key.is_empty() || !text.contains(key) {
            continue;
        }
        let value = if escape_values {
            inert_value(value)
        } else {
            value.into()
        };
        text = text.replace(key, &value);
        matched = true;
        non_empty |= !value.is_empty();
    }

    Substitution {
        text,
        matched,
        non_empty,
    }
}

fn inert_value(value: &str) -> Cow<'_, str> {
    let escaped = escape_braces(value);
    if escaped.ends_with('\\') {
        Cow::Owned(format!("{escaped}{VALUE_BREAK}"))
    } else {
        escaped
    }
}
