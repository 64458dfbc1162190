//! Character-data normalization and reST escaping.
//!
//! Newlines in documentation markup are significant (they survive into the output and the
//! serializer relies on them), horizontal space next to them is not. Every run of text that ends
//! up in an inline node goes through [`normalize_inline`]: entity decoding first, then escaping of
//! the characters reST would otherwise read as markup.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker the upstream comment extractor leaves where it joined wrapped lines.
pub const CONTINUATION_MARKER: &str = "&cont;";

const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    (CONTINUATION_MARKER, ""),
];

static NEWLINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\x0C]*\n[ \t\r\x0C]*").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0C')
}

/// Collapse whitespace.
///
/// With `preserve_newlines`, horizontal whitespace adjacent to a newline is absorbed into it and
/// everything else is left alone. Without it, every whitespace run (newlines included) becomes a
/// single space.
pub fn collapse_whitespace(s: &str, preserve_newlines: bool) -> String {
    if preserve_newlines {
        NEWLINE_RUN.replace_all(s, "\n").into_owned()
    } else {
        WHITESPACE_RUN.replace_all(s, " ").into_owned()
    }
}

/// Strip leading spaces and tabs, but never newlines.
pub fn strip_leading_horizontal(s: &str) -> &str {
    s.trim_start_matches(is_horizontal_space)
}

/// Decode the fixed entity set (`&lt;`, `&gt;`, `&amp;` and the continuation marker).
///
/// Single pass, so `&amp;lt;` decodes to `&lt;` and not to `<`. Anything else starting with `&`
/// is left untouched.
pub fn unescape_entities(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('&') {
        output.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, replacement)) => {
                output.push_str(replacement);
                rest = &rest[entity.len()..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Escape characters reST treats as markup: backslashes, asterisks, and underscores sitting on a
/// word boundary (`name_` would otherwise be a reference, `_name` a target).
pub fn escape_target_specials(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut output = String::with_capacity(s.len());

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '\\' => output.push_str("\\\\"),
            '*' => output.push_str("\\*"),
            '_' => {
                let prev = i.checked_sub(1).map(|p| chars[p]);
                let next = chars.get(i + 1).copied();
                let trailing = !next.is_some_and(is_word_char);
                let leading = !prev.is_some_and(is_word_char);
                if trailing || leading {
                    output.push_str("\\_");
                } else {
                    output.push('_');
                }
            }
            _ => output.push(c),
        }
    }

    output
}

/// Unescape then escape: what every inline text run goes through before insertion.
pub fn normalize_inline(s: &str) -> String {
    escape_target_specials(&unescape_entities(s))
}

/// Split into (leading whitespace, core, trailing whitespace). Newlines count as whitespace.
pub fn split_surrounding_whitespace(s: &str) -> (&str, &str, &str) {
    let core_start = s.len() - s.trim_start().len();
    let core_end = s.trim_end().len();
    if core_end <= core_start {
        return (s, "", "");
    }
    (&s[..core_start], &s[core_start..core_end], &s[core_end..])
}
