//! Escaping rules applied to translated text before it is written.
//!
//! Both rules first strip existing escapes and then escape again, so running
//! them over already escaped text does not pile up backslashes.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ESCAPED_APOSTROPHE: Regex = Regex::new(r"\\'").unwrap();
    static ref ESCAPED_QUOTE: Regex = Regex::new(r#"\\""#).unwrap();
}

/// Android resource escaping: every `'` becomes `\'`.
pub fn escape_apostrophes(text: &str) -> String {
    unescape_apostrophes(text).replace('\'', r"\'")
}

/// Reverses [`escape_apostrophes`].
pub fn unescape_apostrophes(text: &str) -> String {
    ESCAPED_APOSTROPHE.replace_all(text, "'").into_owned()
}

/// Apple `.strings` escaping: every `"` becomes `\"`. A trailing odd run of
/// backslashes gets one more so it cannot escape the closing quote.
pub fn escape_quotes(text: &str) -> String {
    let mut escaped = ESCAPED_QUOTE
        .replace_all(text, "\"")
        .replace('"', r#"\""#);
    let trailing = escaped.len() - escaped.trim_end_matches('\\').len();
    if trailing % 2 == 1 {
        escaped.push('\\');
    }
    escaped
}
