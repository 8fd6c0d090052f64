//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret for `Debug` output.
///
/// - Empty input renders as `EMPTY`.
/// - Input shorter than 12 characters renders as `***`.
/// - Longer input keeps its first and last three characters, so two redacted
///   access keys can still be told apart in logs.
///
/// Counting is done per `char`, so multi-byte input never splits a code point.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let chars: Vec<char> = self.0.chars().collect();
        match chars.len() {
            0 => f.write_str("EMPTY"),
            n if n < 12 => f.write_str("***"),
            n => {
                let head: String = chars[..3].iter().collect();
                let tail: String = chars[n - 3..].iter().collect();
                write!(f, "{head}***{tail}")
            }
        }
    }
}
