use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET};
use percent_encoding::utf8_percent_encode;

/// Percent-encode `input` the way SigV4 expects.
///
/// Unreserved bytes (`A-Z a-z 0-9 - _ . ~`) pass through and every other
/// byte becomes an uppercase `%XX`. Encoding is per UTF-8 byte, so `é`
/// becomes `%C3%A9`. When `encode_slash` is false, `/` is left literal.
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    let set = if encode_slash {
        &AWS_QUERY_ENCODE_SET
    } else {
        &AWS_URI_ENCODE_SET
    };

    utf8_percent_encode(input, set).to_string()
}
