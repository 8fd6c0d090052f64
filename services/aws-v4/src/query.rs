//! Query string builders.
//!
//! A presigned url needs the same parameters rendered twice:
//!
//! - [`canonical_query_string`] escapes everything, `/` included. It is only
//!   ever fed into the canonical request.
//! - [`final_query_string`] is what ends up in the url. It leaves the `/`
//!   separators of `X-Amz-Credential` literal so the url survives HTTP
//!   clients that re-encode it once more before sending. The store rebuilds
//!   the canonical form on its side, so both spellings verify.

use crate::constants::X_AMZ_CREDENTIAL;
use crate::uri::uri_encode;

/// QueryParameters holds the `X-Amz-*` parameters of a presigned url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    params: Vec<(String, String)>,
}

impl QueryParameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a parameter. Keys are expected to be unique.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Get the raw value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate raw `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if no parameter has been pushed.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn sorted(&self) -> Vec<(&str, &str)> {
        let mut params: Vec<_> = self.iter().collect();
        params.sort_unstable();
        params
    }
}

/// Render the canonical query string: every key and value fully escaped,
/// sorted by key, joined with `&`.
pub fn canonical_query_string(params: &QueryParameters) -> String {
    params
        .sorted()
        .into_iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k, true), uri_encode(v, true)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Render the query string emitted in the url.
///
/// Identical to [`canonical_query_string`] except the value of
/// `X-Amz-Credential`, whose `/` stay literal.
pub fn final_query_string(params: &QueryParameters) -> String {
    params
        .sorted()
        .into_iter()
        .map(|(k, v)| {
            let value = if k == X_AMZ_CREDENTIAL {
                uri_encode(v, false)
            } else {
                uri_encode(v, true)
            };
            format!("{}={}", uri_encode(k, true), value)
        })
        .collect::<Vec<_>>()
        .join("&")
}
