// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Canonical request construction.
//!
//! ```text
//! METHOD
//! CANONICAL_URI
//! CANONICAL_QUERY
//! name:value        (one line per signed header, sorted)
//!
//! SIGNED_HEADERS
//! PAYLOAD_HASH
//! ```

use std::collections::BTreeMap;

use http::header::HOST;
use log::warn;

use crate::constants::X_AMZ_META_PREFIX;

/// Normalize a header value: trim both ends and collapse every internal
/// whitespace run into a single space.
///
/// The uploader must send metadata values normalized the same way, otherwise
/// the store computes a different signature.
pub fn normalize_header_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the header name for a metadata key: `x-amz-meta-` followed by the
/// lowercased key with `_` replaced by `-`.
pub fn metadata_header_name(key: &str) -> String {
    let mut name = String::with_capacity(X_AMZ_META_PREFIX.len() + key.len());
    name.push_str(X_AMZ_META_PREFIX);
    name.push_str(&key.replace('_', "-").to_lowercase());
    name
}

/// CanonicalHeaders is the set of headers bound into the signature.
///
/// It always holds `host` and one `x-amz-meta-*` entry per metadata key.
/// Names are kept in byte-wise lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHeaders {
    headers: BTreeMap<String, String>,
}

impl CanonicalHeaders {
    /// Build canonical headers from the request host and user metadata.
    ///
    /// Metadata keys are visited in sorted order. If two keys map onto the
    /// same header name (`user_id` and `user-id`), the one sorting last wins.
    pub fn new<K, V>(host: &str, metadata: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let metadata: BTreeMap<String, String> = metadata
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();

        let mut headers = BTreeMap::new();
        headers.insert(HOST.as_str().to_string(), host.trim().to_string());

        for (key, value) in metadata {
            let name = metadata_header_name(&key);
            if headers
                .insert(name.clone(), normalize_header_value(&value))
                .is_some()
            {
                warn!("metadata key {key} overrides an earlier key mapped to header {name}");
            }
        }

        Self { headers }
    }

    /// Header names joined by `;`, in sorted order.
    pub fn signed_headers(&self) -> String {
        self.headers
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Get the normalized value of a header.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Iterate `(name, value)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate the `x-amz-meta-*` headers only.
    ///
    /// These are the headers the uploader has to send along with the PUT;
    /// `host` is set by the HTTP client from the url.
    pub fn metadata_headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter(|(name, _)| name.starts_with(X_AMZ_META_PREFIX))
    }

    /// Number of signed headers, `host` included.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Always false: `host` is present in every instance.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Build the canonical request string.
///
/// Header values are trimmed once more when rendered, so callers passing a
/// hand-built [`CanonicalHeaders`] get the same output as the signer.
pub fn canonical_request(
    method: &str,
    uri: &str,
    query: &str,
    headers: &CanonicalHeaders,
    signed_headers: &str,
    payload_hash: &str,
) -> String {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    f.push_str(method);
    f.push('\n');
    f.push_str(uri);
    f.push('\n');
    f.push_str(query);
    f.push('\n');
    for (name, value) in headers.iter() {
        f.push_str(name);
        f.push(':');
        f.push_str(value.trim());
        f.push('\n');
    }
    f.push('\n');
    f.push_str(signed_headers);
    f.push('\n');
    f.push_str(payload_hash);

    f
}
