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

use std::time::Duration;

use chrono::TimeDelta;
use log::debug;
use s3presign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use s3presign_core::time::{format_date, format_iso8601, now, DateTime};
use s3presign_core::Result;

use crate::canonical::{canonical_request, CanonicalHeaders};
use crate::constants::*;
use crate::query::{canonical_query_string, final_query_string, QueryParameters};
use crate::{Config, Credential, ObjectKeyBuilder, PresignedPut};

/// PresignedPutSigner builds SigV4 presigned urls for single-object PUT uploads.
///
/// - [Authenticating Requests: Using Query Parameters](https://docs.aws.amazon.com/AmazonS3/latest/API/sigv4-query-string-auth.html)
///
/// The signer only holds immutable configuration, so it can be shared across
/// threads and tasks freely. Signing never blocks, never performs I/O and
/// never fails.
#[derive(Debug, Clone)]
pub struct PresignedPutSigner {
    credential: Credential,
    region: String,
    service: String,
    bucket: String,
    expiration: Duration,
    keys: ObjectKeyBuilder,
}

impl PresignedPutSigner {
    /// Create a new signer from validated configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let credential = config.credential()?;

        Ok(Self {
            credential,
            region: config.region,
            service: config.service,
            bucket: config.bucket.unwrap_or_default(),
            expiration: config.expiration,
            keys: ObjectKeyBuilder::new(config.company_prefix),
        })
    }

    /// The region urls are scoped to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The configured bucket used by [`PresignedPutSigner::presign_upload`].
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The configured default expiration.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Sign a PUT of `object_key` into `bucket`, valid for `expiration`.
    ///
    /// The current time is sampled exactly once. Use [`PresignedPutSigner::sign_at`]
    /// to sign at a fixed instant.
    pub fn sign<K, V>(
        &self,
        bucket: &str,
        object_key: &str,
        metadata: impl IntoIterator<Item = (K, V)>,
        expiration: Duration,
    ) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.sign_at(bucket, object_key, metadata, expiration, now())
    }

    /// Sign a PUT at the given instant.
    ///
    /// This is a pure function of the configuration and its arguments: the
    /// same inputs always yield the same url.
    pub fn sign_at<K, V>(
        &self,
        bucket: &str,
        object_key: &str,
        metadata: impl IntoIterator<Item = (K, V)>,
        expiration: Duration,
        now: DateTime,
    ) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let host = self.host(bucket);
        let headers = CanonicalHeaders::new(&host, metadata);
        self.sign_with_headers(&host, object_key, &headers, expiration, now)
    }

    /// Sign a PUT and describe the request the uploader has to send.
    ///
    /// `content_type` is carried along but never signed.
    pub fn presign_put<K, V>(
        &self,
        bucket: &str,
        object_key: &str,
        content_type: Option<&str>,
        metadata: impl IntoIterator<Item = (K, V)>,
        expiration: Duration,
    ) -> PresignedPut
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.presign_put_at(bucket, object_key, content_type, metadata, expiration, now())
    }

    /// Presign an upload of `filename` into the configured bucket.
    ///
    /// The object key is `[{company_prefix}/]inputs/{date}/{time}/{filename}`
    /// and the url is valid for the configured expiration. The key timestamp
    /// and the signing timestamp come from the same instant.
    pub fn presign_upload<K, V>(
        &self,
        filename: &str,
        content_type: Option<&str>,
        metadata: impl IntoIterator<Item = (K, V)>,
    ) -> PresignedPut
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.presign_upload_at(filename, content_type, metadata, now())
    }

    /// Same as [`PresignedPutSigner::presign_upload`] at a fixed instant.
    pub fn presign_upload_at<K, V>(
        &self,
        filename: &str,
        content_type: Option<&str>,
        metadata: impl IntoIterator<Item = (K, V)>,
        now: DateTime,
    ) -> PresignedPut
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let object_key = self.keys.timestamped(filename, now);
        debug!("generated object key: {object_key}");

        self.presign_put_at(
            &self.bucket,
            &object_key,
            content_type,
            metadata,
            self.expiration,
            now,
        )
    }

    /// Same as [`PresignedPutSigner::presign_put`] at a fixed instant.
    pub fn presign_put_at<K, V>(
        &self,
        bucket: &str,
        object_key: &str,
        content_type: Option<&str>,
        metadata: impl IntoIterator<Item = (K, V)>,
        expiration: Duration,
        now: DateTime,
    ) -> PresignedPut
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let host = self.host(bucket);
        let headers = CanonicalHeaders::new(&host, metadata);
        let url = self.sign_with_headers(&host, object_key, &headers, expiration, now);

        PresignedPut {
            url,
            object_key: object_key.to_string(),
            headers: headers
                .metadata_headers()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            content_type: content_type.map(str::to_string),
            expires_at: i64::try_from(expiration.as_secs())
                .ok()
                .and_then(TimeDelta::try_seconds)
                .and_then(|d| now.checked_add_signed(d))
                .unwrap_or(DateTime::MAX_UTC),
        }
    }

    fn host(&self, bucket: &str) -> String {
        format!("{bucket}.s3.{}.amazonaws.com", self.region)
    }

    /// `host` must be the same value `headers` was built with.
    fn sign_with_headers(
        &self,
        host: &str,
        object_key: &str,
        headers: &CanonicalHeaders,
        expiration: Duration,
        now: DateTime,
    ) -> String {
        let canonical_uri = format!("/{object_key}");
        let date_stamp = format_date(now);
        let amz_date = format_iso8601(now);

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = credential_scope(&date_stamp, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        let signed_headers = headers.signed_headers();

        let mut params = QueryParameters::new();
        params.push(X_AMZ_ALGORITHM, AWS4_HMAC_SHA256);
        params.push(
            X_AMZ_CREDENTIAL,
            format!("{}/{scope}", self.credential.access_key_id),
        );
        params.push(X_AMZ_DATE, amz_date.as_str());
        params.push(X_AMZ_EXPIRES, expiration.as_secs().to_string());
        params.push(X_AMZ_SIGNED_HEADERS, signed_headers.as_str());

        let creq = canonical_request(
            "PUT",
            &canonical_uri,
            &canonical_query_string(&params),
            headers,
            &signed_headers,
            UNSIGNED_PAYLOAD,
        );
        debug!("calculated canonical request: {creq}");

        let string_to_sign = string_to_sign(&amz_date, &scope, &creq);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &self.credential.secret_access_key,
            &date_stamp,
            &self.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        params.push(X_AMZ_SIGNATURE, signature);

        format!(
            "https://{host}{canonical_uri}?{}",
            final_query_string(&params)
        )
    }
}

/// Build the credential scope: `{date_stamp}/{region}/{service}/aws4_request`.
pub fn credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{date_stamp}/{region}/{service}/{AWS4_REQUEST}")
}

/// Build the string to sign.
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(amz_date: &str, scope: &str, canonical_request: &str) -> String {
    format!(
        "{AWS4_HMAC_SHA256}\n{amz_date}\n{scope}\n{}",
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Derive the signing key of a scope. The result is raw bytes, used as the
/// HMAC key of the final signature.
pub fn generate_signing_key(
    secret: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}
