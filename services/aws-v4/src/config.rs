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

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use log::debug;
use s3presign_core::utils::Redact;
use s3presign_core::{Context, Error, Result, SigningCredential};

use crate::constants::*;
use crate::Credential;

/// Config for the presigned upload signer.
///
/// It is loaded once at startup and never changes afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// `region` will be loaded from:
    ///
    /// - this field
    /// - env value: [`AWS_REGION`]
    /// - default to: `us-east-1`
    pub region: String,
    /// `service` of the credential scope, default to `s3`.
    pub service: String,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `bucket` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`S3_BUCKET_NAME`]
    pub bucket: Option<String>,
    /// `company_prefix` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`COMPANY_PREFIX`]
    ///
    /// When set, every generated object key lives under `{company_prefix}/`.
    pub company_prefix: Option<String>,
    /// `expiration` of generated urls will be loaded from:
    ///
    /// - this field
    /// - env value: [`PRESIGNED_URL_EXPIRATION_MINUTES`], in minutes
    /// - default to 3 minutes
    pub expiration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            access_key_id: None,
            secret_access_key: None,
            bucket: None,
            company_prefix: None,
            expiration: Duration::from_secs(DEFAULT_EXPIRATION_MINUTES * 60),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("service", &self.service)
            .field(
                "access_key_id",
                &Redact::from(self.access_key_id.as_deref().unwrap_or_default()),
            )
            .field(
                "secret_access_key",
                &Redact::from(self.secret_access_key.as_deref().unwrap_or_default()),
            )
            .field("bucket", &self.bucket)
            .field("company_prefix", &self.company_prefix)
            .field("expiration", &self.expiration)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Empty variables are treated as unset. Only a malformed
    /// [`PRESIGNED_URL_EXPIRATION_MINUTES`] fails here; missing required
    /// values are reported by [`Config::validate`].
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        let var = |key: &str| ctx.env_var(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = var(AWS_REGION) {
            self.region = v;
        }
        if let Some(v) = var(AWS_ACCESS_KEY_ID) {
            self.access_key_id = Some(v);
        }
        if let Some(v) = var(AWS_SECRET_ACCESS_KEY) {
            self.secret_access_key = Some(v);
        }
        if let Some(v) = var(S3_BUCKET_NAME) {
            self.bucket = Some(v);
        }
        if let Some(v) = var(COMPANY_PREFIX) {
            self.company_prefix = Some(v);
        }
        if let Some(v) = var(PRESIGNED_URL_EXPIRATION_MINUTES) {
            let minutes: u64 = v.trim().parse().map_err(|e| {
                Error::config_invalid(format!(
                    "invalid {PRESIGNED_URL_EXPIRATION_MINUTES} value: {v}"
                ))
                .with_source(e)
            })?;
            self.expiration = Duration::from_secs(minutes.saturating_mul(60));
        }

        debug!("loaded config from env: {self:?}");
        Ok(self)
    }

    /// Set the region.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    /// Set the access key id and secret access key.
    pub fn with_credential(mut self, access_key_id: &str, secret_access_key: &str) -> Self {
        self.access_key_id = Some(access_key_id.to_string());
        self.secret_access_key = Some(secret_access_key.to_string());
        self
    }

    /// Set the default bucket.
    pub fn with_bucket(mut self, bucket: &str) -> Self {
        self.bucket = Some(bucket.to_string());
        self
    }

    /// Set the company prefix of generated object keys.
    pub fn with_company_prefix(mut self, prefix: &str) -> Self {
        self.company_prefix = Some(prefix.to_string());
        self
    }

    /// Set the default expiration of generated urls.
    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }

    /// Check every required value is present and well-formed.
    pub fn validate(&self) -> Result<()> {
        if self.access_key_id.as_deref().unwrap_or_default().trim().is_empty() {
            return Err(Error::config_invalid(format!(
                "{AWS_ACCESS_KEY_ID} is required"
            )));
        }
        if self
            .secret_access_key
            .as_deref()
            .unwrap_or_default()
            .trim()
            .is_empty()
        {
            return Err(Error::config_invalid(format!(
                "{AWS_SECRET_ACCESS_KEY} is required"
            )));
        }
        if self.bucket.as_deref().unwrap_or_default().trim().is_empty() {
            return Err(Error::config_invalid(format!(
                "{S3_BUCKET_NAME} is required"
            )));
        }
        if self.region.trim().is_empty() {
            return Err(Error::config_invalid(format!("{AWS_REGION} is required")));
        }
        if self.service.trim().is_empty() {
            return Err(Error::config_invalid("service is required"));
        }

        let secs = self.expiration.as_secs();
        if secs == 0 {
            return Err(Error::config_invalid(
                "expiration must be at least one second",
            ));
        }
        if secs > MAX_EXPIRATION_SECS {
            return Err(Error::config_invalid(format!(
                "expiration of {secs}s exceeds the maximum of {MAX_EXPIRATION_SECS}s"
            )));
        }

        Ok(())
    }

    /// Build the credential carried by this config.
    pub fn credential(&self) -> Result<Credential> {
        let cred = Credential::new(
            self.access_key_id.as_deref().unwrap_or_default(),
            self.secret_access_key.as_deref().unwrap_or_default(),
        );
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "access key id and secret access key must not be empty",
            ));
        }

        Ok(cred)
    }
}
