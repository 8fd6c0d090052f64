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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Signing algorithm name, used both in `X-Amz-Algorithm` and the string to sign.
pub const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";
/// Terminator of every credential scope.
pub const AWS4_REQUEST: &str = "aws4_request";
/// Payload hash of every presigned PUT: the body is unknown at signing time.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

// Query parameters of a presigned url.
pub const X_AMZ_ALGORITHM: &str = "X-Amz-Algorithm";
pub const X_AMZ_CREDENTIAL: &str = "X-Amz-Credential";
pub const X_AMZ_DATE: &str = "X-Amz-Date";
pub const X_AMZ_EXPIRES: &str = "X-Amz-Expires";
pub const X_AMZ_SIGNED_HEADERS: &str = "X-Amz-SignedHeaders";
pub const X_AMZ_SIGNATURE: &str = "X-Amz-Signature";

/// Prefix of user metadata headers.
pub const X_AMZ_META_PREFIX: &str = "x-amz-meta-";

// Env values used to configure the signer.
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";
pub const COMPANY_PREFIX: &str = "COMPANY_PREFIX";
pub const PRESIGNED_URL_EXPIRATION_MINUTES: &str = "PRESIGNED_URL_EXPIRATION_MINUTES";

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_SERVICE: &str = "s3";
pub const DEFAULT_EXPIRATION_MINUTES: u64 = 3;
/// S3 refuses presigned urls valid for longer than seven days.
pub const MAX_EXPIRATION_SECS: u64 = 7 * 24 * 60 * 60;

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - `/` is left as is.
pub static AWS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// Same as [`AWS_URI_ENCODE_SET`] but `/` is encoded too.
pub static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
