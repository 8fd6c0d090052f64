use http::header::{HeaderName, CONTENT_TYPE};
use http::request::Parts;
use http::{HeaderValue, Method, Request, Uri};
use s3presign_core::time::DateTime;
use s3presign_core::Result;

/// PresignedPut describes the upload a presigned url authorizes.
///
/// The url alone is not enough: the PUT must also carry every signed
/// `x-amz-meta-*` header with exactly the value listed in `headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedPut {
    /// The presigned url.
    pub url: String,
    /// The object key the url uploads to.
    pub object_key: String,
    /// Signed metadata headers, normalized and sorted by name.
    pub headers: Vec<(String, String)>,
    /// Content type of the upload. Never signed, sent as is.
    pub content_type: Option<String>,
    /// The store rejects the url from this instant on.
    pub expires_at: DateTime,
}

impl PresignedPut {
    /// Method of the presigned request, always `PUT`.
    pub fn method(&self) -> Method {
        Method::PUT
    }

    /// Every header the uploader has to set, `content-type` first when present.
    pub fn upload_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(self.headers.len() + 1);
        if let Some(content_type) = &self.content_type {
            headers.push((CONTENT_TYPE.as_str().to_string(), content_type.clone()));
        }
        headers.extend(self.headers.iter().cloned());
        headers
    }

    /// Check if the url is already expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime) -> bool {
        now >= self.expires_at
    }

    /// Build the request parts of the upload, ready to attach a body and send.
    pub fn to_request_parts(&self) -> Result<Parts> {
        let mut req = Request::new(());
        *req.method_mut() = self.method();
        *req.uri_mut() = self.url.parse::<Uri>()?;

        for (name, value) in self.upload_headers() {
            req.headers_mut().insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(&value)?,
            );
        }

        Ok(req.into_parts().0)
    }
}
