//! Time related utils.
//!
//! SigV4 carries the signing instant twice: as the `YYYYMMDD` date stamp in
//! the credential scope and as the `YYYYMMDDTHHMMSSZ` timestamp in
//! `X-Amz-Date`. Both must be rendered from the same [`DateTime`].

use crate::Error;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime is the UTC instant used across s3presign.
pub type DateTime = chrono::DateTime<Utc>;

const DATE: &str = "%Y%m%d";
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Sample the current UTC instant.
#[inline]
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date stamp: `20220313`
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format time into ISO 8601 basic format: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse an ISO 8601 basic format timestamp like `20220313T072004Z`.
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, ISO8601).map_err(|e| {
        Error::unexpected(format!("invalid iso8601 timestamp: {s}")).with_source(e)
    })?;

    Ok(t.and_utc())
}
