//! HTTP request to S3 Input struct deserialization.
//!
//! [`FromS3Request`] builds the typed inputs from `s3mock-model` out of the
//! request head, the routed bucket/key, the query string and the body:
//!
//! - headers such as `x-amz-object-lock-mode` and `x-amz-bypass-governance-retention`
//! - `versionId` from the query string
//! - bucket and key from the routing context
//! - XML payloads (`LegalHold`, `Retention`, `Tagging`, ...) from the body
//! - `x-amz-meta-*` prefix headers as user metadata

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use s3mock_model::error::{S3Error, S3ErrorCode};
use s3mock_model::input::{
    CreateBucketInput, DeleteBucketInput, DeleteObjectInput, DeleteObjectTaggingInput,
    GetObjectInput, GetObjectLegalHoldInput, GetObjectLockConfigurationInput,
    GetObjectRetentionInput, GetObjectTaggingInput, HeadBucketInput, HeadObjectInput,
    ListBucketsInput, PutObjectInput, PutObjectLegalHoldInput, PutObjectLockConfigurationInput,
    PutObjectRetentionInput, PutObjectTaggingInput,
};
use s3mock_model::request::StreamingBlob;
use s3mock_model::types::{
    CreateBucketConfiguration, ObjectLockConfiguration, ObjectLockLegalHold, ObjectLockRetention,
    Tagging,
};
use s3mock_xml::{S3Deserialize, from_xml};

/// Trait for extracting an S3 input struct from HTTP request components.
pub trait FromS3Request: Sized {
    /// Extract the input from HTTP request parts.
    ///
    /// # Arguments
    /// - `parts` - The HTTP request head (method, URI, headers).
    /// - `bucket` - The resolved bucket name, if any.
    /// - `key` - The resolved object key, if any.
    /// - `query_params` - Parsed query parameters from the URI.
    /// - `body` - The raw request body bytes.
    ///
    /// # Errors
    ///
    /// Returns an `S3Error` if required fields are missing or field values
    /// cannot be parsed.
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error>;
}

// ---------------------------------------------------------------------------
// Helper functions for extracting typed values from HTTP request parts
// ---------------------------------------------------------------------------

/// Extract a header value as a string.
pub fn header_str(parts: &http::request::Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Extract a header value and parse it as a boolean.
///
/// Recognizes "true" (case-insensitive) as `true`, everything else as `false`.
pub fn header_bool(parts: &http::request::Parts, name: &str) -> Option<bool> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.eq_ignore_ascii_case("true"))
}

/// Parse a header into a wire enum. An unknown value is an `InvalidArgument`
/// rather than being silently dropped.
pub fn header_enum<T>(parts: &http::request::Parts, name: &str) -> Result<Option<T>, S3Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    header_str(parts, name)
        .map(|value| {
            value
                .parse()
                .map_err(|e: T::Err| S3Error::invalid_argument(format!("{name}: {e}")))
        })
        .transpose()
}

/// Parse a header as a timestamp. Unparseable dates are an `InvalidArgument`.
pub fn header_timestamp(
    parts: &http::request::Parts,
    name: &str,
) -> Result<Option<DateTime<Utc>>, S3Error> {
    header_str(parts, name)
        .map(|value| {
            parse_http_date(&value).ok_or_else(|| {
                S3Error::invalid_argument(format!("{name}: invalid date '{value}'"))
            })
        })
        .transpose()
}

/// Parse an HTTP date string into a `DateTime<Utc>`.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`), RFC 2822 and the IMF-fixdate
/// form (`Mon, 15 Jan 2024 10:30:00 GMT`).
fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S GMT")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Get a query parameter value by name.
#[must_use]
pub fn query_param(params: &[(String, String)], name: &str) -> Option<String> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
}

/// Collect all `x-amz-meta-*` headers into a metadata map keyed by the
/// suffix after `x-amz-meta-`.
pub fn collect_metadata(parts: &http::request::Parts) -> HashMap<String, String> {
    parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            let meta_key = name.as_str().strip_prefix("x-amz-meta-")?;
            let meta_value = value.to_str().ok()?;
            Some((meta_key.to_owned(), meta_value.to_owned()))
        })
        .collect()
}

fn require_bucket(bucket: Option<&str>) -> Result<String, S3Error> {
    bucket.map(ToOwned::to_owned).ok_or_else(|| {
        S3Error::with_message(S3ErrorCode::InvalidRequest, "Bucket name is required")
    })
}

fn require_key(key: Option<&str>) -> Result<String, S3Error> {
    key.map(ToOwned::to_owned).ok_or_else(|| {
        S3Error::with_message(S3ErrorCode::InvalidRequest, "Object key is required")
    })
}

/// Parse an XML body into a typed value, returning `MalformedXML` on failure.
fn parse_xml_body<T: S3Deserialize>(body: &Bytes) -> Result<T, S3Error> {
    from_xml(body).map_err(|e| S3Error::malformed_xml(format!("Failed to parse XML body: {e}")))
}

/// Like [`parse_xml_body`], but an empty body yields `None`.
fn parse_optional_xml_body<T: S3Deserialize>(body: &Bytes) -> Result<Option<T>, S3Error> {
    if body.is_empty() {
        Ok(None)
    } else {
        parse_xml_body(body).map(Some)
    }
}

/// Implement `FromS3Request` for inputs made of `bucket` only.
macro_rules! impl_bucket_only_input {
    ($ty:ty) => {
        impl FromS3Request for $ty {
            fn from_s3_request(
                _parts: &http::request::Parts,
                bucket: Option<&str>,
                _key: Option<&str>,
                _query_params: &[(String, String)],
                _body: Bytes,
            ) -> Result<Self, S3Error> {
                Ok(Self {
                    bucket: require_bucket(bucket)?,
                })
            }
        }
    };
}

/// Implement `FromS3Request` for inputs made of `bucket`, `key` and the
/// `versionId` query parameter.
macro_rules! impl_bucket_key_version_input {
    ($ty:ty) => {
        impl FromS3Request for $ty {
            fn from_s3_request(
                _parts: &http::request::Parts,
                bucket: Option<&str>,
                key: Option<&str>,
                query_params: &[(String, String)],
                _body: Bytes,
            ) -> Result<Self, S3Error> {
                Ok(Self {
                    bucket: require_bucket(bucket)?,
                    key: require_key(key)?,
                    version_id: query_param(query_params, "versionId"),
                })
            }
        }
    };
}

impl_bucket_only_input!(DeleteBucketInput);
impl_bucket_only_input!(HeadBucketInput);
impl_bucket_only_input!(GetObjectLockConfigurationInput);

impl_bucket_key_version_input!(GetObjectInput);
impl_bucket_key_version_input!(HeadObjectInput);
impl_bucket_key_version_input!(GetObjectLegalHoldInput);
impl_bucket_key_version_input!(GetObjectRetentionInput);
impl_bucket_key_version_input!(GetObjectTaggingInput);
impl_bucket_key_version_input!(DeleteObjectTaggingInput);

impl FromS3Request for ListBucketsInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        _bucket: Option<&str>,
        _key: Option<&str>,
        query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            prefix: query_param(query_params, "prefix"),
        })
    }
}

impl FromS3Request for CreateBucketInput {
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        _key: Option<&str>,
        _query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        let configuration = parse_optional_xml_body::<CreateBucketConfiguration>(&body)?;
        Ok(Self {
            bucket: require_bucket(bucket)?,
            location_constraint: configuration.and_then(|c| c.location_constraint),
            object_lock_enabled_for_bucket: header_bool(parts, "x-amz-bucket-object-lock-enabled"),
        })
    }
}

impl FromS3Request for PutObjectLockConfigurationInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        _key: Option<&str>,
        _query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            object_lock_configuration: parse_optional_xml_body::<ObjectLockConfiguration>(&body)?,
        })
    }
}

impl FromS3Request for PutObjectInput {
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        _query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            body: (!body.is_empty()).then(|| StreamingBlob::new(body)),
            bucket: require_bucket(bucket)?,
            content_type: header_str(parts, "Content-Type"),
            key: require_key(key)?,
            metadata: collect_metadata(parts),
            object_lock_legal_hold_status: header_enum(parts, "x-amz-object-lock-legal-hold")?,
            object_lock_mode: header_enum(parts, "x-amz-object-lock-mode")?,
            object_lock_retain_until_date: header_timestamp(
                parts,
                "x-amz-object-lock-retain-until-date",
            )?,
            tagging: header_str(parts, "x-amz-tagging"),
        })
    }
}

impl FromS3Request for DeleteObjectInput {
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        _body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            bypass_governance_retention: header_bool(parts, "x-amz-bypass-governance-retention"),
            key: require_key(key)?,
            version_id: query_param(query_params, "versionId"),
        })
    }
}

impl FromS3Request for PutObjectTaggingInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            tagging: parse_xml_body::<Tagging>(&body)?,
            version_id: query_param(query_params, "versionId"),
        })
    }
}

impl FromS3Request for PutObjectLegalHoldInput {
    fn from_s3_request(
        _parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            key: require_key(key)?,
            legal_hold: parse_optional_xml_body::<ObjectLockLegalHold>(&body)?,
            version_id: query_param(query_params, "versionId"),
        })
    }
}

impl FromS3Request for PutObjectRetentionInput {
    fn from_s3_request(
        parts: &http::request::Parts,
        bucket: Option<&str>,
        key: Option<&str>,
        query_params: &[(String, String)],
        body: Bytes,
    ) -> Result<Self, S3Error> {
        Ok(Self {
            bucket: require_bucket(bucket)?,
            bypass_governance_retention: header_bool(parts, "x-amz-bypass-governance-retention"),
            key: require_key(key)?,
            retention: parse_optional_xml_body::<ObjectLockRetention>(&body)?,
            version_id: query_param(query_params, "versionId"),
        })
    }
}
