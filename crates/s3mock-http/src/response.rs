//! S3 Output struct to HTTP response serialization.
//!
//! Response shapes:
//! - **Header-only**: `PutObject`, `HeadObject`, `CreateBucket`, `DeleteObject` (204)
//! - **XML body**: `ListBuckets` and the `LegalHold`, `Retention`,
//!   `ObjectLockConfiguration` and `Tagging` getters
//! - **Raw body**: `GetObject`
//! - **Empty 200**: the object lock setters

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::HeaderValue;
use s3mock_model::error::S3Error;
use s3mock_model::output::{
    CreateBucketOutput, DeleteObjectOutput, DeleteObjectTaggingOutput, GetObjectLegalHoldOutput,
    GetObjectLockConfigurationOutput, GetObjectOutput, GetObjectRetentionOutput,
    GetObjectTaggingOutput, HeadBucketOutput, HeadObjectOutput, ListBucketsOutput,
    PutObjectLegalHoldOutput, PutObjectLockConfigurationOutput, PutObjectOutput,
    PutObjectRetentionOutput, PutObjectTaggingOutput,
};
use s3mock_xml::{S3Serialize, to_xml};

use crate::body::S3ResponseBody;

/// Format of `Last-Modified` and other HTTP date headers.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Trait for converting an S3 output struct into an HTTP response.
pub trait IntoS3Response {
    /// Convert this output into an HTTP response.
    ///
    /// # Errors
    ///
    /// Returns an `S3Error` if the response cannot be constructed (e.g., the
    /// XML body fails to serialize).
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error>;
}

// ---------------------------------------------------------------------------
// Helper functions for building responses
// ---------------------------------------------------------------------------

fn set_optional_header(
    builder: http::response::Builder,
    name: &str,
    value: Option<&str>,
) -> http::response::Builder {
    match value.and_then(|v| HeaderValue::from_str(v).ok()) {
        Some(hv) => builder.header(name, hv),
        None => builder,
    }
}

fn set_optional_bool_header(
    builder: http::response::Builder,
    name: &str,
    value: Option<bool>,
) -> http::response::Builder {
    match value {
        Some(v) => builder.header(name, if v { "true" } else { "false" }),
        None => builder,
    }
}

fn set_optional_display_header<T: std::fmt::Display>(
    builder: http::response::Builder,
    name: &str,
    value: Option<T>,
) -> http::response::Builder {
    set_optional_header(builder, name, value.map(|v| v.to_string()).as_deref())
}

fn set_optional_timestamp_header(
    builder: http::response::Builder,
    name: &str,
    value: Option<&DateTime<Utc>>,
    format: &str,
) -> http::response::Builder {
    set_optional_header(
        builder,
        name,
        value.map(|v| v.format(format).to_string()).as_deref(),
    )
}

fn set_metadata_headers(
    mut builder: http::response::Builder,
    metadata: &HashMap<String, String>,
) -> http::response::Builder {
    for (key, value) in metadata {
        if let Ok(hv) = HeaderValue::from_str(value) {
            builder = builder.header(format!("x-amz-meta-{key}"), hv);
        }
    }
    builder
}

/// Build a response from a builder, converting build errors to `S3Error`.
fn build_response(
    builder: http::response::Builder,
    body: S3ResponseBody,
) -> Result<http::Response<S3ResponseBody>, S3Error> {
    builder
        .body(body)
        .map_err(|e| S3Error::internal_error(format!("failed to build HTTP response: {e}")))
}

/// Serialize `value` under `root` and wrap it in a 200 `application/xml` response.
fn xml_response<T: S3Serialize>(
    builder: http::response::Builder,
    root: &str,
    value: &T,
) -> Result<http::Response<S3ResponseBody>, S3Error> {
    let xml = to_xml(root, value)
        .map_err(|e| S3Error::internal_error(format!("failed to serialize {root}: {e}")))?;
    build_response(
        builder
            .status(http::StatusCode::OK)
            .header(http::header::CONTENT_TYPE, "application/xml"),
        S3ResponseBody::from_xml(xml),
    )
}

fn empty_200_response() -> Result<http::Response<S3ResponseBody>, S3Error> {
    build_response(
        http::Response::builder().status(http::StatusCode::OK),
        S3ResponseBody::empty(),
    )
}

// ---------------------------------------------------------------------------
// Bucket operations
// ---------------------------------------------------------------------------

impl IntoS3Response for CreateBucketOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = http::Response::builder().status(http::StatusCode::OK);
        let builder = set_optional_header(builder, "Location", self.location.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for HeadBucketOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = http::Response::builder().status(http::StatusCode::OK);
        let builder = set_optional_header(
            builder,
            "x-amz-bucket-region",
            self.bucket_region.as_deref(),
        );
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for ListBucketsOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response(http::Response::builder(), "ListAllMyBucketsResult", &self)
    }
}

impl IntoS3Response for GetObjectLockConfigurationOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response(http::Response::builder(), "ObjectLockConfiguration", &self)
    }
}

// ---------------------------------------------------------------------------
// Object operations
// ---------------------------------------------------------------------------

/// Headers shared by `GetObject` and `HeadObject`.
fn set_object_headers(
    builder: http::response::Builder,
    head: &HeadObjectOutput,
) -> http::response::Builder {
    let mut builder = builder;
    builder = set_optional_display_header(builder, "Content-Length", head.content_length);
    builder = set_optional_header(builder, "Content-Type", head.content_type.as_deref());
    builder = set_optional_header(builder, "ETag", head.e_tag.as_deref());
    builder = set_optional_timestamp_header(
        builder,
        "Last-Modified",
        head.last_modified.as_ref(),
        HTTP_DATE_FORMAT,
    );
    builder = set_metadata_headers(builder, &head.metadata);
    builder = set_optional_display_header(
        builder,
        "x-amz-object-lock-legal-hold",
        head.object_lock_legal_hold_status,
    );
    builder = set_optional_display_header(builder, "x-amz-object-lock-mode", head.object_lock_mode);
    builder = set_optional_timestamp_header(
        builder,
        "x-amz-object-lock-retain-until-date",
        head.object_lock_retain_until_date.as_ref(),
        "%Y-%m-%dT%H:%M:%S%.3fZ",
    );
    builder = set_optional_display_header(builder, "x-amz-tagging-count", head.tag_count);
    set_optional_header(builder, "x-amz-version-id", head.version_id.as_deref())
}

impl IntoS3Response for GetObjectOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = http::Response::builder()
            .status(http::StatusCode::OK)
            .header(http::header::ACCEPT_RANGES, "bytes");
        let builder = set_object_headers(builder, &self.head);
        let body = match self.body {
            Some(blob) => S3ResponseBody::from_bytes(blob.data),
            None => S3ResponseBody::empty(),
        };
        build_response(builder, body)
    }
}

impl IntoS3Response for HeadObjectOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = http::Response::builder()
            .status(http::StatusCode::OK)
            .header(http::header::ACCEPT_RANGES, "bytes");
        let builder = set_object_headers(builder, &self);
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for PutObjectOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = http::Response::builder().status(http::StatusCode::OK);
        let builder = set_optional_header(builder, "ETag", self.e_tag.as_deref());
        let builder = set_optional_header(builder, "x-amz-version-id", self.version_id.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for DeleteObjectOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = http::Response::builder().status(http::StatusCode::NO_CONTENT);
        let builder = set_optional_bool_header(builder, "x-amz-delete-marker", self.delete_marker);
        let builder = set_optional_header(builder, "x-amz-version-id", self.version_id.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

// ---------------------------------------------------------------------------
// Tagging and object lock sub-resources
// ---------------------------------------------------------------------------

impl IntoS3Response for GetObjectTaggingOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = set_optional_header(
            http::Response::builder(),
            "x-amz-version-id",
            self.version_id.as_deref(),
        );
        xml_response(builder, "Tagging", &self)
    }
}

impl IntoS3Response for PutObjectTaggingOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = http::Response::builder().status(http::StatusCode::OK);
        let builder = set_optional_header(builder, "x-amz-version-id", self.version_id.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for DeleteObjectTaggingOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        let builder = http::Response::builder().status(http::StatusCode::NO_CONTENT);
        let builder = set_optional_header(builder, "x-amz-version-id", self.version_id.as_deref());
        build_response(builder, S3ResponseBody::empty())
    }
}

impl IntoS3Response for GetObjectLegalHoldOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response(http::Response::builder(), "LegalHold", &self)
    }
}

impl IntoS3Response for GetObjectRetentionOutput {
    fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
        xml_response(http::Response::builder(), "Retention", &self)
    }
}

/// Implement `IntoS3Response` that returns 200 OK with no body.
macro_rules! impl_empty_200_response {
    ($ty:ty) => {
        impl IntoS3Response for $ty {
            fn into_s3_response(self) -> Result<http::Response<S3ResponseBody>, S3Error> {
                empty_200_response()
            }
        }
    };
}

impl_empty_200_response!(PutObjectLegalHoldOutput);
impl_empty_200_response!(PutObjectLockConfigurationOutput);
impl_empty_200_response!(PutObjectRetentionOutput);

/// Render an [`S3Error`] as the XML `<Error>` document S3 clients expect.
///
/// The status code is the error's own, so a bucket-level and an object-level
/// "no lock configuration" error both surface as 404 but with different
/// codes and messages.
#[must_use]
pub fn error_to_response(err: &S3Error, request_id: &str) -> http::Response<S3ResponseBody> {
    let xml_bytes = s3mock_xml::error_to_xml(
        err.code.as_str(),
        &err.message,
        err.resource.as_deref(),
        request_id,
    );

    http::Response::builder()
        .status(err.status_code)
        .header(http::header::CONTENT_TYPE, "application/xml")
        .body(S3ResponseBody::from_bytes(Bytes::from(xml_bytes)))
        .unwrap_or_else(|_| {
            http::Response::builder()
                .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(S3ResponseBody::empty())
                .expect("static response should be valid")
        })
}
