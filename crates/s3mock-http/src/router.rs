//! Request routing: bucket/key resolution and operation identification.
//!
//! The bucket comes from the `Host` header (virtual-hosted style,
//! `bucket.s3.localhost`) or from the first path segment (path style). The
//! operation is picked from the method, whether a key is present, and the
//! sub-resource query parameter (`?legal-hold`, `?retention`, `?tagging`,
//! `?object-lock`).
//!
//! Sub-resources that S3 defines but s3mock does not serve are answered with
//! `NotImplemented` rather than silently falling through to the plain
//! object or bucket operation.

use http::Method;
use percent_encoding::percent_decode_str;
use s3mock_model::error::{S3Error, S3ErrorCode};
use s3mock_model::operations::S3Operation;

/// Sub-resource query keys recognized by S3. The served ones are handled in
/// the `identify_*` functions; the rest map to `NotImplemented`.
const SUB_RESOURCES: &[&str] = &[
    "legal-hold",
    "retention",
    "object-lock",
    "tagging",
    "acl",
    "attributes",
    "uploads",
    "uploadId",
    "versioning",
    "versions",
    "encryption",
    "cors",
    "lifecycle",
    "policy",
    "policyStatus",
    "notification",
    "logging",
    "publicAccessBlock",
    "ownershipControls",
    "accelerate",
    "requestPayment",
    "website",
    "location",
    "delete",
    "list-type",
];

/// Router configuration.
#[derive(Debug, Clone)]
pub struct S3Router {
    /// The base domain for virtual-hosted-style requests (e.g., `s3.localhost`).
    pub domain: String,
    /// Whether to enable virtual-hosted-style bucket addressing.
    pub virtual_hosting: bool,
}

/// The result of routing an HTTP request to an S3 operation.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    /// The resolved bucket name, if any.
    pub bucket: Option<String>,
    /// The resolved object key, if any.
    pub key: Option<String>,
    /// The identified S3 operation.
    pub operation: S3Operation,
    /// Parsed query parameters from the request URI.
    pub query_params: Vec<(String, String)>,
}

impl S3Router {
    /// Create a new router with the given domain and virtual hosting setting.
    #[must_use]
    pub fn new(domain: impl Into<String>, virtual_hosting: bool) -> Self {
        Self {
            domain: domain.into(),
            virtual_hosting,
        }
    }

    /// Resolve an HTTP request to a routing context.
    ///
    /// # Errors
    ///
    /// Returns `MethodNotAllowed` for unsupported methods, `NotImplemented`
    /// for S3 operations s3mock does not serve, and `InvalidRequest` when a
    /// key is addressed without a bucket.
    pub fn resolve<B>(&self, req: &http::Request<B>) -> Result<RoutingContext, S3Error> {
        let uri = req.uri();
        let query_params = parse_query_params(uri.query().unwrap_or(""));
        let path = uri.path();

        let virtual_bucket = if self.virtual_hosting {
            extract_virtual_host_bucket(req.headers(), &self.domain)
        } else {
            None
        };

        let (bucket, key) = match virtual_bucket {
            // The whole path is the key.
            Some(vhost_bucket) => {
                let raw_key = path.strip_prefix('/').unwrap_or(path);
                let key = (!raw_key.is_empty()).then(|| decode_uri_component(raw_key));
                (Some(vhost_bucket), key)
            }
            None => parse_path(path),
        };

        let operation = identify_operation(
            req.method(),
            bucket.is_some(),
            key.is_some(),
            &query_params,
            req.headers(),
        )?;

        Ok(RoutingContext {
            bucket,
            key,
            operation,
            query_params,
        })
    }
}

/// `mybucket.s3.localhost:4566` with domain `s3.localhost` yields `mybucket`.
fn extract_virtual_host_bucket(headers: &http::HeaderMap, domain: &str) -> Option<String> {
    let host = headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())?;
    let host = host.split(':').next().unwrap_or(host);

    host.strip_suffix(domain)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .filter(|bucket| !bucket.is_empty())
        .map(str::to_owned)
}

/// Split `/{bucket}/{key...}` into its parts.
fn parse_path(path: &str) -> (Option<String>, Option<String>) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return (None, None);
    }

    match trimmed.split_once('/') {
        Some((bucket, "")) => (Some(decode_uri_component(bucket)), None),
        Some((bucket, key)) => (
            Some(decode_uri_component(bucket)),
            Some(decode_uri_component(key)),
        ),
        None => (Some(decode_uri_component(trimmed)), None),
    }
}

fn decode_uri_component(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

fn parse_query_params(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode_uri_component(k), decode_uri_component(v)),
            None => (decode_uri_component(pair), String::new()),
        })
        .collect()
}

/// The first S3 sub-resource named in the query string, if any.
fn sub_resource(params: &[(String, String)]) -> Option<&'static str> {
    SUB_RESOURCES
        .iter()
        .copied()
        .find(|name| params.iter().any(|(k, _)| k == name))
}

fn identify_operation(
    method: &Method,
    has_bucket: bool,
    has_key: bool,
    params: &[(String, String)],
    headers: &http::HeaderMap,
) -> Result<S3Operation, S3Error> {
    match (has_bucket, has_key) {
        (false, false) if *method == Method::GET => Ok(S3Operation::ListBuckets),
        (false, false) => Err(S3Error::with_message(
            S3ErrorCode::MethodNotAllowed,
            "Only GET is allowed at the service level",
        )),
        (false, true) => Err(S3Error::invalid_request(
            "Object key specified without bucket",
        )),
        (true, false) => identify_bucket_operation(method, sub_resource(params)),
        (true, true) => identify_object_operation(method, sub_resource(params), headers),
    }
}

fn identify_bucket_operation(
    method: &Method,
    sub: Option<&'static str>,
) -> Result<S3Operation, S3Error> {
    match (method.clone(), sub) {
        (Method::GET, Some("object-lock")) => Ok(S3Operation::GetObjectLockConfiguration),
        (Method::PUT, Some("object-lock")) => Ok(S3Operation::PutObjectLockConfiguration),
        (Method::PUT, None) => Ok(S3Operation::CreateBucket),
        (Method::DELETE, None) => Ok(S3Operation::DeleteBucket),
        (Method::HEAD, _) => Ok(S3Operation::HeadBucket),
        (Method::GET, None) => Err(S3Error::not_implemented("ListObjects")),
        (Method::GET | Method::PUT | Method::DELETE | Method::POST, Some(sub)) => {
            Err(S3Error::not_implemented(format!("?{sub}")))
        }
        (Method::POST, None) => Err(S3Error::not_implemented("PostObject")),
        (method, _) => Err(S3Error::method_not_allowed(method.as_str())),
    }
}

fn identify_object_operation(
    method: &Method,
    sub: Option<&'static str>,
    headers: &http::HeaderMap,
) -> Result<S3Operation, S3Error> {
    match (method.clone(), sub) {
        (Method::GET, Some("legal-hold")) => Ok(S3Operation::GetObjectLegalHold),
        (Method::PUT, Some("legal-hold")) => Ok(S3Operation::PutObjectLegalHold),
        (Method::GET, Some("retention")) => Ok(S3Operation::GetObjectRetention),
        (Method::PUT, Some("retention")) => Ok(S3Operation::PutObjectRetention),
        (Method::GET, Some("tagging")) => Ok(S3Operation::GetObjectTagging),
        (Method::PUT, Some("tagging")) => Ok(S3Operation::PutObjectTagging),
        (Method::DELETE, Some("tagging")) => Ok(S3Operation::DeleteObjectTagging),
        (Method::GET, None) => Ok(S3Operation::GetObject),
        (Method::HEAD, None) => Ok(S3Operation::HeadObject),
        (Method::DELETE, None) => Ok(S3Operation::DeleteObject),
        (Method::PUT, None) if headers.contains_key("x-amz-copy-source") => {
            Err(S3Error::not_implemented("CopyObject"))
        }
        (Method::PUT, None) => Ok(S3Operation::PutObject),
        (Method::GET | Method::PUT | Method::DELETE | Method::POST | Method::HEAD, Some(sub)) => {
            Err(S3Error::not_implemented(format!("?{sub}")))
        }
        (method, _) => Err(S3Error::method_not_allowed(method.as_str())),
    }
}
