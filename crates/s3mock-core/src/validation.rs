//! Request validation: bucket names, object keys and tag sets.
//!
//! Bucket naming follows the
//! [Amazon S3 rules](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html).

use std::collections::HashSet;
use std::net::Ipv4Addr;

use percent_encoding::percent_decode_str;

use crate::error::S3ServiceError;

/// Maximum number of tags on a single object version.
const MAX_TAGS: usize = 10;
/// Maximum tag key length in characters.
const MAX_TAG_KEY_LEN: usize = 128;
/// Maximum tag value length in characters.
const MAX_TAG_VALUE_LEN: usize = 256;
/// Maximum object key length in bytes.
const MAX_KEY_BYTES: usize = 1024;

/// Reserved prefixes and suffixes S3 refuses in bucket names.
const RESERVED_PREFIXES: [&str; 2] = ["xn--", "sthree-"];
const RESERVED_SUFFIXES: [&str; 2] = ["-s3alias", "--ol-s3"];

const BAD_TAGGING_HEADER: &str = "The header 'x-amz-tagging' shall be encoded as UTF-8 then \
                                  URLEncoded URL query parameters without tag name duplicates.";

/// Validate an S3 bucket name.
///
/// A valid name is 3 to 63 characters of lowercase letters, digits, `.`
/// and `-`; starts and ends with a letter or digit; has no `..`; is not an
/// IPv4 address; and avoids the reserved prefixes and suffixes.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidBucketName`] naming the first rule violated.
///
/// # Examples
///
/// ```
/// use s3mock_core::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("locked-bucket").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), S3ServiceError> {
    let invalid = |reason: &str| {
        Err(S3ServiceError::InvalidBucketName {
            name: name.to_owned(),
            reason: reason.to_owned(),
        })
    };
    let alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();

    if !(3..=63).contains(&name.len()) {
        return invalid("Bucket name must be between 3 and 63 characters long");
    }
    if !name.bytes().all(|b| alnum(b) || b == b'-' || b == b'.') {
        return invalid(
            "Bucket name must only contain lowercase letters, numbers, hyphens, and dots",
        );
    }
    let bytes = name.as_bytes();
    if !alnum(bytes[0]) || !alnum(bytes[bytes.len() - 1]) {
        return invalid("Bucket name must start and end with a letter or number");
    }
    if name.contains("..") {
        return invalid("Bucket name must not contain consecutive dots");
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return invalid("Bucket name must not be formatted as an IP address");
    }
    if RESERVED_PREFIXES.iter().any(|p| name.starts_with(p))
        || RESERVED_SUFFIXES.iter().any(|s| name.ends_with(s))
    {
        return invalid("Bucket name uses a reserved prefix or suffix");
    }
    Ok(())
}

/// Validate an object key: non-empty and at most 1024 bytes of UTF-8.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidArgument`] for an empty or oversized key.
pub fn validate_object_key(key: &str) -> Result<(), S3ServiceError> {
    if key.is_empty() || key.len() > MAX_KEY_BYTES {
        return Err(S3ServiceError::InvalidArgument {
            message: format!("Object key must be between 1 and {MAX_KEY_BYTES} bytes long"),
        });
    }
    Ok(())
}

/// Validate a complete tag set.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidTag`] for more than 10 tags, a duplicate
/// key, an empty or over-long key, an over-long value, or a reserved `aws:`
/// key.
pub fn validate_tags(tags: &[(String, String)]) -> Result<(), S3ServiceError> {
    let invalid = |message: String| Err(S3ServiceError::InvalidTag { message });

    if tags.len() > MAX_TAGS {
        return invalid(format!("Object tags cannot be greater than {MAX_TAGS}"));
    }

    let mut seen = HashSet::with_capacity(tags.len());
    for (key, value) in tags {
        if key.is_empty() || key.chars().count() > MAX_TAG_KEY_LEN {
            return invalid(format!("The TagKey you have provided is invalid: {key}"));
        }
        if key.starts_with("aws:") {
            return invalid("Your TagKey cannot be prefixed with aws:".to_owned());
        }
        if value.chars().count() > MAX_TAG_VALUE_LEN {
            return invalid(format!("The TagValue you have provided is invalid: {value}"));
        }
        if !seen.insert(key.as_str()) {
            return invalid("Cannot provide multiple Tags with the same key".to_owned());
        }
    }
    Ok(())
}

/// Parse the URL-encoded `x-amz-tagging` header (`k1=v1&k2=v2`) into a
/// validated tag list.
///
/// # Errors
///
/// Returns [`S3ServiceError::InvalidArgument`] for undecodable input, or the
/// errors of [`validate_tags`].
pub fn parse_tagging_header(header: &str) -> Result<Vec<(String, String)>, S3ServiceError> {
    let decode = |raw: &str| {
        percent_decode_str(&raw.replace('+', " "))
            .decode_utf8()
            .map(|s| s.into_owned())
            .map_err(|_| S3ServiceError::InvalidArgument {
                message: BAD_TAGGING_HEADER.to_owned(),
            })
    };

    let tags = header
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode(k)?, decode(v)?))
        })
        .collect::<Result<Vec<_>, S3ServiceError>>()?;

    validate_tags(&tags)?;
    Ok(tags)
}
