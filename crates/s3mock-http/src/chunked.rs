//! `aws-chunked` payload decoding.
//!
//! AWS SDKs may upload object bodies with `Content-Encoding: aws-chunked`,
//! where the payload is framed as:
//!
//! ```text
//! <hex-size>[;chunk-signature=<sig>]\r\n
//! <data>\r\n
//! ...
//! 0[;chunk-signature=<sig>]\r\n
//! [<trailer-name>:<value>\r\n]*
//! \r\n
//! ```
//!
//! Trailing checksum headers are accepted and discarded.

use bytes::{Bytes, BytesMut};
use http::header::HeaderMap;
use s3mock_model::error::S3Error;

/// Whether the request body uses `aws-chunked` framing.
///
/// True when `Content-Encoding` lists `aws-chunked` or when
/// `x-amz-content-sha256` announces a `STREAMING-` payload.
pub fn is_aws_chunked(parts: &http::request::Parts) -> bool {
    let header_str = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());
    let is_chunked = |v: &str| v.trim().eq_ignore_ascii_case("aws-chunked");

    header_str(http::header::CONTENT_ENCODING.as_str())
        .is_some_and(|ce| ce.split(',').any(is_chunked))
        || header_str("x-amz-content-sha256").is_some_and(|sha| sha.starts_with("STREAMING-"))
}

/// Decode an `aws-chunked` body into the raw payload.
///
/// # Errors
///
/// Returns `InvalidArgument` when the framing is malformed.
pub fn decode_aws_chunked(body: &[u8]) -> Result<Bytes, S3Error> {
    let mut output = BytesMut::with_capacity(body.len());
    let mut pos = 0;

    loop {
        let line_end = find_crlf(body, pos).ok_or_else(|| malformed("missing chunk size line"))?;
        let size_line = &body[pos..line_end];
        let hex_part = size_line
            .iter()
            .position(|&b| b == b';')
            .map_or(size_line, |semi| &size_line[..semi]);
        let hex_str =
            std::str::from_utf8(hex_part).map_err(|_| malformed("invalid chunk size encoding"))?;
        let chunk_size = usize::from_str_radix(hex_str.trim(), 16)
            .map_err(|_| malformed(&format!("invalid chunk size '{hex_str}'")))?;
        pos = line_end + 2;

        if chunk_size == 0 {
            break;
        }

        let data_end = pos
            .checked_add(chunk_size)
            .filter(|end| *end <= body.len())
            .ok_or_else(|| malformed("chunk data truncated"))?;
        output.extend_from_slice(&body[pos..data_end]);
        pos = data_end;

        if body.get(pos..pos + 2) != Some(b"\r\n".as_slice()) {
            return Err(malformed("missing CRLF after chunk data"));
        }
        pos += 2;
    }

    // Anything after the terminal chunk is trailer headers.
    Ok(output.freeze())
}

/// Remove `aws-chunked` from `Content-Encoding`, dropping the header when
/// nothing else is left.
pub fn strip_aws_chunked_encoding(headers: &mut HeaderMap) {
    let Some(value) = headers
        .get(http::header::CONTENT_ENCODING)
        .and_then(|ce| ce.to_str().ok())
    else {
        return;
    };

    let remaining = value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("aws-chunked"))
        .collect::<Vec<_>>()
        .join(", ");

    if remaining.is_empty() {
        headers.remove(http::header::CONTENT_ENCODING);
    } else if let Ok(new_val) = http::header::HeaderValue::from_str(&remaining) {
        headers.insert(http::header::CONTENT_ENCODING, new_val);
    }
}

fn malformed(detail: &str) -> S3Error {
    S3Error::invalid_argument(format!("Malformed aws-chunked body: {detail}"))
}

fn find_crlf(data: &[u8], start: usize) -> Option<usize> {
    data.get(start..)?
        .windows(2)
        .position(|w| w == b"\r\n")
        .map(|p| start + p)
}
