//! The response body type of the s3mock HTTP service.
//!
//! Object payloads are held in memory, so every body is either a fully
//! buffered chunk (XML documents, error bodies, `GetObject` data) or empty
//! (`204 No Content`, `HEAD`, the object lock setters).

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::Full;

/// Buffered or empty response body, usable directly with hyper.
#[derive(Debug, Default)]
pub enum S3ResponseBody {
    /// The whole payload in one frame.
    Buffered(Full<Bytes>),
    /// No payload.
    #[default]
    Empty,
}

impl S3ResponseBody {
    /// Create a buffered body from bytes.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::Buffered(Full::new(data.into()))
    }

    /// Create an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Create a buffered body from a UTF-8 string.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self::Buffered(Full::new(Bytes::from(s.into())))
    }

    /// Create a buffered body from a serialized XML document.
    #[must_use]
    pub fn from_xml(xml: Vec<u8>) -> Self {
        Self::from_bytes(xml)
    }
}

impl http_body::Body for S3ResponseBody {
    type Data = Bytes;
    type Error = std::io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<http_body::Frame<Self::Data>, Self::Error>>> {
        match self.get_mut() {
            Self::Buffered(full) => Pin::new(full)
                .poll_frame(cx)
                .map_err(|never| match never {}),
            Self::Empty => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Buffered(full) => full.is_end_stream(),
            Self::Empty => true,
        }
    }

    fn size_hint(&self) -> http_body::SizeHint {
        match self {
            Self::Buffered(full) => full.size_hint(),
            Self::Empty => http_body::SizeHint::with_exact(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body::Body;

    use super::*;

    #[test]
    fn test_should_report_empty_body_as_end_of_stream() {
        let body = S3ResponseBody::empty();
        assert!(body.is_end_stream());
    }

    #[test]
    fn test_should_have_zero_size_for_empty_body() {
        let body = S3ResponseBody::empty();
        let hint = body.size_hint();
        assert_eq!(hint.exact(), Some(0));
    }

    #[test]
    fn test_should_report_exact_size_for_buffered_bodies() {
        let body = S3ResponseBody::from_bytes(Bytes::from("hello"));
        assert!(!body.is_end_stream());
        assert_eq!(body.size_hint().exact(), Some(5));

        let xml = b"<LegalHold><Status>ON</Status></LegalHold>".to_vec();
        let len = xml.len() as u64;
        let body = S3ResponseBody::from_xml(xml);
        assert_eq!(body.size_hint().exact(), Some(len));
    }

    #[test]
    fn test_should_yield_whole_payload() {
        use http_body_util::BodyExt;

        let body = S3ResponseBody::from_string(r#"{"status":"running"}"#);
        let collected = tokio_test::block_on(body.collect())
            .expect("collect")
            .to_bytes();
        assert_eq!(collected.as_ref(), br#"{"status":"running"}"#);
    }

    #[test]
    fn test_should_default_to_empty() {
        let body = S3ResponseBody::default();
        assert!(body.is_end_stream());
    }
}
