//! Hand-off from the HTTP layer to the business logic.
//!
//! A handler implementing [`S3Handler`] receives the routed operation with the
//! raw request. It is expected to build the typed input with
//! [`FromS3Request`](crate::request::FromS3Request), run the operation and render
//! the output with [`IntoS3Response`](crate::response::IntoS3Response).

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use s3mock_model::S3Operation;
use s3mock_model::error::S3Error;

use crate::body::S3ResponseBody;
use crate::router::RoutingContext;

/// The boundary between the HTTP layer and the S3 business logic.
///
/// The future is boxed so the trait stays object safe.
pub trait S3Handler: Send + Sync + 'static {
    /// Handle an S3 operation and produce an HTTP response.
    ///
    /// The implementor receives the identified operation, raw HTTP parts, and body,
    /// and must return a fully formed HTTP response.
    fn handle_operation(
        &self,
        op: S3Operation,
        parts: http::request::Parts,
        body: Bytes,
        ctx: RoutingContext,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<S3ResponseBody>, S3Error>> + Send>>;
}

/// Dispatch a routed S3 request to the handler.
pub async fn dispatch_operation<H: S3Handler>(
    handler: &H,
    parts: http::request::Parts,
    body: Bytes,
    ctx: RoutingContext,
) -> Result<http::Response<S3ResponseBody>, S3Error> {
    let op = ctx.operation;
    tracing::debug!(
        operation = %op,
        bucket = ?ctx.bucket,
        key = ?ctx.key,
        "dispatching S3 operation"
    );
    handler.handle_operation(op, parts, body, ctx).await
}

/// Handler that answers every operation with `NotImplemented`.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl S3Handler for NotImplementedHandler {
    fn handle_operation(
        &self,
        op: S3Operation,
        _parts: http::request::Parts,
        _body: Bytes,
        _ctx: RoutingContext,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<S3ResponseBody>, S3Error>> + Send>> {
        Box::pin(async move { Err(S3Error::not_implemented(op.as_str())) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RoutingContext;

    #[tokio::test]
    async fn test_should_return_not_implemented_for_default_handler() {
        let handler = NotImplementedHandler;
        let req = http::Request::builder()
            .method(http::Method::GET)
            .uri("/mybucket/mykey?legal-hold")
            .body(())
            .expect("valid request");
        let (parts, ()) = req.into_parts();
        let ctx = RoutingContext {
            bucket: Some("mybucket".to_owned()),
            key: Some("mykey".to_owned()),
            operation: S3Operation::GetObjectLegalHold,
            query_params: vec![("legal-hold".to_owned(), String::new())],
        };

        let err = dispatch_operation(&handler, parts, Bytes::new(), ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code, s3mock_model::error::S3ErrorCode::NotImplemented);
        assert_eq!(err.resource.as_deref(), Some("GetObjectLegalHold"));
    }
}
