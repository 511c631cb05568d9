//! [`S3Handler`] implementation for [`S3Provider`].
//!
//! Bridges the HTTP layer (`s3mock-http`) and the business logic
//! (`s3mock-core`). Each routed operation is decoded with [`FromS3Request`],
//! handed to the matching `handle_*` method and rendered with
//! [`IntoS3Response`].

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use s3mock_core::S3Provider;
use s3mock_http::body::S3ResponseBody;
use s3mock_http::dispatch::S3Handler;
use s3mock_http::request::FromS3Request;
use s3mock_http::response::IntoS3Response;
use s3mock_http::router::RoutingContext;
use s3mock_model::S3Operation;
use s3mock_model::error::S3Error;

/// Wrapper that implements [`S3Handler`] by delegating to [`S3Provider`].
#[derive(Debug, Clone)]
pub struct S3MockHandler(pub S3Provider);

impl S3Handler for S3MockHandler {
    // One single-line delegation per operation.
    #[allow(clippy::too_many_lines)]
    fn handle_operation(
        &self,
        op: S3Operation,
        parts: http::request::Parts,
        body: Bytes,
        ctx: RoutingContext,
    ) -> Pin<Box<dyn Future<Output = Result<http::Response<S3ResponseBody>, S3Error>> + Send>> {
        let provider = self.0.clone();
        Box::pin(async move {
            let bucket = ctx.bucket.as_deref();
            let key = ctx.key.as_deref();
            let query_params = &ctx.query_params;

            match op {
                // ---------------------------------------------------------------
                // Buckets
                // ---------------------------------------------------------------
                S3Operation::CreateBucket => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_create_bucket(input)
                    })
                    .await
                }
                S3Operation::DeleteBucket => {
                    dispatch_void(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_delete_bucket(input)
                    })
                    .await
                }
                S3Operation::HeadBucket => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_head_bucket(input)
                    })
                    .await
                }
                S3Operation::ListBuckets => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_list_buckets(input)
                    })
                    .await
                }
                S3Operation::GetObjectLockConfiguration => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_get_object_lock_configuration(input)
                    })
                    .await
                }
                S3Operation::PutObjectLockConfiguration => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_put_object_lock_configuration(input)
                    })
                    .await
                }

                // ---------------------------------------------------------------
                // Objects
                // ---------------------------------------------------------------
                S3Operation::PutObject => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_put_object(input)
                    })
                    .await
                }
                S3Operation::GetObject => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_get_object(input)
                    })
                    .await
                }
                S3Operation::HeadObject => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_head_object(input)
                    })
                    .await
                }
                S3Operation::DeleteObject => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_delete_object(input)
                    })
                    .await
                }

                // ---------------------------------------------------------------
                // Tagging
                // ---------------------------------------------------------------
                S3Operation::GetObjectTagging => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_get_object_tagging(input)
                    })
                    .await
                }
                S3Operation::PutObjectTagging => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_put_object_tagging(input)
                    })
                    .await
                }
                S3Operation::DeleteObjectTagging => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_delete_object_tagging(input)
                    })
                    .await
                }

                // ---------------------------------------------------------------
                // Object lock
                // ---------------------------------------------------------------
                S3Operation::GetObjectRetention => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_get_object_retention(input)
                    })
                    .await
                }
                S3Operation::PutObjectRetention => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_put_object_retention(input)
                    })
                    .await
                }
                S3Operation::GetObjectLegalHold => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_get_object_legal_hold(input)
                    })
                    .await
                }
                S3Operation::PutObjectLegalHold => {
                    dispatch_output(&parts, bucket, key, query_params, body, |input| {
                        provider.handle_put_object_legal_hold(input)
                    })
                    .await
                }
            }
        })
    }
}

/// Decode the input, run the handler and render its output.
async fn dispatch_output<I, O, F, Fut>(
    parts: &http::request::Parts,
    bucket: Option<&str>,
    key: Option<&str>,
    query_params: &[(String, String)],
    body: Bytes,
    handler_fn: F,
) -> Result<http::Response<S3ResponseBody>, S3Error>
where
    I: FromS3Request,
    O: IntoS3Response,
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<O, S3Error>>,
{
    let input = I::from_s3_request(parts, bucket, key, query_params, body)?;
    let output = handler_fn(input).await?;
    output.into_s3_response()
}

/// Dispatch an operation with no output. Answers 204 No Content.
async fn dispatch_void<I, F, Fut>(
    parts: &http::request::Parts,
    bucket: Option<&str>,
    key: Option<&str>,
    query_params: &[(String, String)],
    body: Bytes,
    handler_fn: F,
) -> Result<http::Response<S3ResponseBody>, S3Error>
where
    I: FromS3Request,
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<(), S3Error>>,
{
    let input = I::from_s3_request(parts, bucket, key, query_params, body)?;
    handler_fn(input).await?;
    http::Response::builder()
        .status(http::StatusCode::NO_CONTENT)
        .body(S3ResponseBody::empty())
        .map_err(|e| S3Error::internal_error(e.to_string()))
}
