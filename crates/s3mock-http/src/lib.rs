//! HTTP front end of s3mock.
//!
//! - [`router`] maps method, path, query and headers to an
//!   [`S3Operation`](s3mock_model::S3Operation), with path-style and
//!   virtual-hosted-style addressing
//! - [`request`] builds typed inputs from the request
//! - [`response`] renders typed outputs and errors
//! - [`dispatch`] hands routed requests to an [`S3Handler`]
//! - [`service`] is the hyper `Service` gluing it together
//! - [`chunked`] unwraps `aws-chunked` upload bodies
//!
//! ```text
//! HTTP Request
//!   -> S3HttpService (hyper Service)
//!     -> Health check interception
//!     -> S3Router (virtual hosting + operation identification)
//!     -> Body collection (aws-chunked decoding)
//!     -> dispatch_operation (S3Handler trait)
//!     -> Common response headers (x-amz-request-id, Server)
//!   <- HTTP Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use s3mock_http::dispatch::NotImplementedHandler;
//! use s3mock_http::service::{S3HttpConfig, S3HttpService};
//!
//! let config = S3HttpConfig::default();
//! let service = S3HttpService::new(NotImplementedHandler, &config);
//! // Serve `service` with hyper-util.
//! ```

// S3Error carries a boxed source and several strings; boxing it in every
// Result would only add indirection.
#![allow(clippy::result_large_err)]

pub mod body;
pub mod chunked;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod router;
pub mod service;

pub use body::S3ResponseBody;
pub use dispatch::{NotImplementedHandler, S3Handler};
pub use request::FromS3Request;
pub use response::IntoS3Response;
pub use router::{RoutingContext, S3Router};
pub use service::{S3HttpConfig, S3HttpService};
