//! S3 protocol model for s3mock.
//!
//! Typed inputs and outputs for every served operation, the shared object
//! lock shapes, and the [`S3Error`] type that carries the wire error code,
//! message and HTTP status.
#![allow(missing_docs)]

pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod request;
pub mod types;

pub use error::{S3Error, S3ErrorCode};
pub use operations::S3Operation;
pub use request::StreamingBlob;
