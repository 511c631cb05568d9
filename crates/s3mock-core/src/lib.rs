//! In-memory S3 state and object lock rules for s3mock.
//!
//! This crate owns everything behind the HTTP layer: the bucket registry,
//! per-bucket object stores and the object lock state machine (legal hold
//! and retention). Operations are exposed as `handle_*` methods on
//! [`S3Provider`], taking the typed inputs from `s3mock-model`.
//!
//! # Architecture
//!
//! ```text
//! S3HttpService (s3mock-http: routing, XML, error mapping)
//!        |
//!        v
//! S3Provider::handle_* (ops)
//!        |            \
//!        v             v
//! S3ServiceState    lock rules (gate, hold, retention)
//!        |
//!        v
//! S3Bucket -> ObjectStore (unversioned or versioned)
//! ```
//!
//! # Object lock
//!
//! A bucket is lock-enabled only when created with object lock, and that
//! never changes afterwards. Lock-enabled buckets are versioned. Every lock
//! operation on a plain bucket fails with `ObjectLockConfigurationNotFoundError`
//! before any object is looked up.

pub mod config;
pub mod error;
pub mod lock;
mod ops;
pub mod provider;
pub mod state;
pub mod validation;

pub use config::S3Config;
pub use provider::S3Provider;
