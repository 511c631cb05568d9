//! S3 service state management.
//!
//! This module provides the in-memory state for the S3 service:
//!
//! - [`S3ServiceState`] -- the bucket registry
//! - [`S3Bucket`] -- per-bucket state (object store, object lock flag, default retention)
//! - [`ObjectStore`] / [`KeyStore`] / [`VersionedKeyStore`] -- key-level storage
//! - [`S3Object`] / [`S3DeleteMarker`] / [`ObjectVersion`] -- stored versions
//!
//! # Thread Safety
//!
//! All types are `Send + Sync`. Concurrent access is handled via:
//!
//! - `DashMap` for the bucket table
//! - `parking_lot::RwLock` for the default retention rule and the object store

pub(crate) mod bucket;
pub(crate) mod keystore;
pub(crate) mod object;
pub(crate) mod service;

pub use bucket::S3Bucket;
pub use keystore::{DeleteOutcome, KeyStore, ObjectStore, VersionedKeyStore};
pub use object::{
    NULL_VERSION_ID, ObjectVersion, Owner, Retention, S3DeleteMarker, S3Object, compute_etag,
};
pub use service::S3ServiceState;
