//! S3 operation handlers.
//!
//! Each submodule exposes `handle_*` methods on [`crate::provider::S3Provider`]
//! that take a typed input from `s3mock-model` and return its typed output.
//! Domain failures are raised as [`crate::error::S3ServiceError`] and
//! converted to the wire error by `?`.
//!
//! The server binary bridges these handlers to the HTTP layer by implementing
//! the `S3Handler` trait from `s3mock-http`.

pub mod bucket;
pub mod lock;
pub mod object;
pub mod tagging;

use crate::state::NULL_VERSION_ID;

/// The version ID to report on the wire. Unversioned objects report none.
pub(crate) fn visible_version_id(version_id: &str) -> Option<String> {
    (version_id != NULL_VERSION_ID).then(|| version_id.to_owned())
}
