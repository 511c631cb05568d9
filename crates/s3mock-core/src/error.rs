//! S3-specific error types.
//!
//! Defines [`S3ServiceError`], the domain error enum produced by the bucket
//! registry, the object store and the lock metadata manager. Each variant
//! maps to exactly one wire [`S3ErrorCode`] and HTTP status through the
//! [`From`] implementation, so handlers can use `?` and let the conversion
//! pick the code.
//!
//! # Usage
//!
//! ```
//! use s3mock_core::error::S3ServiceError;
//! use s3mock_model::error::{S3Error, S3ErrorCode};
//!
//! let err = S3ServiceError::NoBucketLockConfig {
//!     bucket: "plain".to_owned(),
//! };
//! let s3_err: S3Error = err.into();
//! assert_eq!(s3_err.code, S3ErrorCode::ObjectLockConfigurationNotFoundError);
//! assert_eq!(s3_err.status_code, http::StatusCode::NOT_FOUND);
//! ```

use s3mock_model::error::{S3Error, S3ErrorCode};

/// Message returned with `AccessDenied` when object lock blocks a mutation.
pub const OBJECT_LOCKED_MESSAGE: &str = "Access Denied because object protected by object lock.";

/// S3 service error type.
///
/// Each variant corresponds to a well-known S3 error code. The two
/// lock-absence variants are deliberately separate: one is raised when the
/// bucket was never created with object lock, the other when a version in a
/// lock-enabled bucket carries no lock metadata.
#[derive(Debug, thiserror::Error)]
pub enum S3ServiceError {
    // -----------------------------------------------------------------------
    // Bucket errors
    // -----------------------------------------------------------------------
    /// The specified bucket does not exist.
    #[error("The specified bucket does not exist: {bucket}")]
    NoSuchBucket {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// The requested bucket name is not available.
    #[error("The requested bucket name is not available: {bucket}")]
    BucketAlreadyExists {
        /// The bucket name that already exists.
        bucket: String,
    },

    /// The bucket still holds object versions and cannot be deleted.
    #[error("The bucket you tried to delete is not empty: {bucket}")]
    BucketNotEmpty {
        /// The bucket name that is not empty.
        bucket: String,
    },

    // -----------------------------------------------------------------------
    // Object / key errors
    // -----------------------------------------------------------------------
    /// The specified key does not exist, or its latest version is a delete marker.
    #[error("The specified key does not exist: {key}")]
    NoSuchKey {
        /// The key that was not found.
        key: String,
    },

    /// The specified version does not exist.
    #[error("The specified version does not exist: key={key}, version_id={version_id}")]
    NoSuchVersion {
        /// The key for the version.
        key: String,
        /// The version ID that was not found.
        version_id: String,
    },

    /// The uploaded body is larger than the configured maximum.
    #[error("Your proposed upload exceeds the maximum allowed object size")]
    EntityTooLarge,

    // -----------------------------------------------------------------------
    // Object lock errors
    // -----------------------------------------------------------------------
    /// The bucket was not created with object lock enabled.
    #[error("Object Lock configuration does not exist for this bucket")]
    NoBucketLockConfig {
        /// The bucket that lacks object lock.
        bucket: String,
    },

    /// The object version has no lock metadata of the requested kind.
    #[error("The specified object does not have a ObjectLock configuration")]
    NoObjectLockConfig {
        /// The key of the version that was inspected.
        key: String,
    },

    /// A legal hold or active retention forbids the requested mutation.
    #[error("Access Denied because object protected by object lock: {key} ({version_id})")]
    ObjectLocked {
        /// The protected key.
        key: String,
        /// The protected version.
        version_id: String,
    },

    // -----------------------------------------------------------------------
    // Validation errors
    // -----------------------------------------------------------------------
    /// The specified bucket name is not valid.
    #[error("Invalid bucket name: {name}: {reason}")]
    InvalidBucketName {
        /// The invalid bucket name.
        name: String,
        /// The reason for the error.
        reason: String,
    },

    /// An argument provided is invalid.
    #[error("{message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// The request is not valid in the current bucket or object state.
    #[error("{message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },

    /// A tag key or value is invalid.
    #[error("Invalid tag: {message}")]
    InvalidTag {
        /// Description of the tag error.
        message: String,
    },

    /// The XML body is malformed.
    #[error("The XML you provided was not well-formed: {detail}")]
    MalformedXml {
        /// What was wrong with the document.
        detail: String,
    },

    // -----------------------------------------------------------------------
    // Internal / catch-all
    // -----------------------------------------------------------------------
    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl S3ServiceError {
    /// Convert this error into an [`S3Error`].
    ///
    /// Equivalent to `S3Error::from(self)`, handy in `map_err` chains.
    #[must_use]
    pub fn into_s3_error(self) -> S3Error {
        S3Error::from(self)
    }

    /// The wire error code this error maps to.
    #[must_use]
    pub fn code(&self) -> S3ErrorCode {
        match self {
            Self::NoSuchBucket { .. } => S3ErrorCode::NoSuchBucket,
            Self::BucketAlreadyExists { .. } => S3ErrorCode::BucketAlreadyExists,
            Self::BucketNotEmpty { .. } => S3ErrorCode::BucketNotEmpty,
            Self::NoSuchKey { .. } => S3ErrorCode::NoSuchKey,
            Self::NoSuchVersion { .. } => S3ErrorCode::NoSuchVersion,
            Self::EntityTooLarge => S3ErrorCode::EntityTooLarge,
            Self::NoBucketLockConfig { .. } => S3ErrorCode::ObjectLockConfigurationNotFoundError,
            Self::NoObjectLockConfig { .. } => S3ErrorCode::NoSuchObjectLockConfiguration,
            Self::ObjectLocked { .. } => S3ErrorCode::AccessDenied,
            Self::InvalidBucketName { .. } => S3ErrorCode::InvalidBucketName,
            Self::InvalidArgument { .. } => S3ErrorCode::InvalidArgument,
            Self::InvalidRequest { .. } => S3ErrorCode::InvalidRequest,
            Self::InvalidTag { .. } => S3ErrorCode::InvalidTag,
            Self::MalformedXml { .. } => S3ErrorCode::MalformedXML,
            Self::Internal(_) => S3ErrorCode::InternalError,
        }
    }
}

impl From<S3ServiceError> for S3Error {
    fn from(err: S3ServiceError) -> Self {
        match err {
            S3ServiceError::NoSuchBucket { bucket } => S3Error::no_such_bucket(bucket),
            S3ServiceError::BucketAlreadyExists { bucket } => {
                S3Error::bucket_already_exists(bucket)
            }
            S3ServiceError::BucketNotEmpty { bucket } => S3Error::bucket_not_empty(bucket),
            S3ServiceError::NoSuchKey { key } => S3Error::no_such_key(key),
            S3ServiceError::NoSuchVersion { version_id, .. } => {
                S3Error::no_such_version(version_id)
            }
            S3ServiceError::NoBucketLockConfig { bucket } => {
                S3Error::object_lock_configuration_not_found(bucket)
            }
            S3ServiceError::NoObjectLockConfig { key } => {
                S3Error::no_such_object_lock_configuration(key)
            }
            S3ServiceError::ObjectLocked { key, .. } => {
                S3Error::with_message(S3ErrorCode::AccessDenied, OBJECT_LOCKED_MESSAGE)
                    .with_resource(key)
            }
            S3ServiceError::InvalidBucketName { name, reason } => {
                S3Error::with_message(S3ErrorCode::InvalidBucketName, reason).with_resource(name)
            }
            S3ServiceError::InvalidArgument { message } => S3Error::invalid_argument(message),
            S3ServiceError::InvalidRequest { message } => S3Error::invalid_request(message),
            S3ServiceError::InvalidTag { message } => {
                S3Error::with_message(S3ErrorCode::InvalidTag, message)
            }
            S3ServiceError::MalformedXml { detail } => S3Error::malformed_xml(detail),
            err @ (S3ServiceError::EntityTooLarge | S3ServiceError::Internal(_)) => {
                S3Error::with_message(err.code(), err.to_string())
            }
        }
    }
}

/// Convenience result type for S3 service operations.
pub type S3ServiceResult<T> = Result<T, S3ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_convert_no_such_bucket_to_s3_error() {
        let err = S3ServiceError::NoSuchBucket {
            bucket: "my-bucket".to_owned(),
        };
        let s3_err: S3Error = err.into();
        assert_eq!(s3_err.code, S3ErrorCode::NoSuchBucket);
        assert_eq!(s3_err.status_code, http::StatusCode::NOT_FOUND);
        assert_eq!(s3_err.resource.as_deref(), Some("my-bucket"));
    }

    #[test]
    fn test_should_keep_lock_absence_errors_distinct() {
        let bucket_level: S3Error = S3ServiceError::NoBucketLockConfig {
            bucket: "plain".to_owned(),
        }
        .into();
        let object_level: S3Error = S3ServiceError::NoObjectLockConfig {
            key: "file.txt".to_owned(),
        }
        .into();

        assert_eq!(bucket_level.status_code, http::StatusCode::NOT_FOUND);
        assert_eq!(object_level.status_code, http::StatusCode::NOT_FOUND);
        assert_eq!(
            bucket_level.code,
            S3ErrorCode::ObjectLockConfigurationNotFoundError
        );
        assert_eq!(
            object_level.code,
            S3ErrorCode::NoSuchObjectLockConfiguration
        );
        assert_eq!(
            bucket_level.message,
            "Object Lock configuration does not exist for this bucket"
        );
        assert_eq!(
            object_level.message,
            "The specified object does not have a ObjectLock configuration"
        );
    }

    #[test]
    fn test_should_convert_object_locked_to_access_denied() {
        let s3_err: S3Error = S3ServiceError::ObjectLocked {
            key: "file.txt".to_owned(),
            version_id: "v1".to_owned(),
        }
        .into();
        assert_eq!(s3_err.code, S3ErrorCode::AccessDenied);
        assert_eq!(s3_err.status_code, http::StatusCode::FORBIDDEN);
        assert_eq!(s3_err.message, OBJECT_LOCKED_MESSAGE);
    }

    #[test]
    fn test_should_convert_conflicts_to_409() {
        for err in [
            S3ServiceError::BucketAlreadyExists {
                bucket: "taken".to_owned(),
            },
            S3ServiceError::BucketNotEmpty {
                bucket: "full".to_owned(),
            },
        ] {
            let s3_err = err.into_s3_error();
            assert_eq!(s3_err.status_code, http::StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_should_convert_client_errors_to_400() {
        let cases = [
            (
                S3ServiceError::InvalidArgument {
                    message: "bad date".to_owned(),
                },
                S3ErrorCode::InvalidArgument,
            ),
            (
                S3ServiceError::InvalidRequest {
                    message: "Bucket is missing Object Lock Configuration".to_owned(),
                },
                S3ErrorCode::InvalidRequest,
            ),
            (
                S3ServiceError::InvalidBucketName {
                    name: "A".to_owned(),
                    reason: "too short".to_owned(),
                },
                S3ErrorCode::InvalidBucketName,
            ),
            (
                S3ServiceError::MalformedXml {
                    detail: "missing Status".to_owned(),
                },
                S3ErrorCode::MalformedXML,
            ),
            (
                S3ServiceError::InvalidTag {
                    message: "duplicate key".to_owned(),
                },
                S3ErrorCode::InvalidTag,
            ),
        ];
        for (err, code) in cases {
            let s3_err = err.into_s3_error();
            assert_eq!(s3_err.code, code);
            assert_eq!(s3_err.status_code, http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_should_keep_invalid_request_message() {
        let s3_err = S3ServiceError::InvalidRequest {
            message: "Bucket is missing Object Lock Configuration".to_owned(),
        }
        .into_s3_error();
        assert_eq!(
            s3_err.message,
            "Bucket is missing Object Lock Configuration"
        );
    }

    #[test]
    fn test_should_convert_internal_error() {
        let err = S3ServiceError::Internal(anyhow::anyhow!("something broke"));
        let s3_err: S3Error = err.into();
        assert_eq!(s3_err.code, S3ErrorCode::InternalError);
        assert_eq!(s3_err.status_code, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(s3_err.message.contains("something broke"));
    }

    #[test]
    fn test_should_display_error_messages() {
        let err = S3ServiceError::NoSuchVersion {
            key: "k".to_owned(),
            version_id: "v1".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "The specified version does not exist: key=k, version_id=v1"
        );
        assert_eq!(err.into_s3_error().resource.as_deref(), Some("v1"));
    }
}
