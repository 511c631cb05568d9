//! S3 bucket data structure.
//!
//! An [`S3Bucket`] holds per-bucket state: the object store and, for buckets
//! created with object lock, the optional default retention rule.
//!
//! `object_lock_enabled` is fixed at creation. Interior mutability for the
//! rest comes from `parking_lot::RwLock`.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::S3ServiceError;
use crate::lock::DefaultRetentionRule;

use super::keystore::ObjectStore;
use super::object::Owner;

/// A single S3 bucket with all of its state.
pub struct S3Bucket {
    /// Bucket name.
    pub name: String,
    /// AWS region where this bucket was created.
    pub region: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
    /// The bucket owner.
    pub owner: Owner,
    /// Whether object lock was enabled at creation. Never changes afterwards.
    pub object_lock_enabled: bool,
    /// Default retention applied to new versions. Only ever set when
    /// `object_lock_enabled` is true.
    pub default_retention: RwLock<Option<DefaultRetentionRule>>,
    /// Object key storage. Versioned whenever object lock is enabled.
    pub objects: RwLock<ObjectStore>,
}

impl std::fmt::Debug for S3Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Bucket")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("creation_date", &self.creation_date)
            .field("owner", &self.owner)
            .field("object_lock_enabled", &self.object_lock_enabled)
            .finish_non_exhaustive()
    }
}

impl S3Bucket {
    /// Create a new bucket.
    ///
    /// Lock-enabled buckets start with a versioned object store; all others
    /// start unversioned.
    #[must_use]
    pub fn new(name: String, region: String, owner: Owner, object_lock_enabled: bool) -> Self {
        let store = if object_lock_enabled {
            ObjectStore::versioned()
        } else {
            ObjectStore::default()
        };
        Self {
            name,
            region,
            creation_date: Utc::now(),
            owner,
            object_lock_enabled,
            default_retention: RwLock::new(None),
            objects: RwLock::new(store),
        }
    }

    /// Fail with [`S3ServiceError::NoBucketLockConfig`] unless the bucket
    /// was created with object lock.
    ///
    /// Every lock operation runs this before looking at any object.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::NoBucketLockConfig`] for a plain bucket.
    pub fn require_object_lock(&self) -> Result<(), S3ServiceError> {
        if self.object_lock_enabled {
            Ok(())
        } else {
            Err(S3ServiceError::NoBucketLockConfig {
                bucket: self.name.clone(),
            })
        }
    }

    /// Whether the bucket holds no versions and no delete markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.objects.read().has_versions()
    }
}
