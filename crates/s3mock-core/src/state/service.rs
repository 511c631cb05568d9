//! Top-level S3 service state.
//!
//! [`S3ServiceState`] is the bucket registry. It owns every [`S3Bucket`] and
//! enforces bucket-name uniqueness. All operations are thread-safe via
//! `DashMap`.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::Ref;
use tracing::{debug, info};

use crate::error::S3ServiceError;

use super::bucket::S3Bucket;
use super::object::Owner;

/// Top-level S3 service state holding all buckets.
pub struct S3ServiceState {
    /// Bucket name to `S3Bucket` mapping.
    buckets: DashMap<String, S3Bucket>,
}

impl std::fmt::Debug for S3ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ServiceState")
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl Default for S3ServiceState {
    fn default() -> Self {
        Self::new()
    }
}

impl S3ServiceState {
    /// Create a new, empty service state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Create a new bucket.
    ///
    /// The name check and the insert happen under one shard lock, so two
    /// concurrent creates of the same name cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::BucketAlreadyExists`] if the name is taken.
    pub fn create_bucket(
        &self,
        name: String,
        region: String,
        owner: Owner,
        object_lock_enabled: bool,
    ) -> Result<(), S3ServiceError> {
        match self.buckets.entry(name.clone()) {
            Entry::Occupied(_) => Err(S3ServiceError::BucketAlreadyExists { bucket: name }),
            Entry::Vacant(slot) => {
                slot.insert(S3Bucket::new(
                    name.clone(),
                    region,
                    owner,
                    object_lock_enabled,
                ));
                info!(bucket = %name, object_lock = object_lock_enabled, "bucket created");
                Ok(())
            }
        }
    }

    /// Delete a bucket.
    ///
    /// # Errors
    ///
    /// - [`S3ServiceError::NoSuchBucket`] if the bucket does not exist.
    /// - [`S3ServiceError::BucketNotEmpty`] if any version or delete marker
    ///   remains.
    pub fn delete_bucket(&self, name: &str) -> Result<(), S3ServiceError> {
        if self
            .buckets
            .remove_if(name, |_, bucket| bucket.is_empty())
            .is_some()
        {
            info!(bucket = %name, "bucket deleted");
            return Ok(());
        }

        if self.buckets.contains_key(name) {
            Err(S3ServiceError::BucketNotEmpty {
                bucket: name.to_owned(),
            })
        } else {
            Err(S3ServiceError::NoSuchBucket {
                bucket: name.to_owned(),
            })
        }
    }

    /// Get an immutable reference to a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::NoSuchBucket`] if the bucket does not exist.
    pub fn get_bucket(&self, name: &str) -> Result<Ref<'_, String, S3Bucket>, S3ServiceError> {
        self.buckets
            .get(name)
            .ok_or_else(|| S3ServiceError::NoSuchBucket {
                bucket: name.to_owned(),
            })
    }

    /// List all buckets, returning `(name, creation_date)` pairs sorted by name.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<(String, DateTime<Utc>)> {
        let mut buckets: Vec<(String, DateTime<Utc>)> = self
            .buckets
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().creation_date))
            .collect();
        buckets.sort_by(|a, b| a.0.cmp(&b.0));
        buckets
    }

    /// Check whether a bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Reset all state, removing all buckets.
    pub fn reset(&self) {
        debug!("resetting all S3 service state");
        self.buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::state::object::S3Object;

    fn create(state: &S3ServiceState, name: &str, lock: bool) {
        state
            .create_bucket(
                name.to_owned(),
                "us-east-1".to_owned(),
                Owner::default(),
                lock,
            )
            .unwrap_or_else(|e| panic!("create_bucket {name} failed: {e}"));
    }

    #[test]
    fn test_should_create_empty_service_state() {
        let state = S3ServiceState::new();
        assert!(!state.bucket_exists("anything"));
        assert!(state.list_buckets().is_empty());
        assert!(format!("{state:?}").contains("S3ServiceState"));
    }

    #[test]
    fn test_should_create_and_get_bucket() {
        let state = S3ServiceState::new();
        create(&state, "locked", true);
        create(&state, "plain", false);

        let locked = state
            .get_bucket("locked")
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert!(locked.object_lock_enabled);
        assert_eq!(locked.region, "us-east-1");
        drop(locked);

        let plain = state
            .get_bucket("plain")
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert!(!plain.object_lock_enabled);
    }

    #[test]
    fn test_should_reject_duplicate_bucket() {
        let state = S3ServiceState::new();
        create(&state, "dup", false);

        let result = state.create_bucket(
            "dup".to_owned(),
            "us-east-1".to_owned(),
            Owner::default(),
            true,
        );
        assert!(
            matches!(result, Err(S3ServiceError::BucketAlreadyExists { .. })),
            "expected BucketAlreadyExists, got {result:?}"
        );
        let bucket = state
            .get_bucket("dup")
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert!(!bucket.object_lock_enabled, "flag must not change");
    }

    #[test]
    fn test_should_return_error_for_nonexistent_bucket() {
        let state = S3ServiceState::new();
        assert!(matches!(
            state.get_bucket("nope"),
            Err(S3ServiceError::NoSuchBucket { .. })
        ));
    }

    #[test]
    fn test_should_delete_empty_bucket() {
        let state = S3ServiceState::new();
        create(&state, "deleteme", false);
        state
            .delete_bucket("deleteme")
            .unwrap_or_else(|e| panic!("delete failed: {e}"));
        assert!(!state.bucket_exists("deleteme"));
    }

    #[test]
    fn test_should_reject_delete_nonexistent_bucket() {
        let state = S3ServiceState::new();
        assert!(matches!(
            state.delete_bucket("ghost"),
            Err(S3ServiceError::NoSuchBucket { .. })
        ));
    }

    #[test]
    fn test_should_reject_delete_non_empty_bucket() {
        let state = S3ServiceState::new();
        create(&state, "full", false);
        {
            let bucket = state
                .get_bucket("full")
                .unwrap_or_else(|e| panic!("get failed: {e}"));
            bucket.objects.write().put(S3Object::new(
                "file.txt",
                Bytes::from_static(b"data"),
                Owner::default(),
            ));
        }

        let result = state.delete_bucket("full");
        assert!(
            matches!(result, Err(S3ServiceError::BucketNotEmpty { .. })),
            "expected BucketNotEmpty, got {result:?}"
        );
        assert!(state.bucket_exists("full"));
    }

    #[test]
    fn test_should_list_buckets_sorted() {
        let state = S3ServiceState::new();
        for name in ["charlie", "alpha", "bravo"] {
            create(&state, name, false);
        }

        let names: Vec<String> = state.list_buckets().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_should_reset_all_state() {
        let state = S3ServiceState::new();
        create(&state, "a", true);
        create(&state, "b", false);

        assert_eq!(state.list_buckets().len(), 2);
        state.reset();
        assert!(state.list_buckets().is_empty());
        assert!(!state.bucket_exists("a"));
    }

    #[test]
    fn test_should_recreate_bucket_after_delete() {
        let state = S3ServiceState::new();
        create(&state, "reuse", false);
        state
            .delete_bucket("reuse")
            .unwrap_or_else(|e| panic!("delete failed: {e}"));
        create(&state, "reuse", true);
        let bucket = state
            .get_bucket("reuse")
            .unwrap_or_else(|e| panic!("get failed: {e}"));
        assert!(bucket.object_lock_enabled);
    }
}
