//! Key-level object storage.
//!
//! Provides [`ObjectStore`], an enum dispatching between [`KeyStore`]
//! (one object per key) and [`VersionedKeyStore`] (a newest-first version
//! list per key). Lookups that omit a version ID always resolve to the
//! latest version, and a delete marker in that position hides the key.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::S3ServiceError;

use super::object::{NULL_VERSION_ID, ObjectVersion, Owner, S3DeleteMarker, S3Object};

/// What a delete without a version ID did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// An unversioned object was removed (or nothing was there).
    Removed,
    /// A delete marker was stacked on top of the key.
    MarkerInserted {
        /// Version ID of the new delete marker.
        version_id: String,
    },
}

// ---------------------------------------------------------------------------
// ObjectStore (enum dispatch)
// ---------------------------------------------------------------------------

/// Top-level object store that dispatches to either an unversioned or
/// versioned backing store.
#[derive(Debug)]
pub enum ObjectStore {
    /// Unversioned storage. Each key maps to exactly one object.
    Unversioned(KeyStore),
    /// Versioned storage. Each key maps to an ordered list of versions.
    Versioned(VersionedKeyStore),
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::Unversioned(KeyStore::default())
    }
}

impl ObjectStore {
    /// Create an empty versioned store.
    #[must_use]
    pub fn versioned() -> Self {
        Self::Versioned(VersionedKeyStore::default())
    }

    /// Whether this store keeps every version.
    #[must_use]
    pub fn is_versioned(&self) -> bool {
        matches!(self, Self::Versioned(_))
    }

    /// Store an object and return the version ID it was stored under.
    ///
    /// Unversioned stores replace the `"null"` version; versioned stores
    /// assign a fresh ID and make the object the latest version.
    pub fn put(&mut self, object: S3Object) -> String {
        match self {
            Self::Unversioned(ks) => {
                ks.put(object);
                NULL_VERSION_ID.to_owned()
            }
            Self::Versioned(vs) => vs.put(object),
        }
    }

    /// Get the current (latest non-delete-marker) object for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S3Object> {
        match self {
            Self::Unversioned(ks) => ks.get(key),
            Self::Versioned(vs) => vs.get(key),
        }
    }

    /// Mutable counterpart of [`ObjectStore::get`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut S3Object> {
        match self {
            Self::Unversioned(ks) => ks.get_mut(key),
            Self::Versioned(vs) => vs.get_mut(key),
        }
    }

    /// Get a specific version of an object by key and version ID.
    #[must_use]
    pub fn get_version(&self, key: &str, version_id: &str) -> Option<&S3Object> {
        match self {
            // The only valid version ID in an unversioned store is "null".
            Self::Unversioned(ks) => (version_id == NULL_VERSION_ID)
                .then(|| ks.get(key))
                .flatten(),
            Self::Versioned(vs) => vs.get_version(key, version_id),
        }
    }

    /// Mutable counterpart of [`ObjectStore::get_version`].
    pub fn get_version_mut(&mut self, key: &str, version_id: &str) -> Option<&mut S3Object> {
        match self {
            Self::Unversioned(ks) => {
                if version_id == NULL_VERSION_ID {
                    ks.get_mut(key)
                } else {
                    None
                }
            }
            Self::Versioned(vs) => vs.get_version_mut(key, version_id),
        }
    }

    /// Resolve `(key, version_id?)` to an object version.
    ///
    /// # Errors
    ///
    /// - [`S3ServiceError::NoSuchVersion`] when `version_id` names nothing.
    /// - [`S3ServiceError::NoSuchKey`] when the key is missing or its latest
    ///   version is a delete marker.
    pub fn resolve(
        &self,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<&S3Object, S3ServiceError> {
        if let Some(version_id) = version_id {
            self.get_version(key, version_id)
                .ok_or_else(|| no_such_version(key, version_id))
        } else {
            self.get(key).ok_or_else(|| S3ServiceError::NoSuchKey {
                key: key.to_owned(),
            })
        }
    }

    /// Mutable counterpart of [`ObjectStore::resolve`].
    ///
    /// # Errors
    ///
    /// Same as [`ObjectStore::resolve`].
    pub fn resolve_mut(
        &mut self,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<&mut S3Object, S3ServiceError> {
        if let Some(version_id) = version_id {
            self.get_version_mut(key, version_id)
                .ok_or_else(|| no_such_version(key, version_id))
        } else {
            self.get_mut(key).ok_or_else(|| S3ServiceError::NoSuchKey {
                key: key.to_owned(),
            })
        }
    }

    /// Delete the latest version of a key.
    ///
    /// Unversioned stores remove the object. Versioned stores insert a
    /// delete marker and keep every older version intact.
    pub fn delete_latest(&mut self, key: &str, owner: &Owner) -> DeleteOutcome {
        match self {
            Self::Unversioned(ks) => {
                ks.delete(key);
                DeleteOutcome::Removed
            }
            Self::Versioned(vs) => DeleteOutcome::MarkerInserted {
                version_id: vs.insert_delete_marker(key, owner),
            },
        }
    }

    /// Remove a specific version (object or delete marker) entirely.
    pub fn delete_version(&mut self, key: &str, version_id: &str) -> Option<ObjectVersion> {
        match self {
            Self::Unversioned(ks) => {
                if version_id == NULL_VERSION_ID {
                    ks.delete(key).map(|o| ObjectVersion::Object(Box::new(o)))
                } else {
                    None
                }
            }
            Self::Versioned(vs) => vs.delete_version(key, version_id),
        }
    }

    /// Whether `version_id` of `key` is a delete marker.
    #[must_use]
    pub fn is_delete_marker(&self, key: &str, version_id: &str) -> bool {
        match self {
            Self::Unversioned(_) => false,
            Self::Versioned(vs) => vs
                .versions(key)
                .iter()
                .any(|v| v.version_id() == version_id && v.is_delete_marker()),
        }
    }

    /// Number of keys whose latest version is a real object.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Unversioned(ks) => ks.len(),
            Self::Versioned(vs) => vs.len(),
        }
    }

    /// Whether no key has a visible latest version.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any version or delete marker is stored at all.
    #[must_use]
    pub fn has_versions(&self) -> bool {
        match self {
            Self::Unversioned(ks) => !ks.is_empty(),
            Self::Versioned(vs) => vs.version_count() > 0,
        }
    }
}

fn no_such_version(key: &str, version_id: &str) -> S3ServiceError {
    S3ServiceError::NoSuchVersion {
        key: key.to_owned(),
        version_id: version_id.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// KeyStore
// ---------------------------------------------------------------------------

/// Unversioned key store. Each key maps to exactly one `S3Object`.
#[derive(Debug, Default)]
pub struct KeyStore {
    objects: BTreeMap<String, S3Object>,
}

impl KeyStore {
    /// Insert or replace an object. Returns the previous object if any.
    pub fn put(&mut self, mut object: S3Object) -> Option<S3Object> {
        NULL_VERSION_ID.clone_into(&mut object.version_id);
        self.objects.insert(object.key.clone(), object)
    }

    /// Get an object by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S3Object> {
        self.objects.get(key)
    }

    /// Get a mutable object by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut S3Object> {
        self.objects.get_mut(key)
    }

    /// Remove an object by key. Returns the removed object if any.
    pub fn delete(&mut self, key: &str) -> Option<S3Object> {
        self.objects.remove(key)
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// ---------------------------------------------------------------------------
// VersionedKeyStore
// ---------------------------------------------------------------------------

/// Versioned key store. Each key maps to an ordered list of versions
/// (newest first). The first entry is the latest version for that key.
#[derive(Debug, Default)]
pub struct VersionedKeyStore {
    objects: BTreeMap<String, Vec<ObjectVersion>>,
}

impl VersionedKeyStore {
    /// Prepend an object under a freshly generated version ID.
    pub fn put(&mut self, mut object: S3Object) -> String {
        object.version_id = generate_version_id();
        let version_id = object.version_id.clone();
        debug!(key = %object.key, version = %version_id, "storing versioned object");
        let versions = self.objects.entry(object.key.clone()).or_default();
        versions.insert(0, ObjectVersion::Object(Box::new(object)));
        version_id
    }

    /// Get the current object for a key.
    ///
    /// Returns `None` if the key doesn't exist or the latest version is a
    /// delete marker.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S3Object> {
        self.objects
            .get(key)
            .and_then(|versions| versions.first()?.as_object())
    }

    /// Mutable counterpart of [`VersionedKeyStore::get`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut S3Object> {
        self.objects
            .get_mut(key)
            .and_then(|versions| versions.first_mut()?.as_object_mut())
    }

    /// Get a specific version of an object.
    #[must_use]
    pub fn get_version(&self, key: &str, version_id: &str) -> Option<&S3Object> {
        self.objects.get(key).and_then(|versions| {
            versions
                .iter()
                .find(|v| v.version_id() == version_id)
                .and_then(ObjectVersion::as_object)
        })
    }

    /// Mutable counterpart of [`VersionedKeyStore::get_version`].
    pub fn get_version_mut(&mut self, key: &str, version_id: &str) -> Option<&mut S3Object> {
        self.objects.get_mut(key).and_then(|versions| {
            versions
                .iter_mut()
                .find(|v| v.version_id() == version_id)
                .and_then(ObjectVersion::as_object_mut)
        })
    }

    /// All versions of `key`, newest first.
    #[must_use]
    pub fn versions(&self, key: &str) -> &[ObjectVersion] {
        self.objects.get(key).map_or(&[], Vec::as_slice)
    }

    /// Insert a delete marker at the front and return its version ID.
    pub fn insert_delete_marker(&mut self, key: &str, owner: &Owner) -> String {
        let version_id = generate_version_id();
        let dm = S3DeleteMarker {
            key: key.to_owned(),
            version_id: version_id.clone(),
            last_modified: Utc::now(),
            owner: owner.clone(),
        };

        let versions = self.objects.entry(key.to_owned()).or_default();
        versions.insert(0, ObjectVersion::DeleteMarker(dm));
        debug!(key, version_id = %version_id, "inserted delete marker");

        version_id
    }

    /// Remove a specific version (object or delete marker) entirely.
    pub fn delete_version(&mut self, key: &str, version_id: &str) -> Option<ObjectVersion> {
        let versions = self.objects.get_mut(key)?;
        let idx = versions.iter().position(|v| v.version_id() == version_id)?;
        let removed = versions.remove(idx);
        if versions.is_empty() {
            self.objects.remove(key);
        }
        Some(removed)
    }

    /// Count of keys whose latest entry is a real object.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .values()
            .filter(|versions| versions.first().is_some_and(|v| !v.is_delete_marker()))
            .count()
    }

    /// Whether zero keys have a latest non-delete-marker version.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of stored versions, delete markers included.
    #[must_use]
    pub fn version_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }
}

fn generate_version_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn make_object(key: &str, body: &'static str) -> S3Object {
        S3Object::new(key, Bytes::from_static(body.as_bytes()), Owner::default())
    }

    // ---- KeyStore tests ----

    #[test]
    fn test_should_put_and_get_in_keystore() {
        let mut ks = KeyStore::default();
        assert!(ks.is_empty());

        ks.put(make_object("a/b/c", "x"));
        assert_eq!(ks.len(), 1);
        assert_eq!(ks.get("a/b/c").map(|o| o.size), Some(1));
    }

    #[test]
    fn test_should_replace_object_in_keystore() {
        let mut ks = KeyStore::default();
        ks.put(make_object("k", "first"));
        let prev = ks.put(make_object("k", "second"));
        assert_eq!(prev.map(|o| o.data), Some(Bytes::from_static(b"first")));
        assert_eq!(ks.len(), 1);
    }

    // ---- VersionedKeyStore tests ----

    #[test]
    fn test_should_stack_versions_newest_first() {
        let mut vs = VersionedKeyStore::default();
        let v1 = vs.put(make_object("k", "one"));
        let v2 = vs.put(make_object("k", "two"));

        assert_ne!(v1, v2);
        assert_eq!(vs.get("k").map(|o| o.version_id.clone()), Some(v2.clone()));
        let ids: Vec<&str> = vs
            .versions("k")
            .iter()
            .map(ObjectVersion::version_id)
            .collect();
        assert_eq!(ids, vec![v2.as_str(), v1.as_str()]);
        assert_eq!(
            vs.get_version("k", &v1).map(|o| o.data.clone()),
            Some(Bytes::from_static(b"one"))
        );
    }

    #[test]
    fn test_should_hide_key_behind_delete_marker() {
        let mut vs = VersionedKeyStore::default();
        let v1 = vs.put(make_object("k", "one"));
        let dm = vs.insert_delete_marker("k", &Owner::default());

        assert!(vs.get("k").is_none());
        assert!(vs.get_version("k", &v1).is_some());
        assert!(vs.get_version("k", &dm).is_none());
        assert!(vs.is_empty());
        assert_eq!(vs.version_count(), 2);
    }

    #[test]
    fn test_should_delete_specific_version() {
        let mut vs = VersionedKeyStore::default();
        let v1 = vs.put(make_object("k", "one"));
        let v2 = vs.put(make_object("k", "two"));

        assert!(vs.delete_version("k", &v2).is_some());
        assert_eq!(vs.get("k").map(|o| o.version_id.clone()), Some(v1.clone()));
        assert!(vs.delete_version("k", &v1).is_some());
        assert_eq!(vs.version_count(), 0);
        assert!(vs.delete_version("k", &v1).is_none());
    }

    // ---- ObjectStore tests ----

    #[test]
    fn test_should_default_to_unversioned() {
        let store = ObjectStore::default();
        assert!(!store.is_versioned());
        assert!(ObjectStore::versioned().is_versioned());
    }

    #[test]
    fn test_should_use_null_version_in_unversioned_store() {
        let mut store = ObjectStore::default();
        assert_eq!(store.put(make_object("k", "x")), NULL_VERSION_ID);
        assert!(store.get_version("k", NULL_VERSION_ID).is_some());
        assert!(store.get_version("k", "other").is_none());
    }

    #[test]
    fn test_should_resolve_latest_or_named_version() {
        let mut store = ObjectStore::versioned();
        let v1 = store.put(make_object("k", "one"));
        let v2 = store.put(make_object("k", "two"));

        let latest = store.resolve("k", None).expect("latest should resolve");
        assert_eq!(latest.version_id, v2);
        let named = store.resolve("k", Some(&v1)).expect("v1 should resolve");
        assert_eq!(named.version_id, v1);
    }

    #[test]
    fn test_should_map_resolve_failures_to_errors() {
        let mut store = ObjectStore::versioned();
        store.put(make_object("k", "one"));

        assert!(matches!(
            store.resolve("missing", None),
            Err(S3ServiceError::NoSuchKey { .. })
        ));
        assert!(matches!(
            store.resolve("k", Some("nope")),
            Err(S3ServiceError::NoSuchVersion { .. })
        ));

        store.delete_latest("k", &Owner::default());
        assert!(matches!(
            store.resolve("k", None),
            Err(S3ServiceError::NoSuchKey { .. })
        ));
    }

    #[test]
    fn test_should_mutate_through_resolve_mut() {
        let mut store = ObjectStore::versioned();
        let v1 = store.put(make_object("k", "one"));
        store
            .resolve_mut("k", Some(&v1))
            .expect("should resolve")
            .content_type = Some("text/plain".to_owned());
        assert_eq!(
            store
                .get_version("k", &v1)
                .and_then(|o| o.content_type.as_deref()),
            Some("text/plain")
        );
    }

    #[test]
    fn test_should_report_delete_outcome() {
        let mut unversioned = ObjectStore::default();
        unversioned.put(make_object("k", "x"));
        assert_eq!(
            unversioned.delete_latest("k", &Owner::default()),
            DeleteOutcome::Removed
        );
        assert!(!unversioned.has_versions());

        let mut versioned = ObjectStore::versioned();
        versioned.put(make_object("k", "x"));
        let outcome = versioned.delete_latest("k", &Owner::default());
        let DeleteOutcome::MarkerInserted { version_id } = outcome else {
            panic!("expected a delete marker");
        };
        assert!(versioned.is_delete_marker("k", &version_id));
        assert!(versioned.is_empty());
        assert!(versioned.has_versions());
    }

    #[test]
    fn test_should_delete_null_version_in_unversioned_store() {
        let mut store = ObjectStore::default();
        store.put(make_object("k", "x"));
        assert!(store.delete_version("k", "other").is_none());
        assert!(store.delete_version("k", NULL_VERSION_ID).is_some());
        assert!(store.is_empty());
    }
}
