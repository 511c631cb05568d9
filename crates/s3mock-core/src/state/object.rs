//! Stored object versions, delete markers and ownership.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use s3mock_model::types::{ObjectLockLegalHoldStatus, ObjectLockRetention, ObjectLockRetentionMode};

/// Version ID used by every object in an unversioned bucket.
pub const NULL_VERSION_ID: &str = "null";

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// The owner of an S3 object or bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// The canonical user ID of the owner.
    pub id: String,
    /// The display name of the owner.
    pub display_name: String,
}

impl Default for Owner {
    fn default() -> Self {
        Self {
            id: "75aa57f09aa0c8caeab4f8c24e99d10f8e7faeebf76c078efc7c6caea54ba06a".to_owned(),
            display_name: "s3mock".to_owned(),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.display_name, self.id)
    }
}

impl From<&Owner> for s3mock_model::types::Owner {
    fn from(owner: &Owner) -> Self {
        Self {
            display_name: Some(owner.display_name.clone()),
            id: Some(owner.id.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Retention
// ---------------------------------------------------------------------------

/// A complete retention setting on an object version.
///
/// Unlike the wire [`ObjectLockRetention`], both fields are required here:
/// a stored retention always has a mode and a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retention {
    /// `GOVERNANCE` or `COMPLIANCE`.
    pub mode: ObjectLockRetentionMode,
    /// The instant the retention expires.
    pub retain_until: DateTime<Utc>,
}

impl Retention {
    /// Whether the retention still protects the version at `now`.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.retain_until > now
    }
}

impl From<Retention> for ObjectLockRetention {
    fn from(retention: Retention) -> Self {
        Self {
            mode: Some(retention.mode),
            retain_until_date: Some(retention.retain_until),
        }
    }
}

// ---------------------------------------------------------------------------
// S3Object
// ---------------------------------------------------------------------------

/// A stored S3 object version (never a delete marker).
#[derive(Debug, Clone)]
pub struct S3Object {
    /// The object key.
    pub key: String,
    /// The version ID (`"null"` for unversioned objects).
    pub version_id: String,
    /// The object body.
    pub data: Bytes,
    /// The entity tag (quoted hex MD5 digest).
    pub etag: String,
    /// The object size in bytes.
    pub size: u64,
    /// The time this version was last modified.
    pub last_modified: DateTime<Utc>,
    /// The MIME type supplied on upload.
    pub content_type: Option<String>,
    /// User-defined metadata (`x-amz-meta-*`), keys lowercased without prefix.
    pub user_metadata: HashMap<String, String>,
    /// Object tags in insertion order.
    pub tags: Vec<(String, String)>,
    /// Legal hold status. `None` until a hold has been set explicitly.
    pub legal_hold: Option<ObjectLockLegalHoldStatus>,
    /// Retention setting, if any.
    pub retention: Option<Retention>,
    /// The owner of this version.
    pub owner: Owner,
}

impl S3Object {
    /// Build a new version for `key` holding `data`, with lock fields unset.
    ///
    /// The version ID starts as `"null"`; versioned stores replace it on insert.
    #[must_use]
    pub fn new(key: impl Into<String>, data: Bytes, owner: Owner) -> Self {
        Self {
            key: key.into(),
            version_id: NULL_VERSION_ID.to_owned(),
            etag: compute_etag(&data),
            size: data.len() as u64,
            data,
            last_modified: Utc::now(),
            content_type: None,
            user_metadata: HashMap::new(),
            tags: Vec::new(),
            legal_hold: None,
            retention: None,
            owner,
        }
    }

    /// Whether a legal hold is currently ON.
    #[must_use]
    pub fn is_legal_hold_on(&self) -> bool {
        self.legal_hold == Some(ObjectLockLegalHoldStatus::On)
    }
}

/// Quoted hex MD5 of `data`, as S3 reports it in `ETag`.
#[must_use]
pub fn compute_etag(data: &[u8]) -> String {
    format!("\"{}\"", hex::encode(Md5::digest(data)))
}

// ---------------------------------------------------------------------------
// S3DeleteMarker
// ---------------------------------------------------------------------------

/// A delete marker in a versioned bucket.
///
/// Created when an object is deleted without a version ID. It shadows the
/// older versions for lookups that omit a version ID.
#[derive(Debug, Clone)]
pub struct S3DeleteMarker {
    /// The object key.
    pub key: String,
    /// The version ID of this delete marker.
    pub version_id: String,
    /// The time this delete marker was created.
    pub last_modified: DateTime<Utc>,
    /// The owner of this delete marker.
    pub owner: Owner,
}

// ---------------------------------------------------------------------------
// ObjectVersion
// ---------------------------------------------------------------------------

/// A version entry in a versioned bucket, either an object or a delete marker.
#[derive(Debug, Clone)]
pub enum ObjectVersion {
    /// A real object version (boxed to reduce enum size).
    Object(Box<S3Object>),
    /// A delete-marker version.
    DeleteMarker(S3DeleteMarker),
}

impl ObjectVersion {
    /// Returns the version ID.
    #[must_use]
    pub fn version_id(&self) -> &str {
        match self {
            Self::Object(obj) => &obj.version_id,
            Self::DeleteMarker(dm) => &dm.version_id,
        }
    }

    /// Returns `true` if this version is a delete marker.
    #[must_use]
    pub fn is_delete_marker(&self) -> bool {
        matches!(self, Self::DeleteMarker(_))
    }

    /// Returns a reference to the inner `S3Object`, if this is an object version.
    #[must_use]
    pub fn as_object(&self) -> Option<&S3Object> {
        match self {
            Self::Object(obj) => Some(obj),
            Self::DeleteMarker(_) => None,
        }
    }

    /// Returns a mutable reference to the inner `S3Object`, if this is an object version.
    pub fn as_object_mut(&mut self) -> Option<&mut S3Object> {
        match self {
            Self::Object(obj) => Some(obj),
            Self::DeleteMarker(_) => None,
        }
    }
}
