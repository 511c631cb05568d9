//! Object operation handlers.
//!
//! Implements `put_object`, `get_object`, `head_object` and `delete_object`.
//! Destructive operations run the object lock check under the same write
//! guard that performs the mutation.

use chrono::Utc;
use s3mock_model::error::S3Error;
use s3mock_model::input::{DeleteObjectInput, GetObjectInput, HeadObjectInput, PutObjectInput};
use s3mock_model::output::{DeleteObjectOutput, GetObjectOutput, HeadObjectOutput, PutObjectOutput};
use s3mock_model::request::StreamingBlob;
use tracing::debug;

use super::visible_version_id;
use crate::error::S3ServiceError;
use crate::lock::{ObjectLockHeaders, check_mutable, initial_lock};
use crate::provider::S3Provider;
use crate::state::{DeleteOutcome, ObjectVersion, S3Object};
use crate::validation::{parse_tagging_header, validate_object_key};

#[allow(clippy::unused_async)]
impl S3Provider {
    /// Store a new object version.
    ///
    /// In a lock-enabled bucket the version starts with the lock fields from
    /// the `x-amz-object-lock-*` headers, falling back to the bucket's default
    /// retention. Replacing an unversioned object that is protected fails with
    /// `AccessDenied`.
    pub async fn handle_put_object(
        &self,
        input: PutObjectInput,
    ) -> Result<PutObjectOutput, S3Error> {
        let bucket_name = input.bucket;
        let key = input.key;
        validate_object_key(&key)?;

        let data = input.body.map(|b| b.data).unwrap_or_default();
        if data.len() as u64 > self.config.max_object_size {
            return Err(S3ServiceError::EntityTooLarge.into());
        }

        let bucket = self.state.get_bucket(&bucket_name)?;
        let tags = input
            .tagging
            .as_deref()
            .map(parse_tagging_header)
            .transpose()?
            .unwrap_or_default();

        let now = Utc::now();
        let default_rule = *bucket.default_retention.read();
        let lock = initial_lock(
            bucket.object_lock_enabled,
            default_rule.as_ref(),
            ObjectLockHeaders {
                legal_hold: input.object_lock_legal_hold_status,
                mode: input.object_lock_mode,
                retain_until: input.object_lock_retain_until_date,
            },
            now,
        )?;

        let mut object = S3Object::new(key.clone(), data, self.owner.clone());
        object.content_type = input.content_type;
        object.user_metadata = input.metadata;
        object.tags = tags;
        object.legal_hold = lock.legal_hold;
        object.retention = lock.retention;
        let etag = object.etag.clone();

        let mut store = bucket.objects.write();
        if !store.is_versioned() {
            if let Some(existing) = store.get(&key) {
                check_mutable(existing, false, now)?;
            }
        }
        let version_id = store.put(object);

        debug!(
            bucket = %bucket_name,
            key = %key,
            version_id = %version_id,
            legal_hold = ?lock.legal_hold,
            "put_object completed"
        );

        Ok(PutObjectOutput {
            e_tag: Some(etag),
            version_id: visible_version_id(&version_id),
        })
    }

    /// Return an object version with its body.
    pub async fn handle_get_object(
        &self,
        input: GetObjectInput,
    ) -> Result<GetObjectOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let store = bucket.objects.read();
        let object = store.resolve(&input.key, input.version_id.as_deref())?;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            version_id = %object.version_id,
            "get_object completed"
        );

        Ok(GetObjectOutput {
            body: Some(StreamingBlob::new(object.data.clone())),
            head: head_output(object),
        })
    }

    /// Return an object version's metadata without the body.
    pub async fn handle_head_object(
        &self,
        input: HeadObjectInput,
    ) -> Result<HeadObjectOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let store = bucket.objects.read();
        let object = store.resolve(&input.key, input.version_id.as_deref())?;
        Ok(head_output(object))
    }

    /// Delete an object.
    ///
    /// Without a version ID, a versioned bucket gains a delete marker and
    /// no data is destroyed. With a version ID, that version is removed
    /// permanently, which a legal hold or active retention refuses.
    pub async fn handle_delete_object(
        &self,
        input: DeleteObjectInput,
    ) -> Result<DeleteObjectOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let bypass = input.bypass_governance_retention.unwrap_or(false);
        let now = Utc::now();
        let key = input.key;

        let mut store = bucket.objects.write();
        let output = if let Some(version_id) = input.version_id {
            if let Some(object) = store.get_version(&key, &version_id) {
                check_mutable(object, bypass, now)?;
            }
            let removed = store.delete_version(&key, &version_id);
            let removed_marker = matches!(removed, Some(ObjectVersion::DeleteMarker(_)));
            DeleteObjectOutput {
                delete_marker: removed_marker.then_some(true),
                version_id: Some(version_id),
            }
        } else {
            if !store.is_versioned() {
                if let Some(object) = store.get(&key) {
                    check_mutable(object, bypass, now)?;
                }
            }
            match store.delete_latest(&key, &self.owner) {
                DeleteOutcome::Removed => DeleteObjectOutput::default(),
                DeleteOutcome::MarkerInserted { version_id } => DeleteObjectOutput {
                    delete_marker: Some(true),
                    version_id: Some(version_id),
                },
            }
        };

        debug!(
            bucket = %input.bucket,
            key = %key,
            version_id = ?output.version_id,
            delete_marker = ?output.delete_marker,
            "delete_object completed"
        );
        Ok(output)
    }
}

/// Response headers shared by `GetObject` and `HeadObject`.
fn head_output(object: &S3Object) -> HeadObjectOutput {
    HeadObjectOutput {
        content_length: i64::try_from(object.size).ok(),
        content_type: Some(
            object
                .content_type
                .clone()
                .unwrap_or_else(|| "binary/octet-stream".to_owned()),
        ),
        e_tag: Some(object.etag.clone()),
        last_modified: Some(object.last_modified),
        metadata: object.user_metadata.clone(),
        object_lock_legal_hold_status: object.legal_hold,
        object_lock_mode: object.retention.map(|r| r.mode),
        object_lock_retain_until_date: object.retention.map(|r| r.retain_until),
        tag_count: (!object.tags.is_empty())
            .then(|| i32::try_from(object.tags.len()).unwrap_or(i32::MAX)),
        version_id: visible_version_id(&object.version_id),
    }
}
