//! Object lock handlers: legal hold and retention.
//!
//! Every handler applies the bucket-level gate before it looks at any
//! object, so a plain bucket always answers with
//! `ObjectLockConfigurationNotFoundError`, whether or not the key exists.

use bytes::Bytes;
use chrono::Utc;
use s3mock_model::error::S3Error;
use s3mock_model::input::{
    GetObjectLegalHoldInput, GetObjectRetentionInput, PutObjectLegalHoldInput,
    PutObjectRetentionInput,
};
use s3mock_model::output::{
    GetObjectLegalHoldOutput, GetObjectRetentionOutput, PutObjectLegalHoldOutput,
    PutObjectRetentionOutput,
};
use s3mock_model::types::ObjectLockLegalHold;
use tracing::debug;

use crate::lock::{
    LegalHoldState, requested_legal_hold, requested_retention, stored_retention,
    validate_retention_update,
};
use crate::provider::S3Provider;
use crate::state::S3Object;

#[allow(clippy::unused_async)]
impl S3Provider {
    /// Report the legal hold of an object version.
    ///
    /// Two distinct 404s exist: one for a bucket without object lock, one
    /// for a version whose hold was never set.
    pub async fn handle_get_object_legal_hold(
        &self,
        input: GetObjectLegalHoldInput,
    ) -> Result<GetObjectLegalHoldOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        bucket.require_object_lock()?;

        let store = bucket.objects.read();
        let object = store.resolve(&input.key, input.version_id.as_deref())?;
        let status = LegalHoldState::derive(bucket.object_lock_enabled, object.legal_hold)
            .into_status(&bucket.name, &input.key)?;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            status = ?status,
            "get_object_legal_hold completed"
        );

        Ok(GetObjectLegalHoldOutput {
            legal_hold: Some(ObjectLockLegalHold {
                status: Some(status),
            }),
        })
    }

    /// Set the legal hold of an object version. Repeating a status is a no-op.
    ///
    /// A missing key fails with `NoSuchKey`, unless
    /// `legal_hold_creates_missing_object` is configured, in which case an
    /// empty version carrying only the hold is stored.
    pub async fn handle_put_object_legal_hold(
        &self,
        input: PutObjectLegalHoldInput,
    ) -> Result<PutObjectLegalHoldOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        bucket.require_object_lock()?;
        let status = requested_legal_hold(input.legal_hold.as_ref())?;

        let mut store = bucket.objects.write();
        let create_missing = input.version_id.is_none()
            && self.config.legal_hold_creates_missing_object
            && store.get(&input.key).is_none();

        if create_missing {
            let mut placeholder =
                S3Object::new(input.key.clone(), Bytes::new(), self.owner.clone());
            placeholder.legal_hold = Some(status);
            let version_id = store.put(placeholder);
            debug!(
                bucket = %input.bucket,
                key = %input.key,
                version_id = %version_id,
                "created empty version for legal hold"
            );
        } else {
            let object = store.resolve_mut(&input.key, input.version_id.as_deref())?;
            object.legal_hold = Some(status);
        }

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            status = ?status,
            "put_object_legal_hold completed"
        );
        Ok(PutObjectLegalHoldOutput {})
    }

    /// Report the retention of an object version.
    pub async fn handle_get_object_retention(
        &self,
        input: GetObjectRetentionInput,
    ) -> Result<GetObjectRetentionOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        bucket.require_object_lock()?;

        let store = bucket.objects.read();
        let object = store.resolve(&input.key, input.version_id.as_deref())?;
        Ok(GetObjectRetentionOutput {
            retention: Some(stored_retention(object)?),
        })
    }

    /// Set, extend, shorten or clear the retention of an object version.
    pub async fn handle_put_object_retention(
        &self,
        input: PutObjectRetentionInput,
    ) -> Result<PutObjectRetentionOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        bucket.require_object_lock()?;
        let requested = requested_retention(input.retention.as_ref())?;
        let bypass = input.bypass_governance_retention.unwrap_or(false);

        let mut store = bucket.objects.write();
        let object = store.resolve_mut(&input.key, input.version_id.as_deref())?;
        validate_retention_update(object, requested.as_ref(), bypass, Utc::now())?;
        object.retention = requested;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            version_id = %object.version_id,
            retention = ?requested,
            "put_object_retention completed"
        );
        Ok(PutObjectRetentionOutput {})
    }
}
