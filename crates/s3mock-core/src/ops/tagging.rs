//! Object tagging handlers.
//!
//! Tags are plain metadata. Changing them never touches the object body,
//! so a legal hold or retention does not block these operations.

use s3mock_model::error::S3Error;
use s3mock_model::input::{DeleteObjectTaggingInput, GetObjectTaggingInput, PutObjectTaggingInput};
use s3mock_model::output::{
    DeleteObjectTaggingOutput, GetObjectTaggingOutput, PutObjectTaggingOutput,
};
use s3mock_model::types::{Tag, Tagging};
use tracing::debug;

use super::visible_version_id;
use crate::provider::S3Provider;
use crate::validation::validate_tags;

#[allow(clippy::unused_async)]
impl S3Provider {
    /// Return the tag set of an object version.
    pub async fn handle_get_object_tagging(
        &self,
        input: GetObjectTaggingInput,
    ) -> Result<GetObjectTaggingOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let store = bucket.objects.read();
        let object = store.resolve(&input.key, input.version_id.as_deref())?;

        let tag_set = object
            .tags
            .iter()
            .map(|(key, value)| Tag {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();

        Ok(GetObjectTaggingOutput {
            tagging: Tagging { tag_set },
            version_id: visible_version_id(&object.version_id),
        })
    }

    /// Replace the tag set of an object version.
    pub async fn handle_put_object_tagging(
        &self,
        input: PutObjectTaggingInput,
    ) -> Result<PutObjectTaggingOutput, S3Error> {
        let tags: Vec<(String, String)> = input
            .tagging
            .tag_set
            .into_iter()
            .map(|tag| (tag.key, tag.value))
            .collect();
        validate_tags(&tags)?;

        let bucket = self.state.get_bucket(&input.bucket)?;
        let mut store = bucket.objects.write();
        let object = store.resolve_mut(&input.key, input.version_id.as_deref())?;
        object.tags = tags;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            count = object.tags.len(),
            "put_object_tagging completed"
        );

        Ok(PutObjectTaggingOutput {
            version_id: visible_version_id(&object.version_id),
        })
    }

    /// Remove every tag from an object version.
    pub async fn handle_delete_object_tagging(
        &self,
        input: DeleteObjectTaggingInput,
    ) -> Result<DeleteObjectTaggingOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        let mut store = bucket.objects.write();
        let object = store.resolve_mut(&input.key, input.version_id.as_deref())?;
        object.tags.clear();

        debug!(bucket = %input.bucket, key = %input.key, "delete_object_tagging completed");

        Ok(DeleteObjectTaggingOutput {
            version_id: visible_version_id(&object.version_id),
        })
    }
}
