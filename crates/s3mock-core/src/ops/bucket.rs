//! Bucket operation handlers.
//!
//! Implements `create_bucket`, `delete_bucket`, `head_bucket`, `list_buckets`,
//! `get_object_lock_configuration` and `put_object_lock_configuration`.

use s3mock_model::error::S3Error;
use s3mock_model::input::{
    CreateBucketInput, DeleteBucketInput, GetObjectLockConfigurationInput, HeadBucketInput,
    ListBucketsInput, PutObjectLockConfigurationInput,
};
use s3mock_model::output::{
    CreateBucketOutput, GetObjectLockConfigurationOutput, HeadBucketOutput, ListBucketsOutput,
    PutObjectLockConfigurationOutput,
};
use s3mock_model::types::Bucket;
use tracing::debug;

use crate::error::S3ServiceError;
use crate::lock::DefaultRetentionRule;
use crate::provider::S3Provider;
use crate::validation::validate_bucket_name;

// Handlers stay async so the HTTP bridge can treat every operation alike.
#[allow(clippy::unused_async)]
impl S3Provider {
    /// Create a new bucket, optionally with object lock enabled.
    pub async fn handle_create_bucket(
        &self,
        input: CreateBucketInput,
    ) -> Result<CreateBucketOutput, S3Error> {
        let bucket_name = input.bucket;
        validate_bucket_name(&bucket_name)?;

        let region = input
            .location_constraint
            .filter(|lc| !lc.is_empty())
            .unwrap_or_else(|| self.config.default_region.clone());
        let object_lock_enabled = input.object_lock_enabled_for_bucket.unwrap_or(false);

        self.state.create_bucket(
            bucket_name.clone(),
            region,
            self.owner.clone(),
            object_lock_enabled,
        )?;

        debug!(bucket = %bucket_name, object_lock = object_lock_enabled, "create_bucket completed");

        Ok(CreateBucketOutput {
            location: Some(format!("/{bucket_name}")),
        })
    }

    /// Delete an empty bucket.
    pub async fn handle_delete_bucket(&self, input: DeleteBucketInput) -> Result<(), S3Error> {
        self.state.delete_bucket(&input.bucket)?;
        debug!(bucket = %input.bucket, "delete_bucket completed");
        Ok(())
    }

    /// Check that a bucket exists (HEAD Bucket).
    pub async fn handle_head_bucket(
        &self,
        input: HeadBucketInput,
    ) -> Result<HeadBucketOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        Ok(HeadBucketOutput {
            bucket_region: Some(bucket.region.clone()),
        })
    }

    /// List all buckets, sorted by name.
    pub async fn handle_list_buckets(
        &self,
        input: ListBucketsInput,
    ) -> Result<ListBucketsOutput, S3Error> {
        let prefix = input.prefix.unwrap_or_default();
        let buckets = self
            .state
            .list_buckets()
            .into_iter()
            .filter(|(name, _)| name.starts_with(&prefix))
            .map(|(name, creation_date)| Bucket {
                creation_date: Some(creation_date),
                name: Some(name),
            })
            .collect();

        Ok(ListBucketsOutput {
            buckets,
            owner: Some((&self.owner).into()),
            prefix: (!prefix.is_empty()).then_some(prefix),
        })
    }

    /// Return the object lock configuration of a lock-enabled bucket.
    pub async fn handle_get_object_lock_configuration(
        &self,
        input: GetObjectLockConfigurationInput,
    ) -> Result<GetObjectLockConfigurationOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        bucket.require_object_lock()?;

        let rule = *bucket.default_retention.read();
        Ok(GetObjectLockConfigurationOutput {
            object_lock_configuration: Some(DefaultRetentionRule::to_configuration(rule.as_ref())),
        })
    }

    /// Replace the default retention rule of a lock-enabled bucket.
    ///
    /// Object lock itself cannot be switched on here: a bucket created
    /// without it keeps failing with `ObjectLockConfigurationNotFoundError`.
    pub async fn handle_put_object_lock_configuration(
        &self,
        input: PutObjectLockConfigurationInput,
    ) -> Result<PutObjectLockConfigurationOutput, S3Error> {
        let bucket = self.state.get_bucket(&input.bucket)?;
        bucket.require_object_lock()?;

        let config = input
            .object_lock_configuration
            .ok_or_else(|| S3ServiceError::MalformedXml {
                detail: "missing ObjectLockConfiguration".to_owned(),
            })?;
        let rule = DefaultRetentionRule::from_configuration(&config)?;
        *bucket.default_retention.write() = rule;

        debug!(bucket = %input.bucket, rule = ?rule, "put_object_lock_configuration completed");
        Ok(PutObjectLockConfigurationOutput {})
    }
}

#[cfg(test)]
mod tests {
    use s3mock_model::error::S3ErrorCode;
    use s3mock_model::types::{
        DefaultRetention, ObjectLockConfiguration, ObjectLockEnabled, ObjectLockRetentionMode,
        ObjectLockRule,
    };

    use super::*;
    use crate::ops::test_support::{create_bucket, provider, put_object};

    #[tokio::test]
    async fn test_should_create_bucket_with_location() {
        let provider = provider();
        let output = provider
            .handle_create_bucket(CreateBucketInput {
                bucket: "photos".to_owned(),
                ..CreateBucketInput::default()
            })
            .await
            .expect("create should succeed");
        assert_eq!(output.location.as_deref(), Some("/photos"));

        let head = provider
            .handle_head_bucket(HeadBucketInput {
                bucket: "photos".to_owned(),
            })
            .await
            .expect("head should succeed");
        assert_eq!(head.bucket_region.as_deref(), Some("us-east-1"));
    }

    #[tokio::test]
    async fn test_should_use_location_constraint_as_region() {
        let provider = provider();
        provider
            .handle_create_bucket(CreateBucketInput {
                bucket: "eu-data".to_owned(),
                location_constraint: Some("eu-west-1".to_owned()),
                ..CreateBucketInput::default()
            })
            .await
            .expect("create should succeed");

        let bucket = provider
            .state()
            .get_bucket("eu-data")
            .expect("bucket exists");
        assert_eq!(bucket.region, "eu-west-1");
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_and_invalid_names() {
        let provider = provider();
        create_bucket(&provider, "dup", false).await;

        let err = provider
            .handle_create_bucket(CreateBucketInput {
                bucket: "dup".to_owned(),
                ..CreateBucketInput::default()
            })
            .await
            .expect_err("duplicate should fail");
        assert_eq!(err.code, S3ErrorCode::BucketAlreadyExists);
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);

        let err = provider
            .handle_create_bucket(CreateBucketInput {
                bucket: "Bad_Name".to_owned(),
                ..CreateBucketInput::default()
            })
            .await
            .expect_err("invalid name should fail");
        assert_eq!(err.code, S3ErrorCode::InvalidBucketName);
    }

    #[tokio::test]
    async fn test_should_list_buckets_sorted_with_prefix() {
        let provider = provider();
        for name in ["logs-b", "assets", "logs-a"] {
            create_bucket(&provider, name, false).await;
        }

        let all = provider
            .handle_list_buckets(ListBucketsInput::default())
            .await
            .expect("list should succeed");
        let names: Vec<_> = all.buckets.iter().filter_map(|b| b.name.clone()).collect();
        assert_eq!(names, vec!["assets", "logs-a", "logs-b"]);
        assert!(all.owner.is_some());

        let logs = provider
            .handle_list_buckets(ListBucketsInput {
                prefix: Some("logs-".to_owned()),
            })
            .await
            .expect("list should succeed");
        assert_eq!(logs.buckets.len(), 2);
        assert_eq!(logs.prefix.as_deref(), Some("logs-"));
    }

    #[tokio::test]
    async fn test_should_refuse_to_delete_non_empty_bucket() {
        let provider = provider();
        create_bucket(&provider, "busy", false).await;
        put_object(&provider, "busy", "k", "v").await;

        let err = provider
            .handle_delete_bucket(DeleteBucketInput {
                bucket: "busy".to_owned(),
            })
            .await
            .expect_err("non-empty bucket");
        assert_eq!(err.code, S3ErrorCode::BucketNotEmpty);

        let err = provider
            .handle_delete_bucket(DeleteBucketInput {
                bucket: "ghost".to_owned(),
            })
            .await
            .expect_err("missing bucket");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
    }

    #[tokio::test]
    async fn test_should_report_lock_configuration_only_for_lock_buckets() {
        let provider = provider();
        create_bucket(&provider, "plain", false).await;
        create_bucket(&provider, "locked", true).await;

        let err = provider
            .handle_get_object_lock_configuration(GetObjectLockConfigurationInput {
                bucket: "plain".to_owned(),
            })
            .await
            .expect_err("plain bucket has no lock configuration");
        assert_eq!(err.code, S3ErrorCode::ObjectLockConfigurationNotFoundError);

        let output = provider
            .handle_get_object_lock_configuration(GetObjectLockConfigurationInput {
                bucket: "locked".to_owned(),
            })
            .await
            .expect("lock bucket has a configuration");
        let config = output.object_lock_configuration.expect("configuration");
        assert_eq!(config.object_lock_enabled, Some(ObjectLockEnabled::Enabled));
        assert!(config.rule.is_none());
    }

    #[tokio::test]
    async fn test_should_store_default_retention_rule() {
        let provider = provider();
        create_bucket(&provider, "locked", true).await;

        let config = ObjectLockConfiguration {
            object_lock_enabled: Some(ObjectLockEnabled::Enabled),
            rule: Some(ObjectLockRule {
                default_retention: Some(DefaultRetention {
                    days: Some(7),
                    mode: Some(ObjectLockRetentionMode::Governance),
                    years: None,
                }),
            }),
        };
        provider
            .handle_put_object_lock_configuration(PutObjectLockConfigurationInput {
                bucket: "locked".to_owned(),
                object_lock_configuration: Some(config.clone()),
            })
            .await
            .expect("put should succeed");

        let output = provider
            .handle_get_object_lock_configuration(GetObjectLockConfigurationInput {
                bucket: "locked".to_owned(),
            })
            .await
            .expect("get should succeed");
        assert_eq!(output.object_lock_configuration, Some(config));
    }

    #[tokio::test]
    async fn test_should_not_enable_lock_on_plain_bucket() {
        let provider = provider();
        create_bucket(&provider, "plain", false).await;

        let err = provider
            .handle_put_object_lock_configuration(PutObjectLockConfigurationInput {
                bucket: "plain".to_owned(),
                object_lock_configuration: Some(ObjectLockConfiguration {
                    object_lock_enabled: Some(ObjectLockEnabled::Enabled),
                    rule: None,
                }),
            })
            .await
            .expect_err("plain bucket");
        assert_eq!(err.code, S3ErrorCode::ObjectLockConfigurationNotFoundError);
        let bucket = provider.state().get_bucket("plain").expect("bucket exists");
        assert!(!bucket.object_lock_enabled);
    }
}
